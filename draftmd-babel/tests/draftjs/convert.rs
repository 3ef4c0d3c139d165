//! Markdown ↔ raw JSON through the format registry.

use draftmd_babel::{Format, FormatError, FormatRegistry};
use insta::assert_snapshot;
use std::collections::HashMap;

fn md_to_json(md: &str) -> String {
    let registry = FormatRegistry::default();
    let model = registry.parse(md, "markdown").expect("markdown should parse");
    registry
        .serialize(&model, "draftjs")
        .expect("model should serialize")
}

fn json_to_md(json: &str) -> Result<String, FormatError> {
    let registry = FormatRegistry::default();
    let model = registry.parse(json, "draftjs")?;
    registry.serialize(&model, "markdown")
}

#[test]
fn test_empty_markdown_writes_placeholder_entity_map() {
    assert_snapshot!(md_to_json(""), @r###"
    {
      "blocks": [
        {
          "text": "",
          "type": "unstyled",
          "depth": 0,
          "inlineStyleRanges": [],
          "entityRanges": []
        }
      ],
      "entityMap": {
        "type": "",
        "mutability": "",
        "data": ""
      }
    }
    "###);
}

#[test]
fn test_link_document() {
    assert_snapshot!(md_to_json("I am a __[bold](http://x/)__ link."), @r###"
    {
      "blocks": [
        {
          "text": "I am a bold link.",
          "type": "unstyled",
          "depth": 0,
          "inlineStyleRanges": [
            {
              "offset": 7,
              "length": 4,
              "style": "BOLD"
            }
          ],
          "entityRanges": [
            {
              "key": 0,
              "offset": 7,
              "length": 4
            }
          ]
        }
      ],
      "entityMap": {
        "0": {
          "type": "LINK",
          "mutability": "MUTABLE",
          "data": {
            "url": "http://x/"
          }
        }
      }
    }
    "###);
}

#[test]
fn test_code_block_language_in_data() {
    let json = md_to_json("```rust\nfn main() {}\n```");
    assert!(json.contains("\"type\": \"code-block\""));
    assert!(json.contains("\"data\": {\n        \"language\": \"rust\"\n      }"));
}

#[test]
fn test_editor_document_to_markdown() {
    let json = r#"{
        "blocks": [
            {"key": "4ifd1", "text": "Shopping", "type": "header-two", "depth": 0,
             "inlineStyleRanges": [], "entityRanges": [], "data": {}},
            {"key": "c2k0a", "text": "Fresh milk", "type": "ordered-list-item", "depth": 0,
             "inlineStyleRanges": [{"offset": 0, "length": 5, "style": "ITALIC"}],
             "entityRanges": [], "data": {}},
            {"key": "9ad3f", "text": "Bread from the bakery", "type": "ordered-list-item", "depth": 0,
             "inlineStyleRanges": [], "entityRanges": [{"key": 0, "offset": 15, "length": 6}],
             "data": {}},
            {"key": "ee1b2", "text": " ", "type": "atomic", "depth": 0,
             "inlineStyleRanges": [], "entityRanges": [{"key": 1, "offset": 0, "length": 1}],
             "data": {}}
        ],
        "entityMap": {
            "0": {"type": "LINK", "mutability": "MUTABLE", "data": {"url": "https://bakery.example/"}},
            "1": {"type": "IMAGE", "mutability": "IMMUTABLE",
                  "data": {"src": "//img/bread.jpg", "fileName": "bread.jpg"}}
        }
    }"#;

    assert_snapshot!(json_to_md(json).unwrap(), @r###"
    ## Shopping
    1. *Fresh* milk
    2. Bread from the [bakery](https://bakery.example/)
    ![bread.jpg](//img/bread.jpg)
    "###);
}

#[test]
fn test_placeholder_entity_map_is_accepted() {
    let json = r#"{"blocks": [{"text": "plain", "type": "unstyled", "depth": 0,
        "inlineStyleRanges": [], "entityRanges": []}],
        "entityMap": {"type": "", "mutability": "", "data": ""}}"#;
    assert_eq!(json_to_md(json).unwrap(), "plain");
}

#[test]
fn test_block_keys_are_preserved() {
    let json = r#"{"blocks": [{"key": "abc12", "text": "x", "type": "unstyled", "depth": 0,
        "inlineStyleRanges": [], "entityRanges": []}], "entityMap": {}}"#;
    let registry = FormatRegistry::default();
    let model = registry.parse(json, "draftjs").unwrap();
    let written = registry.serialize(&model, "draftjs").unwrap();
    assert!(written.contains("\"key\": \"abc12\""));
}

#[test]
fn test_dangling_entity_reference_fails() {
    let json = r#"{"blocks": [{"text": "x", "type": "unstyled", "depth": 0,
        "inlineStyleRanges": [], "entityRanges": [{"key": 3, "offset": 0, "length": 1}]}],
        "entityMap": {}}"#;
    assert_eq!(
        json_to_md(json),
        Err(FormatError::MissingEntity { block: 0, key: 3 })
    );
}

#[test]
fn test_compact_output_option() {
    let registry = FormatRegistry::default();
    let model = registry.parse("*hi*", "markdown").unwrap();

    let mut options = HashMap::new();
    options.insert("pretty".to_string(), "false".to_string());
    options.insert("placeholder-entity-map".to_string(), "false".to_string());
    let json = registry
        .serialize_with_options(&model, "draftjs", &options)
        .unwrap();
    assert_eq!(
        json,
        "{\"blocks\":[{\"text\":\"hi\",\"type\":\"unstyled\",\"depth\":0,\"inlineStyleRanges\":[{\"offset\":0,\"length\":2,\"style\":\"ITALIC\"}],\"entityRanges\":[]}],\"entityMap\":{}}\n"
    );
}

#[test]
fn test_unknown_option_is_rejected() {
    let format = draftmd_babel::DraftJsFormat::default();
    let mut options = HashMap::new();
    options.insert("colour".to_string(), "blue".to_string());
    let result = format.serialize_with_options(&draftmd_babel::Model::default(), &options);
    assert!(matches!(result, Err(FormatError::NotSupported(_))));
}

#[test]
fn test_oversized_style_range_is_clamped_to_the_text() {
    let json = r#"{"blocks": [{"text": "abc", "type": "unstyled", "depth": 0,
        "inlineStyleRanges": [{"offset": 1, "length": 18446744073709551615, "style": "BOLD"}],
        "entityRanges": []}], "entityMap": {}}"#;
    assert_eq!(json_to_md(json).unwrap(), "a__bc__");
}

#[test]
fn test_link_partially_overlapping_bold_keeps_its_own_text() {
    let json = r#"{"blocks": [{"text": "ab cd ef", "type": "unstyled", "depth": 0,
        "inlineStyleRanges": [{"offset": 3, "length": 5, "style": "BOLD"}],
        "entityRanges": [{"key": 0, "offset": 0, "length": 5}]}],
        "entityMap": {"0": {"type": "LINK", "mutability": "MUTABLE", "data": {"url": "u"}}}}"#;
    assert_eq!(json_to_md(json).unwrap(), "[ab __cd__](u) __ef__");
}
