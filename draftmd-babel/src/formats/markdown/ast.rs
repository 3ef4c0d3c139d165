//! Owned, typed view over the comrak AST.
//!
//! Comrak hands out arena-allocated nodes whose lifetime is tied to the arena.
//! The converter only needs a handful of attributes per node, so we copy them
//! into a small owned tree and drop the arena before any conversion logic
//! runs. Node kinds carry stable type names; those names are the keys used by
//! [`crate::styles::StyleConfig`].

use comrak::nodes::{AstNode, ListType, NodeValue, Sourcepos};
use comrak::{parse_document, Arena, ComrakOptions};

/// Kind of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Header,
    List,
    ListItem,
    BlockQuote,
    CodeBlock,
    HtmlBlock,
    HorizontalRule,
    Table,
    Str,
    Break,
    Emphasis,
    Strong,
    Delete,
    Code,
    Html,
    Link,
    Image,
    Other,
}

impl NodeKind {
    /// Name used to look the node up in style configuration.
    pub fn type_name(self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Header => "Header",
            NodeKind::List => "List",
            NodeKind::ListItem => "ListItem",
            NodeKind::BlockQuote => "BlockQuote",
            NodeKind::CodeBlock => "CodeBlock",
            NodeKind::HtmlBlock => "HtmlBlock",
            NodeKind::HorizontalRule => "HorizontalRule",
            NodeKind::Table => "Table",
            NodeKind::Str => "Str",
            NodeKind::Break => "Break",
            NodeKind::Emphasis => "Emphasis",
            NodeKind::Strong => "Strong",
            NodeKind::Delete => "Delete",
            NodeKind::Code => "Code",
            NodeKind::Html => "Html",
            NodeKind::Link => "Link",
            NodeKind::Image => "Image",
            NodeKind::Other => "Other",
        }
    }
}

/// One node of the parsed Markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct MdNode {
    pub kind: NodeKind,
    /// Literal text for leaves (text, inline code, raw HTML, code blocks).
    pub value: Option<String>,
    pub children: Vec<MdNode>,
    /// Link or image destination.
    pub url: Option<String>,
    /// Image alternative text.
    pub alt: Option<String>,
    /// Code block info string.
    pub lang: Option<String>,
    pub ordered: bool,
    /// Header level.
    pub depth: u8,
    /// Source text the node was parsed from.
    pub raw: String,
}

impl MdNode {
    fn new(kind: NodeKind) -> Self {
        MdNode {
            kind,
            value: None,
            children: Vec::new(),
            url: None,
            alt: None,
            lang: None,
            ordered: false,
            depth: 0,
            raw: String::new(),
        }
    }

    pub fn first_child(&self) -> Option<&MdNode> {
        self.children.first()
    }

    /// True if this is a paragraph holding exactly one image.
    pub fn is_lone_image(&self) -> bool {
        self.kind == NodeKind::Paragraph
            && self.children.len() == 1
            && self.children[0].kind == NodeKind::Image
    }

    /// Text this node contributes to the flattened block text.
    ///
    /// Images contribute a single placeholder character.
    pub fn flat_text(&self) -> String {
        let mut text = String::new();
        self.collect_flat_text(&mut text);
        text
    }

    fn collect_flat_text(&self, out: &mut String) {
        if self.kind == NodeKind::Image {
            out.push(' ');
            return;
        }
        match &self.value {
            Some(value) => out.push_str(value),
            None => {
                for child in &self.children {
                    child.collect_flat_text(out);
                }
            }
        }
    }
}

fn comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options
}

/// Parse `source` into an owned node tree rooted at a `Document` node.
pub fn parse(source: &str) -> MdNode {
    let arena = Arena::new();
    let options = comrak_options();
    let root = parse_document(&arena, source, &options);
    let lines: Vec<&str> = source.split('\n').collect();
    convert_node(root, &lines)
}

fn convert_node<'a>(node: &'a AstNode<'a>, lines: &[&str]) -> MdNode {
    let ast = node.data.borrow();

    let mut converted = match &ast.value {
        NodeValue::Document => MdNode::new(NodeKind::Document),
        NodeValue::Paragraph => MdNode::new(NodeKind::Paragraph),
        NodeValue::Heading(heading) => {
            let mut header = MdNode::new(NodeKind::Header);
            header.depth = heading.level;
            header
        }
        NodeValue::List(list) => {
            let mut converted = MdNode::new(NodeKind::List);
            converted.ordered = matches!(list.list_type, ListType::Ordered);
            converted
        }
        NodeValue::Item(_) => MdNode::new(NodeKind::ListItem),
        NodeValue::BlockQuote => MdNode::new(NodeKind::BlockQuote),
        NodeValue::CodeBlock(code_block) => {
            let mut converted = MdNode::new(NodeKind::CodeBlock);
            let literal = code_block.literal.as_str();
            converted.value = Some(literal.strip_suffix('\n').unwrap_or(literal).to_string());
            let info = code_block.info.trim();
            if !info.is_empty() {
                converted.lang = Some(info.to_string());
            }
            converted
        }
        NodeValue::HtmlBlock(html) => {
            let mut converted = MdNode::new(NodeKind::HtmlBlock);
            let literal = html.literal.as_str();
            converted.value = Some(literal.strip_suffix('\n').unwrap_or(literal).to_string());
            converted
        }
        NodeValue::ThematicBreak => MdNode::new(NodeKind::HorizontalRule),
        NodeValue::Table(_) => MdNode::new(NodeKind::Table),
        NodeValue::Text(text) => leaf(NodeKind::Str, text),
        NodeValue::SoftBreak | NodeValue::LineBreak => leaf(NodeKind::Break, " "),
        NodeValue::Code(code) => leaf(NodeKind::Code, &code.literal),
        NodeValue::HtmlInline(html) => leaf(NodeKind::Html, html),
        NodeValue::Emph => MdNode::new(NodeKind::Emphasis),
        NodeValue::Strong => MdNode::new(NodeKind::Strong),
        NodeValue::Strikethrough => MdNode::new(NodeKind::Delete),
        NodeValue::Link(link) => {
            let mut converted = MdNode::new(NodeKind::Link);
            converted.url = Some(link.url.clone());
            converted
        }
        NodeValue::Image(link) => {
            let mut converted = MdNode::new(NodeKind::Image);
            converted.url = Some(link.url.clone());
            converted
        }
        _ => MdNode::new(NodeKind::Other),
    };

    converted.raw = slice_source(lines, &ast.sourcepos);
    drop(ast);

    converted.children = node
        .children()
        .map(|child| convert_node(child, lines))
        .collect();

    if converted.kind == NodeKind::Image {
        // The image's children are its alt text; keep them only as `alt`.
        let alt: String = converted
            .children
            .drain(..)
            .map(|child| child.flat_text())
            .collect();
        converted.alt = Some(alt);
    }

    converted
}

fn leaf(kind: NodeKind, value: &str) -> MdNode {
    let mut node = MdNode::new(kind);
    node.value = Some(value.to_string());
    node
}

/// Cut the text covered by `sourcepos` out of the source lines.
///
/// Lines and columns are 1-based, the end column is inclusive. Positions
/// that do not fall on character boundaries yield an empty slice for that
/// line rather than a panic.
fn slice_source(lines: &[&str], sourcepos: &Sourcepos) -> String {
    let (start, end) = (sourcepos.start, sourcepos.end);
    if start.line == 0 || end.line < start.line {
        return String::new();
    }

    let mut raw = String::new();
    for line_no in start.line..=end.line {
        let Some(line) = lines.get(line_no - 1) else {
            break;
        };
        let from = if line_no == start.line {
            start.column.saturating_sub(1)
        } else {
            0
        };
        let to = if line_no == end.line {
            end.column.min(line.len())
        } else {
            line.len()
        };
        if let Some(part) = line.get(from..to.max(from)) {
            raw.push_str(part);
        }
        if line_no != end.line {
            raw.push('\n');
        }
    }
    raw
}
