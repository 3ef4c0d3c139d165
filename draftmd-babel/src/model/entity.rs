//! Entities and the table that owns them.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Entity type string used by the video plugin of the editor.
pub const VIDEO_ENTITY_TYPE: &str = "draft-js-video-plugin-video";

/// Entity payload. Keys follow the editor conventions (`url`, `src`,
/// `fileName`, `alt`).
pub type EntityData = BTreeMap<String, Value>;

/// What an entity represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Link,
    Image,
    Video,
    Other(String),
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "LINK" => EntityType::Link,
            "IMAGE" => EntityType::Image,
            VIDEO_ENTITY_TYPE => EntityType::Video,
            _ => EntityType::Other(name),
        }
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Link => "LINK".to_string(),
            EntityType::Image => "IMAGE".to_string(),
            EntityType::Video => VIDEO_ENTITY_TYPE.to_string(),
            EntityType::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    Mutable,
    Immutable,
    Segmented,
}

/// An out-of-line record referenced by entity ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub mutability: Mutability,
    #[serde(default)]
    pub data: EntityData,
}

impl Entity {
    pub fn link(url: &str) -> Self {
        let mut data = EntityData::new();
        data.insert("url".to_string(), Value::from(url));
        Entity {
            entity_type: EntityType::Link,
            mutability: Mutability::Mutable,
            data,
        }
    }

    pub fn image(url: &str, alt: &str) -> Self {
        let mut data = EntityData::new();
        data.insert("url".to_string(), Value::from(url));
        data.insert("src".to_string(), Value::from(url));
        data.insert("fileName".to_string(), Value::from(alt));
        Entity {
            entity_type: EntityType::Image,
            mutability: Mutability::Immutable,
            data,
        }
    }

    pub fn video(src: &str) -> Self {
        let mut data = EntityData::new();
        data.insert("src".to_string(), Value::from(src));
        Entity {
            entity_type: EntityType::Video,
            mutability: Mutability::Immutable,
            data,
        }
    }

    fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn url(&self) -> Option<&str> {
        self.data_str("url")
    }

    pub fn src(&self) -> Option<&str> {
        self.data_str("src")
    }

    /// Where the media lives: `url`, falling back to `src`.
    pub fn location(&self) -> &str {
        self.url().or_else(|| self.src()).unwrap_or_default()
    }

    /// Human-readable label for media: `fileName`, falling back to `alt`.
    pub fn label(&self) -> &str {
        self.data_str("fileName")
            .or_else(|| self.data_str("alt"))
            .unwrap_or_default()
    }
}

/// Append-only entity table shared by every block of one document.
///
/// Keys are handed out densely from zero in insertion order and are never
/// reused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityMap {
    entries: BTreeMap<u32, Entity>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entity` under the next free key and return that key.
    pub fn insert(&mut self, entity: Entity) -> u32 {
        let key = self.next_key();
        self.entries.insert(key, entity);
        key
    }

    fn next_key(&self) -> u32 {
        self.entries
            .keys()
            .next_back()
            .map_or(0, |last| last + 1)
    }

    pub fn get(&self, key: u32) -> Option<&Entity> {
        self.entries.get(&key)
    }

    pub fn contains_key(&self, key: u32) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Entity)> {
        self.entries.iter().map(|(key, entity)| (*key, entity))
    }

    /// The stand-in written in place of an empty map, which some editor
    /// versions require to load a raw document.
    pub fn placeholder() -> Value {
        serde_json::json!({ "type": "", "mutability": "", "data": "" })
    }
}

impl FromIterator<(u32, Entity)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (u32, Entity)>>(iter: I) -> Self {
        EntityMap {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for EntityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, entity)| (key.to_string(), entity)))
    }
}

impl<'de> Deserialize<'de> for EntityMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;

        let is_placeholder = !raw.is_empty()
            && raw
                .keys()
                .all(|key| matches!(key.as_str(), "type" | "mutability" | "data"));
        if is_placeholder {
            return Ok(EntityMap::new());
        }

        raw.into_iter()
            .map(|(key, value)| {
                let key = key
                    .parse::<u32>()
                    .map_err(|_| <D::Error as de::Error>::custom(format!("invalid entity key '{key}'")))?;
                let entity =
                    Entity::deserialize(value).map_err(<D::Error as de::Error>::custom)?;
                Ok((key, entity))
            })
            .collect()
    }
}
