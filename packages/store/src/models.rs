//! # Document models — blocks and entities
//!
//! Defines the records a host document is made of. A document is an ordered list
//! of [`Block`]s; blocks that carry more than plain text point at an [`Entity`]
//! through an [`EntityKey`]. TeX blocks keep their math source in the entity's
//! data under [`CONTENT_FIELD`].
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`BlockKey`] | Stable identifier of a block within one document. |
//! | [`EntityKey`] | Identifier of an entity record in the document's entity map. |
//! | [`Block`] | One unit of content: its key, [`BlockKind`], plain text, and optional entity. |
//! | [`Entity`] | A host-managed key-value record ([`EntityData`]) tagged with a kind string. |
//!
//! These types are `Serialize + Deserialize` so a frontend can hand them across
//! component or process boundaries without a separate wire type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The entity data field holding a TeX block's math source.
pub const CONTENT_FIELD: &str = "content";

/// Entity kind used for TeX blocks.
pub const TEX_ENTITY: &str = "TOKEN";

/// Key-value payload of an entity.
pub type EntityData = BTreeMap<String, String>;

/// Stable identifier of a block.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockKey(pub String);

/// Identifier of an entity record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey(pub String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EntityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a block renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Plain paragraph text, edited by the host.
    Text,
    /// Atomic math block, edited by its own widget.
    Tex,
}

impl BlockKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            BlockKind::Text => "doc-text",
            BlockKind::Tex => "doc-tex",
        }
    }
}

/// A unit of content in a document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub key: BlockKey,
    pub kind: BlockKind,
    /// Plain text of the block. Atomic blocks keep a single placeholder space.
    pub text: String,
    /// Entity attached to the block's first character, if any.
    pub entity: Option<EntityKey>,
}

/// Host-managed record attached to a block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: String,
    pub data: EntityData,
}

impl Entity {
    /// Entity for a TeX block holding `content`.
    pub fn tex(content: impl Into<String>) -> Self {
        let mut data = EntityData::new();
        data.insert(CONTENT_FIELD.to_string(), content.into());
        Self {
            kind: TEX_ENTITY.to_string(),
            data,
        }
    }

    /// The math source stored in this entity, if present.
    pub fn content(&self) -> Option<&str> {
        self.data.get(CONTENT_FIELD).map(String::as_str)
    }

    /// Shallow-merge `data` into this entity, overwriting existing fields.
    pub fn merge(&mut self, data: EntityData) {
        self.data.extend(data);
    }
}

/// Build the `{content: ...}` payload used to commit a TeX block.
pub fn content_data(content: impl Into<String>) -> EntityData {
    let mut data = EntityData::new();
    data.insert(CONTENT_FIELD.to_string(), content.into());
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_only_given_fields() {
        let mut entity = Entity::tex("x^2");
        entity.data.insert("label".to_string(), "eq1".to_string());

        entity.merge(content_data("a+b"));

        assert_eq!(entity.content(), Some("a+b"));
        assert_eq!(entity.data.get("label").map(String::as_str), Some("eq1"));
        assert_eq!(entity.kind, TEX_ENTITY);
    }

    #[test]
    fn test_keys_display_as_raw_strings() {
        assert_eq!(BlockKey::new("b3").to_string(), "b3");
        assert_eq!(EntityKey::new("e1").as_str(), "e1");
    }
}
