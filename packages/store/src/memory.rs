use std::collections::HashMap;

use crate::document::{DocumentStore, StoreError};
use crate::models::{Block, BlockKey, BlockKind, Entity, EntityData, EntityKey};

/// In-memory document for tests and the desktop frontend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryDocument {
    blocks: Vec<Block>,
    entities: HashMap<EntityKey, Entity>,
    next_key: u64,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with one text block per paragraph of `text` (split on blank lines).
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        for paragraph in text.split("\n\n") {
            let paragraph = paragraph.trim();
            if !paragraph.is_empty() {
                doc.insert_text_block(paragraph);
            }
        }
        doc
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.key == key)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append a plain text block.
    pub fn insert_text_block(&mut self, text: &str) -> BlockKey {
        let key = self.block_key();
        self.blocks.push(Block {
            key: key.clone(),
            kind: BlockKind::Text,
            text: text.to_string(),
            entity: None,
        });
        key
    }

    /// Replace the text of a plain text block.
    pub fn set_text(&mut self, key: &BlockKey, text: &str) -> Result<(), StoreError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.key == key)
            .ok_or_else(|| StoreError::UnknownBlock(key.clone()))?;
        block.text = text.to_string();
        Ok(())
    }

    /// Insert a TeX block holding `content`, after `after` or at the end.
    ///
    /// Creates the backing entity and returns the new block's key.
    pub fn insert_tex_block(
        &mut self,
        after: Option<&BlockKey>,
        content: &str,
    ) -> Result<BlockKey, StoreError> {
        let index = match after {
            Some(after) => {
                self.blocks
                    .iter()
                    .position(|b| &b.key == after)
                    .ok_or_else(|| StoreError::UnknownBlock(after.clone()))?
                    + 1
            }
            None => self.blocks.len(),
        };

        let entity_key = self.entity_key();
        self.entities.insert(entity_key.clone(), Entity::tex(content));

        let key = self.block_key();
        self.blocks.insert(
            index,
            Block {
                key: key.clone(),
                kind: BlockKind::Tex,
                text: " ".to_string(),
                entity: Some(entity_key),
            },
        );
        Ok(key)
    }

    /// Remove a block and the entity attached to it.
    pub fn remove_block(&mut self, key: &BlockKey) -> Option<Block> {
        let index = self.blocks.iter().position(|b| &b.key == key)?;
        let block = self.blocks.remove(index);
        if let Some(entity) = &block.entity {
            self.entities.remove(entity);
        }
        Some(block)
    }

    fn block_key(&mut self) -> BlockKey {
        self.next_key += 1;
        BlockKey(format!("b{}", self.next_key))
    }

    fn entity_key(&mut self) -> EntityKey {
        self.next_key += 1;
        EntityKey(format!("e{}", self.next_key))
    }
}

impl DocumentStore for MemoryDocument {
    fn entity(&self, key: &EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    fn merge_entity_data(&mut self, key: &EntityKey, data: EntityData) -> Result<(), StoreError> {
        let entity = self
            .entities
            .get_mut(key)
            .ok_or_else(|| StoreError::UnknownEntity(key.clone()))?;
        entity.merge(data);
        Ok(())
    }

    fn entity_key_for_block(&self, block: &BlockKey) -> Option<EntityKey> {
        self.block(block).and_then(|b| b.entity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content_data;

    #[test]
    fn test_from_text_splits_paragraphs() {
        let doc = MemoryDocument::from_text("First paragraph.\n\n\n\nSecond one.\n");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.blocks()[0].text, "First paragraph.");
        assert_eq!(doc.blocks()[1].text, "Second one.");
        assert!(doc.blocks().iter().all(|b| b.kind == BlockKind::Text));
    }

    #[test]
    fn test_insert_tex_block_after() {
        let mut doc = MemoryDocument::from_text("one\n\ntwo");
        let first = doc.blocks()[0].key.clone();

        let tex = doc.insert_tex_block(Some(&first), "x^2").unwrap();

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.blocks()[1].key, tex);
        assert_eq!(doc.blocks()[1].kind, BlockKind::Tex);
        assert_eq!(doc.content_for_block(&tex).unwrap(), "x^2");
    }

    #[test]
    fn test_insert_tex_block_at_end() {
        let mut doc = MemoryDocument::from_text("one");
        let tex = doc.insert_tex_block(None, "a").unwrap();
        assert_eq!(doc.blocks().last().map(|b| &b.key), Some(&tex));
    }

    #[test]
    fn test_insert_after_unknown_block() {
        let mut doc = MemoryDocument::new();
        let missing = BlockKey::new("nope");
        assert_eq!(
            doc.insert_tex_block(Some(&missing), "x"),
            Err(StoreError::UnknownBlock(missing))
        );
        assert!(doc.is_empty());
    }

    #[test]
    fn test_merge_entity_data() {
        let mut doc = MemoryDocument::new();
        let tex = doc.insert_tex_block(None, "x^2").unwrap();
        let entity = doc.entity_key_for_block(&tex).unwrap();

        doc.merge_entity_data(&entity, content_data("a+b")).unwrap();

        assert_eq!(doc.content_for_block(&tex).unwrap(), "a+b");
    }

    #[test]
    fn test_merge_unknown_entity() {
        let mut doc = MemoryDocument::new();
        let key = EntityKey::new("e99");
        assert_eq!(
            doc.merge_entity_data(&key, content_data("x")),
            Err(StoreError::UnknownEntity(key))
        );
    }

    #[test]
    fn test_remove_block_drops_entity() {
        let mut doc = MemoryDocument::from_text("intro");
        let tex = doc.insert_tex_block(None, "x").unwrap();
        let entity = doc.entity_key_for_block(&tex).unwrap();

        let removed = doc.remove_block(&tex).unwrap();

        assert_eq!(removed.key, tex);
        assert_eq!(doc.len(), 1);
        assert!(doc.entity(&entity).is_none());
        assert!(doc.remove_block(&tex).is_none());
    }

    #[test]
    fn test_content_for_text_block_is_missing() {
        let doc = MemoryDocument::from_text("plain");
        let key = doc.blocks()[0].key.clone();
        assert_eq!(
            doc.content_for_block(&key),
            Err(StoreError::MissingEntity(key))
        );
    }

    #[test]
    fn test_set_text() {
        let mut doc = MemoryDocument::from_text("old");
        let key = doc.blocks()[0].key.clone();
        doc.set_text(&key, "new").unwrap();
        assert_eq!(doc.block(&key).unwrap().text, "new");
    }
}
