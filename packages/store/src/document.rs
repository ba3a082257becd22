//! # DocumentStore — the host document capability
//!
//! Widgets never own the document they are embedded in. Everything a block
//! widget needs from its host goes through the [`DocumentStore`] trait: resolve
//! the entity attached to a block, read it, and merge new data into it. The
//! in-memory implementation lives in [`crate::memory`]; a frontend with its own
//! document model only has to implement these three methods.

use thiserror::Error;

use crate::models::{BlockKey, Entity, EntityData, EntityKey};

/// Failures when a block or entity the caller refers to is not in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown block `{0}`")]
    UnknownBlock(BlockKey),
    #[error("block `{0}` has no entity with content")]
    MissingEntity(BlockKey),
    #[error("unknown entity `{0}`")]
    UnknownEntity(EntityKey),
}

/// Read/merge access to a host document's blocks and entities.
pub trait DocumentStore {
    fn entity(&self, key: &EntityKey) -> Option<&Entity>;

    fn merge_entity_data(&mut self, key: &EntityKey, data: EntityData) -> Result<(), StoreError>;

    fn entity_key_for_block(&self, block: &BlockKey) -> Option<EntityKey>;

    /// The math source stored for `block`.
    fn content_for_block(&self, block: &BlockKey) -> Result<String, StoreError> {
        let key = self
            .entity_key_for_block(block)
            .ok_or_else(|| StoreError::MissingEntity(block.clone()))?;
        self.entity(&key)
            .and_then(Entity::content)
            .map(str::to_string)
            .ok_or_else(|| StoreError::MissingEntity(block.clone()))
    }
}
