pub mod config;
pub mod document;
pub mod models;

mod memory;
pub use memory::MemoryDocument;

pub use config::{EditorConfig, InsertConfig, OutputConfig, TexEditorConfig};
pub use document::{DocumentStore, StoreError};
pub use models::{Block, BlockKey, BlockKind, Entity, EntityData, EntityKey};
