use std::collections::BTreeSet;

use store::BlockKey;

/// Blocks whose TeX editor is currently open.
///
/// While any block is live the surrounding document is read-only, so host
/// keystrokes cannot land in the middle of a math edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveEdits {
    blocks: BTreeSet<BlockKey>,
}

impl LiveEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, block: &BlockKey) {
        self.blocks.insert(block.clone());
    }

    pub fn finish(&mut self, block: &BlockKey) {
        self.blocks.remove(block);
    }

    pub fn is_editing(&self, block: &BlockKey) -> bool {
        self.blocks.contains(block)
    }

    pub fn is_read_only(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
