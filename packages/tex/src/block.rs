//! # TexBlock — the editable math block state machine
//!
//! One [`TexBlock`] exists per TeX block on screen. It starts out
//! [`Mode::Viewing`], showing the typeset form of the content stored in the
//! block's entity. A click switches to [`Mode::Editing`]: the stored content is
//! copied into a [`TextDraft`], the embedded editor asks for focus, and every
//! edit re-parses the draft to decide whether it may be saved.
//!
//! ## Transitions
//!
//! | From | Event | To | Effect |
//! |------|-------|----|--------|
//! | Viewing | [`click`](TexBlock::click) | Editing | draft = stored content, focus requested, `on_start_edit` |
//! | Editing | [`click`](TexBlock::click) | Editing | none |
//! | Editing | [`edit`](TexBlock::edit) | Editing | draft replaced, `invalid` re-derived |
//! | Editing | [`save`](TexBlock::save) (valid) | Viewing | draft merged into the entity, `on_finish_edit` |
//! | Editing | [`blur`](TexBlock::blur) (valid) | Viewing | same commit as save |
//! | Editing | [`blur`](TexBlock::blur) (invalid) | Editing | nothing is written |
//! | any | [`remove`](TexBlock::remove) | unchanged | `on_remove` |
//!
//! The document and the host callbacks are passed into every operation rather
//! than owned, so a block can be driven against [`store::MemoryDocument`] in
//! tests and against a framework's shared state in a UI.

use store::models::content_data;
use store::{BlockKey, DocumentStore, EditorConfig, StoreError};
use thiserror::Error;

use crate::math::{self, MathError};
use crate::view::{ButtonView, TexBlockView};

/// Callbacks a host document supplies to each block.
pub trait BlockHost {
    fn on_start_edit(&mut self, block: &BlockKey);
    fn on_finish_edit(&mut self, block: &BlockKey);
    fn on_remove(&mut self, block: &BlockKey);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("block is not being edited")]
    NotEditing,
    #[error("draft cannot be saved: {0}")]
    InvalidDraft(#[from] MathError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Viewing,
    Editing,
}

/// What a focus loss did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurOutcome {
    /// The block was not being edited.
    Ignored,
    /// The draft was written back and the block is viewing again.
    Committed,
    /// The draft does not parse; the block stays in edit mode untouched.
    KeptEditing,
}

/// State of the embedded plain-text editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextDraft {
    text: String,
    focus_requested: bool,
}

impl TextDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            focus_requested: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn request_focus(&mut self) {
        self.focus_requested = true;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TexBlock {
    block: BlockKey,
    mode: Mode,
    draft: TextDraft,
    invalid: bool,
}

impl TexBlock {
    /// Widget for `block`, seeded from its stored content.
    pub fn new(block: BlockKey, store: &impl DocumentStore) -> Result<Self, StoreError> {
        let content = store.content_for_block(&block)?;
        Ok(Self {
            block,
            mode: Mode::Viewing,
            draft: TextDraft::new(content),
            invalid: false,
        })
    }

    pub fn block(&self) -> &BlockKey {
        &self.block
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Text of the embedded editor. While viewing this is the content as last
    /// seeded; [`view`](Self::view) always reads the stored content instead.
    pub fn draft(&self) -> &str {
        self.draft.text()
    }

    /// Enter edit mode. Returns `false` if the block was already editing.
    pub fn click(
        &mut self,
        store: &impl DocumentStore,
        host: &mut impl BlockHost,
    ) -> Result<bool, StoreError> {
        if self.is_editing() {
            return Ok(false);
        }
        let content = store.content_for_block(&self.block)?;
        self.invalid = !math::is_valid(&content);
        self.draft = TextDraft::new(content);
        self.draft.request_focus();
        self.mode = Mode::Editing;
        tracing::debug!(block = %self.block, "tex block editing");
        host.on_start_edit(&self.block);
        Ok(true)
    }

    /// Replace the draft with the editor's current text.
    pub fn edit(&mut self, text: impl Into<String>) {
        if !self.is_editing() {
            return;
        }
        let text = text.into();
        self.invalid = !math::is_valid(&text);
        self.draft.text = text;
    }

    /// Explicit save. Refused while viewing or while the draft is invalid.
    pub fn save(
        &mut self,
        store: &mut impl DocumentStore,
        host: &mut impl BlockHost,
    ) -> Result<(), CommitError> {
        if !self.is_editing() {
            return Err(CommitError::NotEditing);
        }
        math::parse(self.draft.text())?;
        self.commit(store, host)?;
        Ok(())
    }

    /// Focus left the block. Commits like [`save`](Self::save) when the draft is valid.
    pub fn blur(
        &mut self,
        store: &mut impl DocumentStore,
        host: &mut impl BlockHost,
    ) -> Result<BlurOutcome, StoreError> {
        if !self.is_editing() {
            return Ok(BlurOutcome::Ignored);
        }
        if self.invalid {
            tracing::debug!(block = %self.block, "blur with invalid draft, still editing");
            return Ok(BlurOutcome::KeptEditing);
        }
        self.commit(store, host)?;
        Ok(BlurOutcome::Committed)
    }

    /// Ask the host to remove this block.
    pub fn remove(&self, host: &mut impl BlockHost) {
        tracing::debug!(block = %self.block, "tex block removal requested");
        host.on_remove(&self.block);
    }

    /// Consume a pending focus request for the embedded editor.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.draft.focus_requested)
    }

    /// Describe what the block should display right now.
    pub fn view(
        &self,
        store: &impl DocumentStore,
        labels: &EditorConfig,
    ) -> Result<TexBlockView, StoreError> {
        match self.mode {
            Mode::Viewing => {
                let stored = store.content_for_block(&self.block)?;
                Ok(TexBlockView {
                    editing: false,
                    draft: stored.clone(),
                    output: stored,
                    read_only: true,
                    placeholder: labels.placeholder.clone(),
                    save: ButtonView::save(&labels.save_label, false),
                    remove_label: labels.remove_label.clone(),
                })
            }
            Mode::Editing => Ok(TexBlockView {
                editing: true,
                output: if self.invalid {
                    String::new()
                } else {
                    self.draft.text().to_string()
                },
                draft: self.draft.text().to_string(),
                read_only: false,
                placeholder: labels.placeholder.clone(),
                save: if self.invalid {
                    ButtonView::save(&labels.invalid_label, true)
                } else {
                    ButtonView::save(&labels.save_label, false)
                },
                remove_label: labels.remove_label.clone(),
            }),
        }
    }

    fn commit(
        &mut self,
        store: &mut impl DocumentStore,
        host: &mut impl BlockHost,
    ) -> Result<(), StoreError> {
        let entity = store
            .entity_key_for_block(&self.block)
            .ok_or_else(|| StoreError::MissingEntity(self.block.clone()))?;
        store.merge_entity_data(&entity, content_data(self.draft.text()))?;
        self.invalid = false;
        self.mode = Mode::Viewing;
        tracing::debug!(block = %self.block, "tex block committed");
        host.on_finish_edit(&self.block);
        Ok(())
    }
}
