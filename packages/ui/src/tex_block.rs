use std::rc::Rc;

use dioxus::prelude::*;
use store::{BlockKey, MemoryDocument};
use tex::{BlockHost, BlurOutcome, CommitError};

use crate::config::use_editor_config;
use crate::icons::FaTrashCan;
use crate::tex_output::TexOutput;
use crate::Icon;

/// Forwards state machine callbacks to the parent's event handlers.
#[derive(Clone, Copy)]
struct HandlerHost {
    on_start_edit: EventHandler<BlockKey>,
    on_finish_edit: EventHandler<BlockKey>,
    on_remove: EventHandler<BlockKey>,
}

impl BlockHost for HandlerHost {
    fn on_start_edit(&mut self, block: &BlockKey) {
        self.on_start_edit.call(block.clone());
    }

    fn on_finish_edit(&mut self, block: &BlockKey) {
        self.on_finish_edit.call(block.clone());
    }

    fn on_remove(&mut self, block: &BlockKey) {
        self.on_remove.call(block.clone());
    }
}

/// An atomic math block that toggles between typeset output and a TeX editor.
#[component]
pub fn TexBlock(
    /// Document holding the block's entity.
    mut document: Signal<MemoryDocument>,
    block: BlockKey,
    /// Called when the block enters edit mode.
    on_start_edit: EventHandler<BlockKey>,
    /// Called after the draft was written back.
    on_finish_edit: EventHandler<BlockKey>,
    /// Called when the user asks to remove the block.
    on_remove: EventHandler<BlockKey>,
) -> Element {
    let config = use_editor_config();
    let mut state = use_signal({
        let block = block.clone();
        move || match tex::TexBlock::new(block, &*document.peek()) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::error!("Cannot edit TeX block: {e}");
                None
            }
        }
    });
    let mut editor = use_signal(|| Option::<Rc<MountedData>>::None);
    let host = HandlerHost {
        on_start_edit,
        on_finish_edit,
        on_remove,
    };

    let handle_click = move |_| {
        let mut host = host;
        let mut state = state.write();
        let Some(tex) = state.as_mut() else {
            return;
        };
        match tex.click(&*document.read(), &mut host) {
            Ok(true) => {
                if tex.take_focus_request() {
                    if let Some(el) = editor() {
                        spawn(async move {
                            if let Err(e) = el.set_focus(true).await {
                                tracing::warn!("Failed to focus TeX editor: {e:?}");
                            }
                        });
                    }
                }
            }
            Ok(false) => {}
            Err(e) => tracing::error!("Failed to start editing: {e}"),
        }
    };

    let handle_blur = move |_| {
        let mut host = host;
        if let Some(tex) = state.write().as_mut() {
            match tex.blur(&mut *document.write(), &mut host) {
                Ok(BlurOutcome::KeptEditing) => {
                    tracing::debug!("TeX draft invalid, keeping editor open");
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Failed to commit TeX block: {e}"),
            }
        }
    };

    let handle_save = move |evt: MouseEvent| {
        evt.stop_propagation();
        let mut host = host;
        if let Some(tex) = state.write().as_mut() {
            match tex.save(&mut *document.write(), &mut host) {
                Ok(()) => {}
                // Focus left the block through another path and blur already committed.
                Err(CommitError::NotEditing) => {}
                Err(e) => tracing::warn!("TeX block not saved: {e}"),
            }
        }
    };

    let handle_remove = move |evt: MouseEvent| {
        evt.stop_propagation();
        let mut host = host;
        if let Some(tex) = state.read().as_ref() {
            tex.remove(&mut host);
        }
    };

    let view = {
        let state = state.read();
        let Some(tex) = state.as_ref() else {
            return rsx! {
                div { class: "tex-block tex-missing" }
            };
        };
        match tex.view(&*document.read(), &config.read().editor) {
            Ok(view) => view,
            Err(e) => {
                tracing::error!("Cannot render TeX block: {e}");
                return rsx! {
                    div { class: "tex-block tex-missing" }
                };
            }
        }
    };

    rsx! {
        div {
            class: view.wrapper_class(),
            onclick: handle_click,
            onfocusout: handle_blur,
            div {
                class: view.output_class(),
                TexOutput { content: view.output.clone() }
            }
            div {
                class: view.panel_class(),
                textarea {
                    class: "tex-value",
                    value: "{view.draft}",
                    placeholder: "{view.placeholder}",
                    readonly: view.read_only,
                    spellcheck: "false",
                    onmounted: move |evt: MountedEvent| editor.set(Some(evt.data())),
                    oninput: move |evt: FormEvent| {
                        if let Some(tex) = state.write().as_mut() {
                            tex.edit(evt.value());
                        }
                    },
                }
                div {
                    class: "tex-buttons",
                    button {
                        class: view.save.css_class(),
                        disabled: view.save.disabled,
                        // Keep focus in the textarea so focus-out does not commit first.
                        onmousedown: move |evt: MouseEvent| evt.prevent_default(),
                        onclick: handle_save,
                        "{view.save.label}"
                    }
                    button {
                        class: view.remove_class(),
                        onmousedown: move |evt: MouseEvent| evt.prevent_default(),
                        onclick: handle_remove,
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                        "{view.remove_label}"
                    }
                }
            }
        }
    }
}
