use dioxus::prelude::*;
use store::{BlockKey, BlockKind, MemoryDocument};
use tex::LiveEdits;

use crate::config::use_editor_config;
use crate::tex_block::TexBlock;
use crate::TEX_CSS;

/// A document of text paragraphs and TeX blocks.
///
/// Text stays read-only while any TeX block is being edited.
#[component]
pub fn TexEditor(mut document: Signal<MemoryDocument>) -> Element {
    let config = use_editor_config();
    let mut live = use_signal(LiveEdits::new);

    let blocks = document.read().blocks().to_vec();
    let read_only = live.read().is_read_only();

    let handle_insert = move |_| {
        let content = config.read().insert.default_content.clone();
        match document.write().insert_tex_block(None, &content) {
            Ok(key) => tracing::debug!("Inserted TeX block {key}"),
            Err(e) => tracing::error!("Failed to insert TeX block: {e}"),
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: TEX_CSS }
        div {
            class: "tex-editor",
            div {
                class: "tex-editor-toolbar",
                button {
                    class: "tex-insert",
                    disabled: read_only,
                    onclick: handle_insert,
                    "Insert TeX"
                }
            }
            div {
                class: if read_only { "tex-editor-doc read-only" } else { "tex-editor-doc" },
                for block in blocks {
                    {match block.kind {
                        BlockKind::Text => rsx! {
                            TextBlock {
                                key: "{block.key}",
                                document,
                                block: block.key.clone(),
                                text: block.text.clone(),
                                read_only,
                            }
                        },
                        BlockKind::Tex => rsx! {
                            TexBlock {
                                key: "{block.key}",
                                document,
                                block: block.key.clone(),
                                on_start_edit: move |key: BlockKey| live.write().start(&key),
                                on_finish_edit: move |key: BlockKey| live.write().finish(&key),
                                on_remove: move |key: BlockKey| {
                                    live.write().finish(&key);
                                    if document.write().remove_block(&key).is_some() {
                                        tracing::debug!("Removed TeX block {key}");
                                    }
                                },
                            }
                        },
                    }}
                }
            }
        }
    }
}

#[component]
fn TextBlock(
    mut document: Signal<MemoryDocument>,
    block: BlockKey,
    text: String,
    read_only: bool,
) -> Element {
    rsx! {
        textarea {
            class: BlockKind::Text.css_class(),
            value: "{text}",
            readonly: read_only,
            oninput: move |evt: FormEvent| {
                if let Err(e) = document.write().set_text(&block, &evt.value()) {
                    tracing::error!("Failed to update text block: {e}");
                }
            },
        }
    }
}
