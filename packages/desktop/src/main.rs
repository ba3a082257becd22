use std::path::Path;

use dioxus::prelude::*;
use store::{MemoryDocument, TexEditorConfig};

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(load_config(Path::new(TexEditorConfig::filename()))));
    let doc = use_signal(sample_document);

    rsx! {
        ui::TexEditor { document: doc }
    }
}

/// Read the config at `path`, falling back to defaults.
///
/// A missing file is silent; unreadable or invalid files are logged.
fn load_config(path: &Path) -> TexEditorConfig {
    match std::fs::read_to_string(path) {
        Ok(text) => TexEditorConfig::from_toml(&text).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
            TexEditorConfig::default()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => TexEditorConfig::default(),
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", path.display(), e);
            TexEditorConfig::default()
        }
    }
}

fn sample_document() -> MemoryDocument {
    let mut doc = MemoryDocument::from_text(
        "Click a formula to edit its TeX source. The rest of the document is \
         read-only until you press Done or click away.",
    );
    let intro = doc.blocks()[0].key.clone();
    let inserted = doc
        .insert_tex_block(Some(&intro), r"\sum_{k=1}^{n} k = \frac{n(n+1)}{2}")
        .and_then(|key| doc.insert_tex_block(Some(&key), r"e^{i\pi} + 1 = 0"));
    if let Err(e) = inserted {
        tracing::error!("Failed to build sample document: {}", e);
    }
    doc.insert_text_block("Use Insert TeX to add another block at the end.");
    doc
}
