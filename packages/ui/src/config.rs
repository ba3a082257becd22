use dioxus::prelude::*;
use store::TexEditorConfig;

/// Editor configuration provided by the app root.
pub fn use_editor_config() -> Signal<TexEditorConfig> {
    use_context::<Signal<TexEditorConfig>>()
}
