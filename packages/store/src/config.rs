//! # Editor configuration — `texeditor.toml`
//!
//! Defines the TOML configuration file read by the frontends at startup
//! (filename: [`TexEditorConfig::filename`] = `"texeditor.toml"`). It controls
//! how TeX blocks render, the labels shown while editing, and the formula a new
//! block starts with.
//!
//! ## Structure
//!
//! ```toml
//! [output]
//! display_mode = true     # render as block (display) math
//! debounce_ms = 0         # delay before a scheduled render runs
//!
//! [editor]
//! placeholder = "Start a document..."
//! save_label = "Done"
//! invalid_label = "Invalid TeX"
//! remove_label = "Remove"
//!
//! [insert]
//! default_content = "\\int_a^b u \\frac{d^2v}{dx^2} \\, dx"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`TexEditorConfig`] | Top-level config. Builder helpers, TOML (de)serialisation, the canonical filename. |
//! | [`OutputConfig`] | Rendering section: display mode and the render debounce delay. |
//! | [`EditorConfig`] | Labels and placeholder of the embedded editor panel. |
//! | [`InsertConfig`] | Content of freshly inserted TeX blocks. |
//!
//! Every field has a default so a missing or partial file is equivalent to the
//! default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `texeditor.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TexEditorConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub insert: InsertConfig,
}

/// Rendering configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Render as display (block) math.
    #[serde(default = "default_display_mode")]
    pub display_mode: bool,
    /// Milliseconds to wait before a scheduled render runs. 0 means next tick.
    #[serde(default)]
    pub debounce_ms: u64,
}

/// Text shown by the embedded editor panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_save_label")]
    pub save_label: String,
    #[serde(default = "default_invalid_label")]
    pub invalid_label: String,
    #[serde(default = "default_remove_label")]
    pub remove_label: String,
}

/// Settings for newly inserted blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsertConfig {
    #[serde(default = "default_content")]
    pub default_content: String,
}

fn default_display_mode() -> bool {
    true
}

fn default_placeholder() -> String {
    "Start a document...".to_string()
}

fn default_save_label() -> String {
    "Done".to_string()
}

fn default_invalid_label() -> String {
    "Invalid TeX".to_string()
}

fn default_remove_label() -> String {
    "Remove".to_string()
}

fn default_content() -> String {
    r"\int_a^b u \frac{d^2v}{dx^2} \, dx".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            display_mode: default_display_mode(),
            debounce_ms: 0,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            save_label: default_save_label(),
            invalid_label: default_invalid_label(),
            remove_label: default_remove_label(),
        }
    }
}

impl Default for InsertConfig {
    fn default() -> Self {
        Self {
            default_content: default_content(),
        }
    }
}

impl OutputConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl TexEditorConfig {
    /// Builder method to set the render debounce delay.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.output.debounce_ms = ms;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "texeditor.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = TexEditorConfig::from_toml("").unwrap();
        assert_eq!(config, TexEditorConfig::default());
        assert!(config.output.display_mode);
        assert_eq!(config.editor.save_label, "Done");
        assert_eq!(config.editor.invalid_label, "Invalid TeX");
    }

    #[test]
    fn test_partial_section() {
        let config = TexEditorConfig::from_toml(
            r#"
            [editor]
            save_label = "Save"

            [output]
            debounce_ms = 150
            "#,
        )
        .unwrap();
        assert_eq!(config.editor.save_label, "Save");
        assert_eq!(config.editor.remove_label, "Remove");
        assert_eq!(config.output.debounce(), Duration::from_millis(150));
        assert!(config.output.display_mode);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TexEditorConfig::default().with_debounce_ms(40);
        let text = config.to_toml().unwrap();
        assert!(text.contains("debounce_ms = 40"));
        assert_eq!(TexEditorConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(TexEditorConfig::from_toml("[output]\ndisplay_mode = \"yes\"").is_err());
    }
}
