//! This crate contains the Dioxus components of the TeX editor.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const TEX_CSS: Asset = asset!("/assets/tex.css");

mod config;
pub use config::use_editor_config;

mod scheduler;
pub use scheduler::{DioxusScheduler, SignalSurface};

mod tex_output;
pub use tex_output::TexOutput;

mod tex_block;
pub use tex_block::TexBlock;

mod tex_editor;
pub use tex_editor::TexEditor;
