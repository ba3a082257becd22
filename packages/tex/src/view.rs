//! Render description of a TeX block, independent of any UI framework.

/// Everything a frontend needs to draw one TeX block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TexBlockView {
    pub editing: bool,
    /// Source handed to the typeset output. Empty while an invalid draft is edited.
    pub output: String,
    /// Text bound to the embedded editor.
    pub draft: String,
    pub read_only: bool,
    pub placeholder: String,
    pub save: ButtonView,
    pub remove_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub disabled: bool,
}

impl ButtonView {
    pub(crate) fn save(label: &str, invalid: bool) -> Self {
        Self {
            label: label.to_string(),
            disabled: invalid,
        }
    }

    pub fn css_class(&self) -> &'static str {
        if self.disabled {
            "tex-save tex-save-invalid"
        } else {
            "tex-save"
        }
    }
}

impl TexBlockView {
    pub fn wrapper_class(&self) -> &'static str {
        "tex-block"
    }

    /// Class of the container around the typeset output.
    pub fn output_class(&self) -> &'static str {
        if self.editing {
            "tex-output tex-active"
        } else {
            "tex-output"
        }
    }

    /// Class of the editor panel. The panel stays rendered in both modes so
    /// its buttons remain clickable after a focus loss commits the block.
    pub fn panel_class(&self) -> &'static str {
        if self.editing {
            "tex-panel"
        } else {
            "tex-panel tex-readonly"
        }
    }

    pub fn remove_class(&self) -> &'static str {
        "tex-remove"
    }
}
