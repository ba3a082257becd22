//! LaTeX parsing and rendering via pulldown-latex → MathML

use pulldown_latex::{
    config::DisplayMode, config::RenderConfig, mathml::push_mathml, Parser, Storage,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("invalid TeX: {0}")]
    Parse(String),
    #[error("failed to write MathML: {0}")]
    Render(String),
}

/// Result of attempting to render LaTeX math
#[derive(Debug, Clone, PartialEq)]
pub enum MathResult {
    /// Successfully rendered MathML
    Success(String),
    /// Rendering failed - contains fallback HTML with source and error message
    Error { html: String, message: String },
}

impl MathResult {
    /// Markup to place on the output surface, whichever way rendering went.
    pub fn markup(&self) -> &str {
        match self {
            MathResult::Success(mathml) => mathml,
            MathResult::Error { html, .. } => html,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MathResult::Success(_))
    }
}

/// Run the parser over the whole input, failing on the first error.
pub fn parse(latex: &str) -> Result<(), MathError> {
    let storage = Storage::new();
    let errors: Vec<String> = Parser::new(latex, &storage)
        .filter_map(|e| e.err().map(|err| err.to_string()))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(MathError::Parse(errors.join("; ")))
    }
}

pub fn is_valid(latex: &str) -> bool {
    parse(latex).is_ok()
}

/// Render LaTeX math to MathML
///
/// # Arguments
/// * `latex` - The LaTeX source string (without delimiters like $ or $$)
/// * `display_mode` - If true, render as display math (block); if false, inline
pub fn render_math(latex: &str, display_mode: bool) -> MathResult {
    match try_render(latex, display_mode) {
        Ok(mathml) => MathResult::Success(mathml),
        Err(e) => {
            let message = match e {
                MathError::Parse(m) | MathError::Render(m) => m,
            };
            MathResult::Error {
                html: format_error_html(latex, &message, display_mode),
                message,
            }
        }
    }
}

/// Render as display math, the mode TeX blocks use.
pub fn render_block(latex: &str) -> MathResult {
    render_math(latex, true)
}

fn try_render(latex: &str, display_mode: bool) -> Result<String, MathError> {
    let storage = Storage::new();
    let events: Vec<_> = Parser::new(latex, &storage).collect();
    let errors: Vec<String> = events
        .iter()
        .filter_map(|e| e.as_ref().err().map(|err| err.to_string()))
        .collect();
    if !errors.is_empty() {
        return Err(MathError::Parse(errors.join("; ")));
    }

    let config = RenderConfig {
        display_mode: if display_mode {
            DisplayMode::Block
        } else {
            DisplayMode::Inline
        },
        ..Default::default()
    };
    let mut mathml = String::new();
    push_mathml(&mut mathml, events.into_iter(), config)
        .map_err(|e| MathError::Render(e.to_string()))?;
    Ok(mathml)
}

fn format_error_html(latex: &str, error: &str, display_mode: bool) -> String {
    let mode_class = if display_mode {
        "math-display"
    } else {
        "math-inline"
    };
    let escaped_latex = html_escape(latex);
    let escaped_error = html_escape(error);
    format!(
        r#"<span class="math math-error {mode_class}" title="{escaped_error}"><code>{escaped_latex}</code></span>"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_superscript() {
        assert_eq!(parse("x^2"), Ok(()));
        assert!(is_valid("a+b"));
    }

    #[test]
    fn test_rejects_unbalanced_group() {
        assert!(matches!(parse("x^{"), Err(MathError::Parse(_))));
        assert!(!is_valid(r"\frac{a"));
    }

    #[test]
    fn test_renders_display_math() {
        let result = render_block(r"\frac{a}{b}");
        assert!(result.is_success());
        assert!(result.markup().contains("<math"));
        assert!(result.markup().contains("<mfrac"));
    }

    #[test]
    fn test_renders_inline_math() {
        let result = render_math("x^2", false);
        assert!(matches!(result, MathResult::Success(_)));
        assert!(result.markup().contains("</math>"));
    }

    #[test]
    fn test_invalid_latex_renders_escaped_fallback() {
        let result = render_block(r"a<b \frac{");
        match result {
            MathResult::Error { html, message } => {
                assert!(html.contains("math-error"));
                assert!(html.contains("math-display"));
                assert!(html.contains("a&lt;b"));
                assert!(!message.is_empty());
            }
            MathResult::Success(_) => panic!("expected a parse error"),
        }
    }
}
