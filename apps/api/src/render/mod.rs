//! Resume rendering pipeline.
//!
//! Raw generated text flows one way: every renderer classifies lines through
//! [`classify`]; the PDF path additionally groups them with [`segment`] first.
//! Renderers are pure functions of `(text, options)` and share no state.

pub mod classify;
pub mod html;
pub mod pdf;
pub mod preview;
pub mod segment;

use thiserror::Error;

/// Watermark text stamped on restricted-tier exports.
pub const WATERMARK_TEXT: &str = "FREE TRIAL VERSION";

/// Attribution line placed in document footers.
pub const ATTRIBUTION: &str = "Generated with AI Resume Builder";

/// Failure inside a structured renderer. Export actions never surface it; the
/// orchestrator falls back to a plain rendering instead.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("PDF encoding error: {0}")]
    Encode(String),
}

/// Splits raw text into lines the way every renderer sees them.
///
/// Matches `str::split('\n')`: an empty string is one empty line, and a trailing
/// newline yields a trailing empty line. A `\r` before the newline is dropped.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// First non-blank line of the text, trimmed. Used to name exported documents.
pub fn first_content_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
