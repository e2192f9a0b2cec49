//! Text tokens produced by a document backend.

use serde::{Deserialize, Serialize};

/// A fragment of text shown on a page, in backend order.
///
/// Only `text` takes part in extraction; position and font are carried
/// along for callers that want them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextToken {
    /// Decoded text content
    pub text: String,

    /// X coordinate of the text origin (points)
    pub x: f32,

    /// Y coordinate of the text origin (points)
    pub y: f32,

    /// Effective font size (points)
    pub font_size: f32,

    /// Base font name, or the resource name when unknown
    pub font_name: String,
}

impl TextToken {
    /// Create a token with position and font information.
    pub fn new(
        text: impl Into<String>,
        x: f32,
        y: f32,
        font_size: f32,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            font_name: font_name.into(),
        }
    }

    /// Create a token carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, 0.0, 0.0, 0.0, String::new())
    }

    /// Check if the token has no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Join token texts with a single space, keeping order.
///
/// Empty tokens are not special-cased: each still contributes a separator.
pub fn join_tokens(tokens: &[TextToken]) -> String {
    tokens
        .iter()
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
