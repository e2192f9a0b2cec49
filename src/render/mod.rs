//! Transcript rendering.

mod json;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_MARKER_TEMPLATE, PAGE_PLACEHOLDER};
pub use text::to_text;
