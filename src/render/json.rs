//! JSON rendering of transcripts.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{PageSection, Transcript};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct JsonTranscript<'a> {
    page_count: u32,
    pages: &'a [PageSection],
}

/// Convert a transcript to JSON.
pub fn to_json(transcript: &Transcript, format: JsonFormat) -> Result<String> {
    let view = JsonTranscript {
        page_count: transcript.page_count(),
        pages: transcript.pages(),
    };

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&view),
        JsonFormat::Compact => serde_json::to_string(&view),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
