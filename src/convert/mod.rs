//! End-to-end conversion: read, extract, render, write.
//!
//! # Example
//!
//! ```no_run
//! use pagetext::convert::{convert_file, ConvertOptions};
//! use pagetext::progress::LogProgress;
//!
//! let result = convert_file(
//!     "report.pdf",
//!     "docs/pdf_content.txt",
//!     &ConvertOptions::default(),
//!     LogProgress,
//! )?;
//! println!("{} pages", result.transcript.page_count());
//! # Ok::<(), pagetext::Error>(())
//! ```

mod io;

pub use io::{read_source, write_output};

use std::path::Path;

use crate::error::Result;
use crate::model::Transcript;
use crate::parser::DocumentParser;
use crate::pipeline::Extractor;
use crate::progress::ProgressSink;
use crate::render::{to_json, to_text, JsonFormat, RenderOptions};

/// Options for conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Text rendering options
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,

    /// JSON layout, used when `output_format` is [`OutputFormat::Json`]
    pub json_format: JsonFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Page-delimited plain text
    #[default]
    Text,

    /// JSON structure
    Json,
}

impl OutputFormat {
    /// MIME type of the rendered output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
        }
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// The extracted transcript
    pub transcript: Transcript,

    /// Rendered output, as written
    pub content: String,

    /// MIME type of the output
    pub mime_type: &'static str,
}

/// Render a transcript according to `options`.
pub fn render(transcript: &Transcript, options: &ConvertOptions) -> Result<String> {
    match options.output_format {
        OutputFormat::Text => Ok(to_text(transcript, &options.render)),
        OutputFormat::Json => to_json(transcript, options.json_format),
    }
}

/// Convert `input` to `output` with the lopdf-backed extractor.
///
/// The output file is written only after every page has been extracted and
/// rendered; on any failure it is neither created nor modified.
pub fn convert_file<I, O, P>(
    input: I,
    output: O,
    options: &ConvertOptions,
    progress: P,
) -> Result<ConvertResult>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
    P: ProgressSink,
{
    convert_with(&Extractor::new(), input, output, options, progress)
}

/// Convert `input` to `output` with a given extractor.
pub fn convert_with<R, I, O, P>(
    extractor: &Extractor<R>,
    input: I,
    output: O,
    options: &ConvertOptions,
    progress: P,
) -> Result<ConvertResult>
where
    R: DocumentParser,
    I: AsRef<Path>,
    O: AsRef<Path>,
    P: ProgressSink,
{
    let transcript = extractor.extract_file(input, progress)?;
    let content = render(&transcript, options)?;
    write_output(output, &content)?;

    Ok(ConvertResult {
        transcript,
        content,
        mime_type: options.output_format.mime_type(),
    })
}
