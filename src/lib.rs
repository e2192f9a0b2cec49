//! # pagetext
//!
//! Page-by-page PDF text extraction.
//!
//! pagetext reads a PDF, pulls the text tokens of every page in order, joins
//! each page's tokens with single spaces and produces a [`Transcript`]: one
//! [`PageSection`] per page, numbered `1..=page_count`. The transcript renders
//! to page-delimited text (or JSON) and is written in one atomic step.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagetext::{render, Extractor, RenderOptions};
//! use pagetext::progress::NoProgress;
//!
//! fn main() -> pagetext::Result<()> {
//!     let transcript = Extractor::new().extract_file("document.pdf", NoProgress)?;
//!     print!("{}", render::to_text(&transcript, &RenderOptions::default()));
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - Pages are read strictly in order; page N+1 is never requested before
//!   page N has been appended and reported.
//! - A run either yields every page or fails; there is no partial transcript.
//! - The document parser is injected ([`DocumentParser`]), so fake documents
//!   can stand in for PDFs.

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod render;

// Re-export commonly used types
pub use convert::{convert_file, ConvertOptions, ConvertResult, OutputFormat};
pub use detect::{detect_format_from_bytes, is_pdf_bytes, PdfFormat};
pub use error::{Error, ErrorKind, Result};
pub use model::{PageSection, TextToken, Transcript};
pub use parser::{DocumentBackend, DocumentParser, LopdfParser};
pub use pipeline::{extract, extract_bytes, Extractor};
pub use render::{JsonFormat, RenderOptions};

use std::path::Path;

/// Extract a PDF file into a transcript.
///
/// # Example
///
/// ```no_run
/// let transcript = pagetext::extract_file("document.pdf").unwrap();
/// println!("Pages: {}", transcript.page_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Transcript> {
    Extractor::new().extract_file(path, progress::NoProgress)
}

/// Extract a PDF held in memory into a transcript.
pub fn extract_pdf_bytes(data: &[u8]) -> Result<Transcript> {
    Extractor::new().extract_bytes(data, progress::NoProgress)
}

/// Extract a PDF file and render it as page-delimited text.
///
/// # Example
///
/// ```no_run
/// let text = pagetext::to_text("document.pdf").unwrap();
/// std::fs::write("output.txt", text).unwrap();
/// ```
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let transcript = extract_file(path)?;
    Ok(render::to_text(&transcript, &RenderOptions::default()))
}

/// Extract a PDF file and render it as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let transcript = extract_file(path)?;
    render::to_json(&transcript, format)
}
