//! The page-by-page extraction loop.
//!
//! Pages are read strictly in order on the calling thread. Each page's
//! tokens are joined with single spaces, appended to the transcript and
//! reported before the next page is requested. The first failure aborts the
//! run; no partial transcript is ever returned.

use std::path::Path;

use crate::convert::read_source;
use crate::error::{Error, Result};
use crate::model::{join_tokens, Transcript};
use crate::parser::{DocumentBackend, DocumentParser, LopdfParser};
use crate::progress::ProgressSink;

/// Extract every page of an opened document.
///
/// # Errors
///
/// [`Error::PageReadFailed`] for the first page that cannot be resolved or
/// tokenized.
pub fn extract<D, P>(doc: &D, mut progress: P) -> Result<Transcript>
where
    D: DocumentBackend + ?Sized,
    P: ProgressSink,
{
    let page_count = doc.page_count();
    progress.on_start(page_count);

    let mut transcript = Transcript::with_capacity(page_count);

    for number in 1..=page_count {
        let page = doc
            .page(number)
            .map_err(|e| Error::page_read(number, e))?;
        let tokens = doc
            .page_tokens(page)
            .map_err(|e| Error::page_read(number, e))?;

        log::debug!("Page {}: {} tokens", number, tokens.len());

        let section = transcript.push(join_tokens(&tokens));
        progress.on_page(section);
    }

    progress.on_finish(&transcript);
    Ok(transcript)
}

/// Open `data` with `parser` and extract every page.
///
/// The document handle lives only for the duration of this call and is
/// dropped on every exit path.
///
/// # Errors
///
/// [`Error::OpenFailed`] if the parser rejects the bytes, otherwise as
/// [`extract`].
pub fn extract_bytes<R, P>(parser: &R, data: &[u8], progress: P) -> Result<Transcript>
where
    R: DocumentParser + ?Sized,
    P: ProgressSink,
{
    let doc = parser
        .open(data)
        .map_err(|e| Error::OpenFailed(e.to_string()))?;
    extract(&doc, progress)
}

/// Extraction entry point with an injectable parser.
///
/// # Example
///
/// ```no_run
/// use pagetext::{Extractor, progress::NoProgress};
///
/// let transcript = Extractor::new().extract_file("document.pdf", NoProgress)?;
/// println!("{} pages", transcript.page_count());
/// # Ok::<(), pagetext::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor<R = LopdfParser> {
    parser: R,
}

impl Extractor {
    /// Create an extractor backed by lopdf.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: DocumentParser> Extractor<R> {
    /// Create an extractor with a custom parser.
    pub fn with_parser(parser: R) -> Self {
        Self { parser }
    }

    /// The parser in use.
    pub fn parser(&self) -> &R {
        &self.parser
    }

    /// Extract a document held in memory.
    pub fn extract_bytes<P: ProgressSink>(&self, data: &[u8], progress: P) -> Result<Transcript> {
        extract_bytes(&self.parser, data, progress)
    }

    /// Read a whole file and extract it.
    pub fn extract_file<Q, P>(&self, path: Q, progress: P) -> Result<Transcript>
    where
        Q: AsRef<Path>,
        P: ProgressSink,
    {
        let data = read_source(path)?;
        self.extract_bytes(&data, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::TextToken;
    use crate::parser::{BackendError, BackendResult, PageId};
    use crate::progress::{FnProgress, NoProgress};

    struct Pages(Vec<Vec<&'static str>>);

    impl DocumentBackend for Pages {
        fn page_count(&self) -> u32 {
            self.0.len() as u32
        }

        fn page(&self, number: u32) -> BackendResult<PageId> {
            Ok((number, 0))
        }

        fn page_tokens(&self, page: PageId) -> BackendResult<Vec<TextToken>> {
            let texts = &self.0[(page.0 - 1) as usize];
            if texts.first() == Some(&"<fail>") {
                return Err(BackendError::Content("unreadable".to_string()));
            }
            Ok(texts.iter().map(|t| TextToken::text(*t)).collect())
        }
    }

    #[test]
    fn test_extract_joins_tokens_per_page() {
        let doc = Pages(vec![vec!["Hello", "World"], vec![], vec!["x"]]);
        let transcript = extract(&doc, NoProgress).unwrap();

        let pages: Vec<_> = transcript.iter().map(|s| (s.number, s.text.as_str())).collect();
        assert_eq!(pages, vec![(1, "Hello World"), (2, ""), (3, "x")]);
    }

    #[test]
    fn test_extract_zero_pages() {
        let transcript = extract(&Pages(vec![]), NoProgress).unwrap();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_page_failure_aborts() {
        let doc = Pages(vec![vec!["a"], vec!["<fail>"], vec!["c"]]);
        let mut seen = Vec::new();
        let err = extract(&doc, FnProgress(|s: &crate::PageSection| seen.push(s.number)))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PageRead);
        assert_eq!(err.page(), Some(2));
        assert!(err.to_string().contains("unreadable"));
        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn test_open_failure() {
        let err = Extractor::new()
            .extract_bytes(b"definitely not a pdf", NoProgress)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Open);
        assert_eq!(err.to_string(), "Failed to open document: not a PDF file");
    }
}
