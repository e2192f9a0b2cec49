//! Progress reporting for extraction runs.
//!
//! The pipeline calls a [`ProgressSink`] once before the first page, once per
//! page right after the page is appended, and once after the last page. All
//! methods default to doing nothing.
//!
//! # Example
//!
//! ```
//! use pagetext::progress::ProgressSink;
//! use pagetext::PageSection;
//!
//! struct CharCounter(usize);
//!
//! impl ProgressSink for CharCounter {
//!     fn on_page(&mut self, section: &PageSection) {
//!         self.0 += section.text.chars().count();
//!     }
//! }
//! ```

use crate::model::{PageSection, Transcript};

/// Receives progress notifications from the extraction pipeline.
pub trait ProgressSink {
    /// Called once the document is open, before any page is read.
    fn on_start(&mut self, page_count: u32) {
        let _ = page_count;
    }

    /// Called after a page has been appended, before the next page is read.
    fn on_page(&mut self, section: &PageSection) {
        let _ = section;
    }

    /// Called after every page has been read.
    fn on_finish(&mut self, transcript: &Transcript) {
        let _ = transcript;
    }
}

/// Ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_start(&mut self, page_count: u32) {
        log::info!("Document has {} pages", page_count);
    }

    fn on_page(&mut self, section: &PageSection) {
        log::info!(
            "Page {}: {} characters",
            section.number,
            section.text.chars().count()
        );
    }

    fn on_finish(&mut self, transcript: &Transcript) {
        log::info!("Extracted {} pages", transcript.page_count());
    }
}

/// Adapts a closure to per-page notifications.
pub struct FnProgress<F>(pub F);

impl<F> ProgressSink for FnProgress<F>
where
    F: FnMut(&PageSection),
{
    fn on_page(&mut self, section: &PageSection) {
        (self.0)(section)
    }
}

impl<P: ProgressSink + ?Sized> ProgressSink for &mut P {
    fn on_start(&mut self, page_count: u32) {
        (**self).on_start(page_count)
    }

    fn on_page(&mut self, section: &PageSection) {
        (**self).on_page(section)
    }

    fn on_finish(&mut self, transcript: &Transcript) {
        (**self).on_finish(transcript)
    }
}
