//! PDF document parser using lopdf.

use lopdf::Document as LopdfDocument;

use crate::detect::detect_format_from_bytes;

use super::backend::{BackendError, BackendResult, DocumentParser, LopdfBackend};

/// Opens PDF bytes with lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfParser;

impl LopdfParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for LopdfParser {
    type Document = LopdfBackend;

    fn open(&self, data: &[u8]) -> BackendResult<LopdfBackend> {
        let format = detect_format_from_bytes(data)?;
        log::debug!("Detected {} ({} bytes)", format, data.len());

        let mut doc = LopdfDocument::load_mem(data)?;

        // Files encrypted only to carry permissions open with the empty user
        // password; anything else needs a password we do not have.
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|e| {
                log::debug!("Empty user password rejected: {}", e);
                BackendError::Encrypted
            })?;
            log::debug!("Decrypted with the empty user password");
        }

        Ok(LopdfBackend::new(doc))
    }
}
