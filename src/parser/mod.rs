//! Document parsing: the parser boundary and its lopdf implementation.

mod backend;
mod pdf_parser;
mod tokens;

pub use backend::{
    decode_text_simple, BackendError, BackendFontInfo, BackendResult, ContentOp,
    DocumentBackend, DocumentParser, LopdfBackend, PageId, PdfValue,
};
pub use pdf_parser::LopdfParser;
pub use tokens::tokenize;
