//! Document backend abstraction layer.
//!
//! The extraction pipeline only ever talks to [`DocumentParser`] and
//! [`DocumentBackend`]; the concrete PDF library (lopdf) stays behind
//! [`LopdfBackend`].

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object, Stream};
use thiserror::Error;

use crate::model::TextToken;

use super::tokens::tokenize;

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Errors reported by a backend.
///
/// The pipeline turns these into [`crate::Error::OpenFailed`] or
/// [`crate::Error::PageReadFailed`] depending on where they occur.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The input does not start with a PDF header.
    #[error("not a PDF file")]
    NotPdf,

    /// The PDF header names a version we do not understand.
    #[error("unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The document is encrypted.
    #[error("document is encrypted")]
    Encrypted,

    /// The document structure could not be parsed.
    #[error("{0}")]
    Parse(String),

    /// The requested page does not exist.
    #[error("page {0} does not exist")]
    PageNotFound(u32),

    /// A page's content stream could not be read or decoded.
    #[error("invalid content stream: {0}")]
    Content(String),
}

impl From<lopdf::Error> for BackendError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::Decryption(_) => BackendError::Encrypted,
            _ => BackendError::Parse(err.to_string()),
        }
    }
}

/// Backend result alias.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Font information returned by the backend.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary).
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }
}

/// An opened document.
///
/// Pages are addressed by their 1-based number; [`DocumentBackend::page`]
/// resolves a number to a [`PageId`], and [`DocumentBackend::page_tokens`]
/// yields that page's text tokens in content-stream order.
pub trait DocumentBackend {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Resolve a 1-based page number.
    fn page(&self, number: u32) -> BackendResult<PageId>;

    /// Text tokens of a page, in the order the page shows them.
    fn page_tokens(&self, page: PageId) -> BackendResult<Vec<TextToken>>;
}

/// Opens raw bytes as a [`DocumentBackend`].
pub trait DocumentParser {
    /// The document handle produced by [`DocumentParser::open`].
    type Document: DocumentBackend;

    /// Parse the bytes of a whole file.
    fn open(&self, data: &[u8]) -> BackendResult<Self::Document>;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Helper: extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// LopdfBackend: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Form XObjects nested deeper than this are skipped.
const MAX_FORM_DEPTH: usize = 8;

/// Bound on `/Parent` hops when looking for inherited page resources.
const MAX_TREE_DEPTH: usize = 32;

/// Concrete [`DocumentBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, PageId>,
}

/// Resources in effect while interpreting one content stream.
#[derive(Clone)]
struct Scope<'a> {
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    xobjects: Option<&'a Dictionary>,
}

impl LopdfBackend {
    /// Wrap a loaded `lopdf::Document`.
    pub fn new(doc: LopdfDocument) -> Self {
        let pages = doc.get_pages();
        Self { doc, pages }
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Fonts of a page, keyed by resource name.
    pub fn page_fonts(&self, page: PageId) -> BackendResult<Vec<BackendFontInfo>> {
        let lopdf_fonts = self.doc.get_page_fonts(page)?;
        Ok(font_infos(&lopdf_fonts))
    }

    /// The raw (decompressed) content stream bytes for a page.
    ///
    /// Returns `None` for a page without a `/Contents` entry.
    fn page_content(&self, page: PageId) -> BackendResult<Option<Vec<u8>>> {
        let page_dict = self
            .doc
            .get_dictionary(page)
            .map_err(|e| BackendError::Content(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(None),
        };

        match contents {
            Object::Reference(id) => match self.doc.get_object(*id) {
                Ok(Object::Stream(s)) => Ok(Some(stream_bytes(s)?)),
                Ok(Object::Array(arr)) => Ok(Some(self.concat_streams(arr)?)),
                Ok(_) => Err(BackendError::Content(format!(
                    "object {} {} R is not a stream",
                    id.0, id.1
                ))),
                Err(e) => Err(BackendError::Content(e.to_string())),
            },
            Object::Array(arr) => Ok(Some(self.concat_streams(arr)?)),
            Object::Stream(s) => Ok(Some(stream_bytes(s)?)),
            _ => Err(BackendError::Content(
                "/Contents is not a stream".to_string(),
            )),
        }
    }

    /// Join the streams of a `/Contents` array, separated by whitespace.
    fn concat_streams(&self, streams: &[Object]) -> BackendResult<Vec<u8>> {
        let mut content = Vec::new();
        for obj in streams {
            match obj {
                Object::Reference(id) => content.extend_from_slice(&self.stream_content(*id)?),
                Object::Stream(s) => content.extend_from_slice(&stream_bytes(s)?),
                _ => {
                    return Err(BackendError::Content(
                        "/Contents array entry is not a stream".to_string(),
                    ))
                }
            }
            content.push(b' ');
        }
        Ok(content)
    }

    fn stream_content(&self, id: lopdf::ObjectId) -> BackendResult<Vec<u8>> {
        match self.doc.get_object(id) {
            Ok(Object::Stream(s)) => stream_bytes(s),
            Ok(_) => Err(BackendError::Content(format!(
                "object {} {} R is not a stream",
                id.0, id.1
            ))),
            Err(e) => Err(BackendError::Content(e.to_string())),
        }
    }

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> BackendResult<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)
            .map_err(|e| BackendError::Content(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    fn resolve_stream<'a>(&'a self, obj: &'a Object) -> Option<&'a Stream> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok()?.as_stream().ok(),
            Object::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    /// The `/Resources` of a page, inherited from the page tree if needed.
    fn page_resources(&self, page: PageId) -> Option<&Dictionary> {
        let mut dict = self.doc.get_dictionary(page).ok()?;
        for _ in 0..MAX_TREE_DEPTH {
            let resources = dict.get(b"Resources").ok();
            if let Some(resources) = resources.and_then(|o| self.resolve_dict(o)) {
                return Some(resources);
            }
            let parent = dict.get(b"Parent").and_then(|o| o.as_reference()).ok()?;
            dict = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn page_scope(&self, page: PageId) -> Scope<'_> {
        // Fonts only steer decoding; a broken font dictionary falls back to
        // simple decoding instead of failing the page.
        let fonts = match self.doc.get_page_fonts(page) {
            Ok(fonts) => fonts,
            Err(e) => {
                log::warn!("Failed to read fonts of page object {:?}: {}", page, e);
                BTreeMap::new()
            }
        };
        let xobjects = self
            .page_resources(page)
            .and_then(|res| res.get(b"XObject").ok())
            .and_then(|o| self.resolve_dict(o));

        Scope { fonts, xobjects }
    }

    fn resources_scope<'a>(&'a self, resources: &'a Dictionary) -> Scope<'a> {
        let fonts: BTreeMap<Vec<u8>, &Dictionary> = resources
            .get(b"Font")
            .ok()
            .and_then(|o| self.resolve_dict(o))
            .map(|fonts| {
                fonts
                    .iter()
                    .filter_map(|(name, font)| Some((name.clone(), self.resolve_dict(font)?)))
                    .collect()
            })
            .unwrap_or_default();
        let xobjects = resources
            .get(b"XObject")
            .ok()
            .and_then(|o| self.resolve_dict(o));

        Scope { fonts, xobjects }
    }

    fn decode_text(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font: &[u8],
        bytes: &[u8],
    ) -> String {
        fonts
            .get(font)
            .and_then(|font_dict| font_dict.get_font_encoding(&self.doc).ok())
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }

    fn scope_tokens<'a>(
        &'a self,
        ops: &[ContentOp],
        scope: &Scope<'a>,
        depth: usize,
    ) -> BackendResult<Vec<TextToken>> {
        let fonts = font_infos(&scope.fonts);
        tokenize(
            ops,
            &fonts,
            |font, bytes| self.decode_text(&scope.fonts, font, bytes),
            |name| self.xobject_tokens(name, scope, depth),
        )
    }

    /// Tokens drawn by `Do name`: the text of a Form XObject, nothing for
    /// images or unknown names.
    ///
    /// Token positions stay in the form's own coordinate space.
    fn xobject_tokens<'a>(
        &'a self,
        name: &[u8],
        parent: &Scope<'a>,
        depth: usize,
    ) -> BackendResult<Vec<TextToken>> {
        let stream = match parent
            .xobjects
            .and_then(|xobjects| xobjects.get(name).ok())
            .and_then(|o| self.resolve_stream(o))
        {
            Some(stream) => stream,
            None => {
                log::debug!("XObject /{} not found", String::from_utf8_lossy(name));
                return Ok(Vec::new());
            }
        };

        let is_form = stream
            .dict
            .get(b"Subtype")
            .and_then(|o| o.as_name())
            .map(|subtype| subtype == b"Form")
            .unwrap_or(false);
        if !is_form {
            return Ok(Vec::new());
        }

        if depth >= MAX_FORM_DEPTH {
            log::warn!(
                "Form XObject /{} nested deeper than {} levels, skipped",
                String::from_utf8_lossy(name),
                MAX_FORM_DEPTH
            );
            return Ok(Vec::new());
        }

        let ops = self.decode_content(&stream_bytes(stream)?)?;

        // A form without its own resources uses those of the stream that draws it.
        let scope = match stream
            .dict
            .get(b"Resources")
            .ok()
            .and_then(|o| self.resolve_dict(o))
        {
            Some(resources) => self.resources_scope(resources),
            None => parent.clone(),
        };

        self.scope_tokens(&ops, &scope, depth + 1)
    }
}

impl DocumentBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> BackendResult<PageId> {
        self.pages
            .get(&number)
            .copied()
            .ok_or(BackendError::PageNotFound(number))
    }

    fn page_tokens(&self, page: PageId) -> BackendResult<Vec<TextToken>> {
        let content = match self.page_content(page)? {
            Some(content) => content,
            None => return Ok(Vec::new()),
        };
        let ops = self.decode_content(&content)?;
        let scope = self.page_scope(page);

        self.scope_tokens(&ops, &scope, 0)
    }
}

fn font_infos(lopdf_fonts: &BTreeMap<Vec<u8>, &Dictionary>) -> Vec<BackendFontInfo> {
    lopdf_fonts
        .iter()
        .map(|(name, font_dict)| BackendFontInfo {
            name: name.clone(),
            base_font: font_dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect()
}

/// Stream bytes, decompressed when the stream declares a filter.
fn stream_bytes(stream: &Stream) -> BackendResult<Vec<u8>> {
    if stream.dict.has(b"Filter") {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Content(e.to_string()))
    } else {
        Ok(stream.content.clone())
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        // UTF-16BE BOM + "Hi"
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_get_number_from_value() {
        assert_eq!(get_number_from_value(&PdfValue::Integer(42)), Some(42.0));
        assert_eq!(get_number_from_value(&PdfValue::Real(1.5)), Some(1.5));
        assert_eq!(get_number_from_value(&PdfValue::Other), None);
    }

    #[test]
    fn test_convert_object() {
        let obj = Object::Array(vec![
            Object::string_literal("Hi"),
            Object::Integer(-250),
            Object::Boolean(true),
        ]);
        assert_eq!(
            convert_object(&obj),
            PdfValue::Array(vec![
                PdfValue::Str(b"Hi".to_vec()),
                PdfValue::Integer(-250),
                PdfValue::Other,
            ])
        );
    }

    #[test]
    fn test_backend_error_from_lopdf() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err: BackendError = lopdf::Error::IO(io_err).into();
        assert!(matches!(err, BackendError::Parse(_)));
    }
}
