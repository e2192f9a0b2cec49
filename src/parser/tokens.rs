//! Content-stream tokenization.
//!
//! Walks the decoded operations of a page and emits one [`TextToken`] per
//! text-showing operator (`Tj`, `TJ`, `'`, `"`), in stream order. Nothing is
//! reordered, merged across operators or dropped: an operator that shows an
//! empty string still yields a token.
//!
//! `Do` hands the XObject name to a caller-supplied resolver, whose tokens
//! (text inside a Form XObject) are spliced in at that point of the stream.

use std::collections::HashMap;

use crate::model::TextToken;

use super::backend::{get_number_from_value, BackendFontInfo, BackendResult, ContentOp, PdfValue};

/// `TJ` adjustments (thousandths of text space) beyond this become a space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Default font size before any `Tf`.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Turn a page's content operations into text tokens.
///
/// `decode` maps (font resource name, string bytes) to text; it is where the
/// backend applies the font's encoding. `xobject` resolves the operand of a
/// `Do` operator to the tokens it draws; its errors abort tokenization.
pub fn tokenize<F, X>(
    ops: &[ContentOp],
    fonts: &[BackendFontInfo],
    decode: F,
    mut xobject: X,
) -> BackendResult<Vec<TextToken>>
where
    F: Fn(&[u8], &[u8]) -> String,
    X: FnMut(&[u8]) -> BackendResult<Vec<TextToken>>,
{
    let base_fonts: HashMap<&[u8], &str> = fonts
        .iter()
        .map(|f| (f.name.as_slice(), f.base_font.as_str()))
        .collect();

    let mut tokens = Vec::new();
    let mut state = TextState::default();
    let mut in_text_block = false;

    for op in ops {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                state.matrix = TextMatrix::default();
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    state.font_resource = name.clone();
                    state.font_name = base_fonts
                        .get(name.as_slice())
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                }
                if let Some(size) = op.operands.get(1).and_then(get_number_from_value) {
                    state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(get_number_from_value) {
                    state.leading = leading;
                }
            }
            "Td" | "TD" => {
                let tx = op.operands.first().and_then(get_number_from_value);
                let ty = op.operands.get(1).and_then(get_number_from_value);
                if let (Some(tx), Some(ty)) = (tx, ty) {
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                let values: Vec<f32> = op
                    .operands
                    .iter()
                    .filter_map(get_number_from_value)
                    .collect();
                if values.len() >= 6 {
                    state.matrix.set(
                        values[0], values[1], values[2], values[3], values[4], values[5],
                    );
                }
            }
            "T*" => {
                state.matrix.translate(0.0, -state.leading);
            }
            "Tj" if in_text_block => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = decode(&state.font_resource, bytes);
                    tokens.push(state.token(text));
                }
            }
            "TJ" if in_text_block => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = combine_tj(items, |bytes| decode(&state.font_resource, bytes));
                    tokens.push(state.token(text));
                }
            }
            "'" | "\"" => {
                state.matrix.translate(0.0, -state.leading);
                if in_text_block {
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(text_idx) {
                        let text = decode(&state.font_resource, bytes);
                        tokens.push(state.token(text));
                    }
                }
            }
            "Do" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    tokens.extend(xobject(name)?);
                }
            }
            _ => {}
        }
    }

    Ok(tokens)
}

/// Concatenate the strings of a `TJ` array.
///
/// Numbers are kerning adjustments; a large negative one moves the pen far
/// enough right to read as a word break, so a space is inserted unless the
/// text already ends in whitespace or in a script written without spaces.
fn combine_tj<D>(items: &[PdfValue], decode: D) -> String
where
    D: Fn(&[u8]) -> String,
{
    let mut combined = String::new();

    for item in items {
        match item {
            PdfValue::Str(bytes) => combined.push_str(&decode(bytes)),
            PdfValue::Integer(_) | PdfValue::Real(_) => {
                let adjustment = -get_number_from_value(item).unwrap_or(0.0);
                if adjustment > TJ_SPACE_THRESHOLD {
                    if let Some(last) = combined.chars().last() {
                        if !last.is_whitespace() && !is_spaceless_script_char(last) {
                            combined.push(' ');
                        }
                    }
                }
            }
            _ => {}
        }
    }

    combined
}

/// Check if a character belongs to a script written without word spaces.
///
/// Chinese and Japanese qualify; Korean (Hangul) uses spaces and does not.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions A-F
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        // Hiragana, Katakana
        || (0x3040..=0x30FF).contains(&code)
        // CJK Symbols and Punctuation
        || (0x3000..=0x303F).contains(&code)
        // Fullwidth forms
        || (0xFF00..=0xFFEF).contains(&code)
}

#[derive(Debug)]
struct TextState {
    matrix: TextMatrix,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: DEFAULT_FONT_SIZE,
        }
    }
}

impl TextState {
    fn token(&self, text: String) -> TextToken {
        let (x, y) = self.matrix.position();
        TextToken::new(
            text,
            x,
            y,
            self.font_size * self.matrix.scale(),
            self.font_name.clone(),
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}
