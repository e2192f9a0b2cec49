//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// How a test page supplies its content.
pub enum PageSpec<'a> {
    /// A content stream with the given operators
    Content(&'a str),
    /// A page dictionary without `/Contents`
    NoContents,
    /// `/Contents` pointing at an object that is not a stream
    BrokenContents,
    /// `/Contents` pointing at an indirect array of streams
    ContentArrayRef(&'a [&'a str]),
    /// A `/FlateDecode` compressed content stream
    Compressed(&'a str),
    /// Page content that only draws Form XObject `/Fm1`, whose own stream
    /// holds the given operators
    Form(&'a str),
}

/// Build a PDF whose pages are described by `pages`.
pub fn build_pdf(pages: &[PageSpec<'_>]) -> Vec<u8> {
    save(build_document(pages))
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn build_document(pages: &[PageSpec<'_>]) -> Document {
    let mut doc = Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for page in pages {
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        };

        match page {
            PageSpec::Content(ops) => {
                let stream = Stream::new(dictionary! {}, ops.as_bytes().to_vec());
                let content_id = doc.add_object(stream);
                page_dict.set("Contents", Object::Reference(content_id));
            }
            PageSpec::NoContents => {}
            PageSpec::BrokenContents => {
                let bogus_id = doc.add_object(Object::Integer(42));
                page_dict.set("Contents", Object::Reference(bogus_id));
            }
            PageSpec::ContentArrayRef(parts) => {
                let streams: Vec<Object> = parts
                    .iter()
                    .map(|ops| {
                        let stream = Stream::new(dictionary! {}, ops.as_bytes().to_vec());
                        Object::Reference(doc.add_object(stream))
                    })
                    .collect();
                let array_id = doc.add_object(Object::Array(streams));
                page_dict.set("Contents", Object::Reference(array_id));
            }
            PageSpec::Compressed(ops) => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(ops.as_bytes()).unwrap();
                let stream = Stream::new(
                    dictionary! { "Filter" => "FlateDecode" },
                    encoder.finish().unwrap(),
                );
                let content_id = doc.add_object(stream);
                page_dict.set("Contents", Object::Reference(content_id));
            }
            PageSpec::Form(ops) => {
                let form = Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Form",
                        "BBox" => media_box.clone(),
                        "Resources" => dictionary! {
                            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                        },
                    },
                    ops.as_bytes().to_vec(),
                );
                let form_id = doc.add_object(form);
                let content = Stream::new(dictionary! {}, b"q /Fm1 Do Q".to_vec());
                let content_id = doc.add_object(content);
                page_dict.set("Contents", Object::Reference(content_id));
                page_dict.set(
                    "Resources",
                    dictionary! {
                        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                        "XObject" => dictionary! { "Fm1" => Object::Reference(form_id) },
                    },
                );
            }
        }

        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(pages.len() as i64),
    });

    for &pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc
}

/// Build a PDF with one `Tj` line of text per page.
pub fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    save(text_document(texts))
}

/// Build an RC4 40-bit (V1/R2) encrypted PDF with one `Tj` line per page.
pub fn encrypted_pdf_with_pages(user_password: &[u8], texts: &[&str]) -> Vec<u8> {
    let mut doc = text_document(texts);
    encrypt(&mut doc, user_password);
    save(doc)
}

fn text_document(texts: &[&str]) -> Document {
    let contents: Vec<String> = texts
        .iter()
        .map(|text| format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET"))
        .collect();
    let specs: Vec<PageSpec<'_>> = contents
        .iter()
        .map(|c| PageSpec::Content(c.as_str()))
        .collect();
    build_document(&specs)
}

/// Standard security handler password padding.
const PAD_BYTES: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01,
    0x08, 0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53,
    0x69, 0x7A,
];

fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s: Vec<u8> = (0..=255).collect();
    let mut j: usize = 0;
    for i in 0..256 {
        j = (j + s[i] as usize + key[i % key.len()] as usize) & 0xFF;
        s.swap(i, j);
    }

    let mut out = Vec::with_capacity(data.len());
    let mut i: usize = 0;
    j = 0;
    for &byte in data {
        i = (i + 1) & 0xFF;
        j = (j + s[i] as usize) & 0xFF;
        s.swap(i, j);
        out.push(byte ^ s[(s[i] as usize + s[j] as usize) & 0xFF]);
    }
    out
}

/// Encrypt every stream and string in place and add `/Encrypt` and `/ID`.
///
/// Owner and user passwords are the same.
fn encrypt(doc: &mut Document, user_password: &[u8]) {
    let file_id = b"pagetextfileid01";
    let permissions: i32 = -4;

    let pw_len = user_password.len().min(32);
    let mut padded_pw = user_password[..pw_len].to_vec();
    padded_pw.extend_from_slice(&PAD_BYTES[..32 - pw_len]);

    let o_digest = md5::compute(&padded_pw);
    let o_value = rc4(&o_digest[..5], &padded_pw);

    let mut key_input = padded_pw.clone();
    key_input.extend_from_slice(&o_value);
    key_input.extend_from_slice(&(permissions as u32).to_le_bytes());
    key_input.extend_from_slice(file_id);
    let key = md5::compute(&key_input)[..5].to_vec();

    let u_value = rc4(&key, &PAD_BYTES);

    for (&(num, generation), obj) in doc.objects.iter_mut() {
        let mut obj_key_input = key.clone();
        obj_key_input.extend_from_slice(&num.to_le_bytes()[..3]);
        obj_key_input.extend_from_slice(&generation.to_le_bytes());
        let obj_digest = md5::compute(&obj_key_input);
        let obj_key = &obj_digest[..key.len() + 5];

        match obj {
            Object::Stream(stream) => {
                let encrypted = rc4(obj_key, &stream.content);
                stream.set_content(encrypted);
            }
            Object::String(content, _) => *content = rc4(obj_key, content),
            _ => {}
        }
    }

    let encrypt_id: ObjectId = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1_i64,
        "R" => 2_i64,
        "Length" => 40_i64,
        "O" => Object::String(o_value, StringFormat::Literal),
        "U" => Object::String(u_value, StringFormat::Literal),
        "P" => permissions as i64,
    });
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(file_id.to_vec(), StringFormat::Literal),
            Object::String(file_id.to_vec(), StringFormat::Literal),
        ]),
    );
}

/// Write bytes to a temporary `.pdf` file.
pub fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}
