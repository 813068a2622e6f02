//! Per-page text extraction from lopdf content streams
//!
//! Walks the decoded content stream of a single page and collects the
//! operands of the text-showing operators. Only extractable text is
//! recovered (native text objects or a prior OCR layer embedded in the
//! file); image-only pages yield an empty string.

use crate::error::AnalysisError;
use flate2::read::ZlibDecoder;
use lopdf::{Document, Object, ObjectId, Stream};
use std::io::Read;

/// Extract the plain text of a single page
///
/// `page` is the 1-based page number as reported by `Document::get_pages`,
/// used only for error context.
pub fn extract_page_text(
    doc: &Document,
    page: u32,
    page_id: ObjectId,
) -> Result<String, AnalysisError> {
    let content = collect_page_content(doc, page, page_id)?;

    let operations = lopdf::content::Content::decode(&content)
        .map_err(|e| extraction_failure(page, format!("content operations decode failed: {}", e)))?;

    let mut text = String::new();
    for op in operations.operations {
        match op.operator.as_str() {
            // Text showing operators
            "Tj" | "TJ" | "'" | "\"" => {
                for operand in &op.operands {
                    if let Some(s) = decode_text_operand(operand) {
                        text.push_str(&s);
                    }
                }
            }
            // Text positioning that implies a line break
            "Td" | "TD" | "T*" => {
                if !text.is_empty() && !text.ends_with(char::is_whitespace) {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    Ok(text)
}

/// Collect and decode the page's content stream(s)
///
/// `Document::get_page_content` silently skips streams it cannot read
/// and falls back to the raw bytes when decompression fails, which makes
/// a broken page indistinguishable from a blank one. Resolving the
/// `Contents` entry here lets a dangling reference, a non-stream object,
/// or corrupt stream data surface as `PageExtraction` instead.
fn collect_page_content(
    doc: &Document,
    page: u32,
    page_id: ObjectId,
) -> Result<Vec<u8>, AnalysisError> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| extraction_failure(page, e.to_string()))?;

    // A page with no Contents entry is blank, not broken
    let contents = match page_dict.get(b"Contents") {
        Ok(object) => object,
        Err(_) => return Ok(Vec::new()),
    };

    let mut data = Vec::new();
    match contents {
        Object::Reference(id) => append_content_stream(doc, page, *id, &mut data)?,
        Object::Array(items) => {
            for item in items {
                let id = item.as_reference().map_err(|_| {
                    extraction_failure(page, "Contents array holds a non-reference".to_string())
                })?;
                append_content_stream(doc, page, id, &mut data)?;
            }
        }
        Object::Stream(stream) => data.extend(decoded_stream_content(stream, page)?),
        _ => {
            return Err(extraction_failure(
                page,
                "Contents is neither a stream nor a reference".to_string(),
            ))
        }
    }
    Ok(data)
}

fn append_content_stream(
    doc: &Document,
    page: u32,
    id: ObjectId,
    buf: &mut Vec<u8>,
) -> Result<(), AnalysisError> {
    let stream = doc
        .get_object(id)
        .and_then(Object::as_stream)
        .map_err(|e| extraction_failure(page, format!("unreadable content stream: {}", e)))?;
    buf.extend(decoded_stream_content(stream, page)?);
    buf.push(b'\n');
    Ok(())
}

/// Run a content stream through its filters
///
/// lopdf's decompressor logs corrupt FlateDecode data and returns
/// whatever it got, so the plain single-FlateDecode case goes through
/// flate2 directly and propagates the error. Other filter stacks are
/// rare for content streams and keep lopdf's handling.
fn decoded_stream_content(stream: &Stream, page: u32) -> Result<Vec<u8>, AnalysisError> {
    let filters = match stream.filters() {
        Err(_) => return Ok(stream.content.clone()),
        Ok(filters) => filters,
    };

    if filters.len() == 1 && filters[0] == "FlateDecode" && !stream.dict.has(b"DecodeParms") {
        let mut out = Vec::new();
        ZlibDecoder::new(stream.content.as_slice())
            .read_to_end(&mut out)
            .map_err(|e| extraction_failure(page, format!("FlateDecode failed: {}", e)))?;
        return Ok(out);
    }

    stream
        .decompressed_content()
        .map_err(|e| extraction_failure(page, format!("content stream decode failed: {}", e)))
}

fn extraction_failure(page: u32, reason: String) -> AnalysisError {
    AnalysisError::PageExtraction { page, reason }
}

/// Decode a text-showing operand into a string
///
/// PDF string objects carry no declared encoding; try UTF-8 first, then
/// UTF-16BE (BOM-prefixed, common in PDFs), then fall back to Latin-1.
fn decode_text_operand(operand: &lopdf::Object) -> Option<String> {
    match operand {
        lopdf::Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        lopdf::Object::Array(arr) => {
            let mut text = String::new();
            for item in arr {
                match item {
                    lopdf::Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
                    lopdf::Object::Integer(n) => {
                        // Large negative adjustments in TJ arrays are word gaps
                        if *n < -100 {
                            text.push(' ');
                        }
                    }
                    lopdf::Object::Real(n) => {
                        if *n < -100.0 {
                            text.push(' ');
                        }
                    }
                    _ => {}
                }
            }
            Some(text)
        }
        _ => None,
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let chars: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|chunk| {
                if chunk.len() == 2 {
                    Some(u16::from_be_bytes([chunk[0], chunk[1]]))
                } else {
                    None
                }
            })
            .collect();
        if let Ok(s) = String::from_utf16(&chars) {
            return s;
        }
    }
    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, StringFormat};

    #[test]
    fn test_decode_utf8_string() {
        let op = Object::String(b"Hello".to_vec(), StringFormat::Literal);
        assert_eq!(decode_text_operand(&op), Some("Hello".to_string()));
    }

    #[test]
    fn test_decode_utf16be_string() {
        // BOM + "Hi"
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 and invalid standalone UTF-8
        let bytes = vec![0x63, 0x61, 0x66, 0xE9];
        assert_eq!(decode_pdf_string(&bytes), "café");
    }

    #[test]
    fn test_tj_array_kerning_becomes_space() {
        let op = Object::Array(vec![
            Object::String(b"Hello".to_vec(), StringFormat::Literal),
            Object::Integer(-250),
            Object::String(b"world".to_vec(), StringFormat::Literal),
        ]);
        assert_eq!(decode_text_operand(&op), Some("Hello world".to_string()));
    }

    #[test]
    fn test_small_kerning_ignored() {
        let op = Object::Array(vec![
            Object::String(b"ke".to_vec(), StringFormat::Literal),
            Object::Integer(-20),
            Object::String(b"rn".to_vec(), StringFormat::Literal),
        ]);
        assert_eq!(decode_text_operand(&op), Some("kern".to_string()));
    }

    #[test]
    fn test_non_text_operand() {
        assert_eq!(decode_text_operand(&Object::Integer(42)), None);
    }

    fn page_with_contents(doc: &mut Document, contents: Object) -> ObjectId {
        let page = lopdf::Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Contents", contents),
        ]);
        doc.add_object(page)
    }

    #[test]
    fn test_page_without_contents_is_blank() {
        let mut doc = Document::with_version("1.7");
        let page = lopdf::Dictionary::from_iter(vec![("Type", Object::Name(b"Page".to_vec()))]);
        let page_id = doc.add_object(page);

        assert_eq!(extract_page_text(&doc, 1, page_id).unwrap(), "");
    }

    #[test]
    fn test_dangling_contents_reference_fails() {
        let mut doc = Document::with_version("1.7");
        let page_id = page_with_contents(&mut doc, Object::Reference((999, 0)));

        let result = extract_page_text(&doc, 1, page_id);
        assert!(matches!(
            result,
            Err(AnalysisError::PageExtraction { page: 1, .. })
        ));
    }

    #[test]
    fn test_non_stream_contents_fails() {
        let mut doc = Document::with_version("1.7");
        let bogus_id = doc.add_object(lopdf::Dictionary::new());
        let page_id = page_with_contents(&mut doc, Object::Reference(bogus_id));

        let result = extract_page_text(&doc, 2, page_id);
        assert!(matches!(
            result,
            Err(AnalysisError::PageExtraction { page: 2, .. })
        ));
    }

    #[test]
    fn test_corrupt_flate_stream_fails() {
        let mut doc = Document::with_version("1.7");
        let mut dict = lopdf::Dictionary::new();
        dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        let stream_id = doc.add_object(Stream::new(dict, b"definitely not zlib".to_vec()));
        let page_id = page_with_contents(&mut doc, Object::Reference(stream_id));

        let result = extract_page_text(&doc, 1, page_id);
        assert!(matches!(
            result,
            Err(AnalysisError::PageExtraction { page: 1, .. })
        ));
    }

    #[test]
    fn test_valid_flate_stream_extracts() {
        use flate2::{write::ZlibEncoder, Compression};
        use std::io::Write;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"BT (compressed text) Tj ET").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut doc = Document::with_version("1.7");
        let mut dict = lopdf::Dictionary::new();
        dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        let stream_id = doc.add_object(Stream::new(dict, compressed));
        let page_id = page_with_contents(&mut doc, Object::Reference(stream_id));

        assert_eq!(
            extract_page_text(&doc, 1, page_id).unwrap(),
            "compressed text"
        );
    }
}
