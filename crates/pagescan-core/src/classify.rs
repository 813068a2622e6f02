//! Page Text Classifier
//!
//! Opens a PDF from memory, extracts text page by page, and classifies
//! each page against a character-count threshold. No OCR is performed:
//! a page counts as "has text" only if text can already be extracted
//! from it, whether native or from an embedded OCR layer.

use crate::error::AnalysisError;
use crate::extract::extract_page_text;
use crate::report::{AnalysisOptions, AnalysisReport, PageResult};
use lopdf::Document;

/// Analyze a PDF and produce one `PageResult` per page
///
/// Pages are processed in document order and the report preserves that
/// order. Output is deterministic for a given input and options.
///
/// Per-page extraction failure does not abort the run: the page is
/// recorded as `char_count = 0, has_text = false` and counted in
/// `AnalysisReport::failed_pages`, so an otherwise-valid report is not
/// discarded and the failure is still visible to the caller.
///
/// # Errors
/// - `AnalysisError::DocumentOpen` if the bytes are not a readable PDF;
///   returned before any page is processed.
pub fn analyze(bytes: &[u8], options: &AnalysisOptions) -> Result<AnalysisReport, AnalysisError> {
    let doc = Document::load_mem(bytes).map_err(|e| AnalysisError::DocumentOpen(e.to_string()))?;

    let page_ids = doc.get_pages();
    let page_count = page_ids.len() as u32;

    let (start, end) = normalize_range(options.page_range, page_count);

    let mut pages = Vec::new();
    let mut failed_pages = 0;

    // get_pages yields a BTreeMap keyed by 1-based page number, so
    // iteration is already in document order
    for (&page_num, &page_id) in page_ids.iter() {
        if page_num < start || page_num > end {
            continue;
        }

        let page_index = page_num - 1;
        match extract_page_text(&doc, page_num, page_id) {
            Ok(text) => pages.push(PageResult::from_text(page_index, &text, options.threshold)),
            Err(_) => {
                failed_pages += 1;
                pages.push(PageResult::extraction_failed(page_index));
            }
        }
    }

    Ok(AnalysisReport {
        pages,
        failed_pages,
    })
}

/// Normalize a 1-based inclusive page range against the document
///
/// Both ends are clamped into `[1, page_count]` and swapped if reversed.
/// `None` (and a 0-page document) selects everything, which for an empty
/// document is the empty range.
fn normalize_range(range: Option<(u32, u32)>, page_count: u32) -> (u32, u32) {
    if page_count == 0 {
        return (1, 0);
    }
    match range {
        None => (1, page_count),
        Some((a, b)) => {
            let a = a.clamp(1, page_count);
            let b = b.clamp(1, page_count);
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        }
    }
}
