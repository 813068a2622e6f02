//! CSV export of an analysis report
//!
//! Fixed schema: `page_index,char_count,has_text`, one row per page in
//! report order, `true`/`false` literals, `\n` line endings. The
//! supplementary fields on `PageResult` (word count, text sample) are
//! not exported; the sample may contain commas, and the export format
//! deliberately has no quoting.

use crate::error::AnalysisError;
use crate::report::AnalysisReport;

pub const CSV_HEADER: &str = "page_index,char_count,has_text";

/// One parsed row of an exported report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub page_index: u32,
    pub char_count: usize,
    pub has_text: bool,
}

/// Serialize a report to CSV text
pub fn to_csv(report: &AnalysisReport) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + report.pages.len() * 16);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for page in &report.pages {
        out.push_str(&format!(
            "{},{},{}\n",
            page.page_index, page.char_count, page.has_text
        ));
    }
    out
}

/// Parse CSV text produced by `to_csv` back into records
///
/// Order-preserving: the returned records match report order. Rejects a
/// missing or wrong header and any malformed row.
pub fn parse_csv(text: &str) -> Result<Vec<CsvRecord>, AnalysisError> {
    let mut lines = text.lines();

    match lines.next() {
        Some(header) if header.trim_end() == CSV_HEADER => {}
        Some(header) => {
            return Err(AnalysisError::CsvParse(format!(
                "Unexpected header: {}",
                header
            )))
        }
        None => return Err(AnalysisError::CsvParse("Empty input".into())),
    }

    let mut records = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(',');
        let (index, count, flag) = match (fields.next(), fields.next(), fields.next(), fields.next())
        {
            (Some(a), Some(b), Some(c), None) => (a, b, c),
            _ => {
                return Err(AnalysisError::CsvParse(format!(
                    "Line {}: expected 3 fields",
                    line_no + 2
                )))
            }
        };

        let page_index: u32 = index.trim().parse().map_err(|_| {
            AnalysisError::CsvParse(format!("Line {}: invalid page_index: {}", line_no + 2, index))
        })?;
        let char_count: usize = count.trim().parse().map_err(|_| {
            AnalysisError::CsvParse(format!("Line {}: invalid char_count: {}", line_no + 2, count))
        })?;
        let has_text = match flag.trim() {
            "true" => true,
            "false" => false,
            other => {
                return Err(AnalysisError::CsvParse(format!(
                    "Line {}: invalid has_text: {}",
                    line_no + 2,
                    other
                )))
            }
        };

        records.push(CsvRecord {
            page_index,
            char_count,
            has_text,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::PageResult;
    use pretty_assertions::assert_eq;

    fn report_from_texts(texts: &[&str], threshold: usize) -> AnalysisReport {
        AnalysisReport {
            pages: texts
                .iter()
                .enumerate()
                .map(|(i, t)| PageResult::from_text(i as u32, t, threshold))
                .collect(),
            failed_pages: 0,
        }
    }

    #[test]
    fn test_to_csv_format() {
        let report = report_from_texts(&["hello world", ""], 5);
        let csv = to_csv(&report);
        assert_eq!(csv, "page_index,char_count,has_text\n0,11,true\n1,0,false\n");
    }

    #[test]
    fn test_to_csv_empty_report() {
        let report = AnalysisReport {
            pages: vec![],
            failed_pages: 0,
        };
        assert_eq!(to_csv(&report), "page_index,char_count,has_text\n");
    }

    #[test]
    fn test_round_trip() {
        let report = report_from_texts(&["a full page of text", "", "tiny", "another page"], 5);
        let records = parse_csv(&to_csv(&report)).unwrap();

        assert_eq!(records.len(), report.pages.len());
        for (record, page) in records.iter().zip(&report.pages) {
            assert_eq!(record.page_index, page.page_index);
            assert_eq!(record.char_count, page.char_count);
            assert_eq!(record.has_text, page.has_text);
        }
    }

    #[test]
    fn test_parse_rejects_wrong_header() {
        let result = parse_csv("pagina,caracteres,tiene_texto\n1,5,true\n");
        assert!(matches!(result, Err(AnalysisError::CsvParse(_))));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(parse_csv(""), Err(AnalysisError::CsvParse(_))));
    }

    #[test]
    fn test_parse_rejects_bad_field_count() {
        let text = "page_index,char_count,has_text\n0,12\n";
        assert!(matches!(parse_csv(text), Err(AnalysisError::CsvParse(_))));
    }

    #[test]
    fn test_parse_rejects_bad_boolean() {
        let text = "page_index,char_count,has_text\n0,12,yes\n";
        assert!(matches!(parse_csv(text), Err(AnalysisError::CsvParse(_))));
    }

    #[test]
    fn test_parse_skips_trailing_blank_line() {
        let text = "page_index,char_count,has_text\n0,3,false\n\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            CsvRecord {
                page_index: 0,
                char_count: 3,
                has_text: false
            }
        );
    }
}
