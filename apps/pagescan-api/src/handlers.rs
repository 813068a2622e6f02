//! HTTP handlers for PageScan API

use axum::{http::StatusCode, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use pagescan_core::{
    analyze, parse_page_range, to_csv, AnalysisError, AnalysisOptions, DEFAULT_THRESHOLD,
};

use crate::error::ApiError;
use crate::models::{AnalyzeRequest, AnalyzeResponse, PageRow};

const CSV_FILENAME: &str = "page_text_report.csv";

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Analyze an uploaded PDF and return the per-page report as JSON
pub async fn analyze_document(
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let (pdf_data, options) = validate_request(&req)?;

    let report = analyze(&pdf_data, &options)?;

    if report.failed_pages > 0 {
        tracing::warn!(
            "Extraction failed for {} of {} pages",
            report.failed_pages,
            report.pages.len()
        );
    }
    tracing::info!(
        "Analyzed {} pages with threshold {}",
        report.pages.len(),
        options.threshold
    );

    Ok(Json(AnalyzeResponse {
        threshold: options.threshold,
        summary: report.summary(),
        failed_pages: report.failed_pages,
        results: report.pages.iter().map(PageRow::from).collect(),
    }))
}

/// Analyze an uploaded PDF and return the report as a CSV download
pub async fn analyze_document_csv(
    Json(req): Json<AnalyzeRequest>,
) -> Result<(StatusCode, [(String, String); 2], String), ApiError> {
    let (pdf_data, options) = validate_request(&req)?;

    let report = analyze(&pdf_data, &options)?;
    let csv = to_csv(&report);

    Ok((
        StatusCode::OK,
        [
            (
                "Content-Type".to_string(),
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ),
        ],
        csv,
    ))
}

/// Validate form inputs and decode the PDF, before any page is touched
fn validate_request(req: &AnalyzeRequest) -> Result<(Vec<u8>, AnalysisOptions), ApiError> {
    let threshold = match req.threshold {
        None => DEFAULT_THRESHOLD,
        Some(t) if t < 0 => {
            return Err(AnalysisError::InvalidThreshold(format!(
                "must be a non-negative integer, got {}",
                t
            ))
            .into())
        }
        Some(t) => t as usize,
    };

    let page_range = match &req.pages {
        None => None,
        Some(spec) => Some(parse_page_range(spec)?),
    };

    let pdf_data = BASE64
        .decode(&req.pdf_base64)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid PDF base64: {}", e)))?;

    if pdf_data.len() < 5 || &pdf_data[0..5] != b"%PDF-" {
        return Err(ApiError::InvalidRequest(
            "Uploaded file is not a PDF".to_string(),
        ));
    }

    Ok((
        pdf_data,
        AnalysisOptions {
            threshold,
            page_range,
        },
    ))
}
