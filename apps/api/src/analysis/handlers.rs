//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::analysis::pdf_text::extract_text_from_pdf;
use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub data: AnalysisReport,
}

struct PdfUpload {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

/// POST /predict
///
/// Accepts a multipart upload with a PDF in the `file` field and returns the analysis.
pub async fn handle_predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, AppError> {
    let upload = read_pdf_upload(multipart).await?;
    tracing::debug!(
        file_name = upload.file_name.as_deref().unwrap_or("-"),
        bytes = upload.bytes.len(),
        "PDF upload received"
    );

    // Text extraction and scoring are CPU-bound; keep them off the async workers.
    let analyzer = state.analyzer.clone();
    let data = tokio::task::spawn_blocking(move || -> Result<AnalysisReport, AppError> {
        let text = extract_text_from_pdf(&upload.bytes)?;
        Ok(analyzer.analyze(&text, upload.file_name.as_deref())?)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(PredictResponse {
        success: true,
        data,
    }))
}

async fn read_pdf_upload(mut multipart: Multipart) -> Result<PdfUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        if field.content_type() != Some(PDF_CONTENT_TYPE) {
            return Err(AppError::Validation(
                "Only PDF files are allowed".to_string(),
            ));
        }

        let file_name = field.file_name().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok(PdfUpload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::Validation(format!(
        "Missing '{UPLOAD_FIELD}' field in upload"
    )))
}
