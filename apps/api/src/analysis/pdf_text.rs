//! PDF text extraction wrapper around the `pdf-extract` crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("uploaded file is empty")]
    EmptyDocument,

    #[error("could not read PDF: {0}")]
    Unreadable(String),
}

/// Extracts the text of every page, skipping pages with no text, each followed by a newline.
///
/// A readable PDF without any text (e.g. a scanned image) yields an empty string, not an error.
pub fn extract_text_from_pdf(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    if pdf_bytes.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
    tracing::debug!(pages = pages.len(), "PDF pages extracted");

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .filter(|page| !page.is_empty())
        .fold(String::new(), |mut text, page| {
            text.push_str(page);
            text.push('\n');
            text
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_skips_empty_pages() {
        let pages = vec!["first".to_string(), String::new(), "third".to_string()];
        assert_eq!(join_pages(&pages), "first\nthird\n");
    }

    #[test]
    fn test_join_of_textless_document_is_empty() {
        assert_eq!(join_pages(&[String::new(), String::new()]), "");
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        assert!(matches!(
            extract_text_from_pdf(&[]),
            Err(ExtractionError::EmptyDocument)
        ));
    }

    #[test]
    fn test_non_pdf_bytes_are_unreadable() {
        let err = extract_text_from_pdf(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
    }
}
