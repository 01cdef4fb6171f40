//! Resume Text Extractor — turns an uploaded file into plain text.

use crate::errors::AppError;

/// File formats we can read text out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    PlainText,
    Markdown,
}

impl ResumeFormat {
    /// Detects the format from the declared content type, then the file extension.
    /// Generic types like `application/octet-stream` defer to the extension.
    pub fn detect(content_type: Option<&str>, file_name: &str) -> Option<Self> {
        let from_type = content_type.and_then(|ct| {
            let essence = ct.split(';').next().unwrap_or_default().trim();
            match essence.to_ascii_lowercase().as_str() {
                "application/pdf" => Some(ResumeFormat::Pdf),
                "text/plain" => Some(ResumeFormat::PlainText),
                "text/markdown" | "text/x-markdown" => Some(ResumeFormat::Markdown),
                _ => None,
            }
        });

        from_type.or_else(|| Self::from_extension(file_name))
    }

    pub fn from_extension(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(ResumeFormat::Pdf),
            "txt" => Some(ResumeFormat::PlainText),
            "md" | "markdown" => Some(ResumeFormat::Markdown),
            _ => None,
        }
    }
}

/// Extracts plain text from an uploaded resume. CPU-bound for PDFs; call it
/// from a blocking task.
pub fn extract_text(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, AppError> {
    let format = ResumeFormat::detect(content_type, file_name).ok_or_else(|| {
        AppError::UnsupportedFileFormat(format!(
            "'{file_name}' is not a supported resume format (PDF, TXT or Markdown)"
        ))
    })?;

    let text = match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            AppError::Validation(format!("Could not read text from PDF '{file_name}': {e}"))
        })?,
        ResumeFormat::PlainText | ResumeFormat::Markdown => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(format!(
            "No readable text found in '{file_name}'"
        )));
    }
    Ok(text)
}
