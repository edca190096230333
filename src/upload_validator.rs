// src/upload_validator.rs
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

pub const MIN_UPLOAD_BYTES: usize = 1024;
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

const PDF_SIGNATURE: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorKind {
    Empty,
    TooSmall,
    TooLarge,
    NotPdf,
    MultiplePages,
    Unreadable,
}

impl UploadErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "UPLOAD_EMPTY",
            Self::TooSmall => "UPLOAD_TOO_SMALL",
            Self::TooLarge => "UPLOAD_TOO_LARGE",
            Self::NotPdf => "UPLOAD_NOT_PDF",
            Self::MultiplePages => "UPLOAD_MULTIPLE_PAGES",
            Self::Unreadable => "UPLOAD_UNREADABLE",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct UploadValidationError {
    pub kind: UploadErrorKind,
    pub message: String,
    pub suggestion: String,
}

impl UploadValidationError {
    fn new(kind: UploadErrorKind, message: impl Into<String>, suggestion: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: suggestion.to_string(),
        }
    }
}

pub struct UploadValidator;

impl UploadValidator {
    /// Check a resume before it is sent for extraction
    pub fn validate_bytes(bytes: &[u8]) -> Result<(), UploadValidationError> {
        if bytes.is_empty() {
            return Err(UploadValidationError::new(
                UploadErrorKind::Empty,
                "Uploaded file is empty",
                "Please upload your resume as a PDF file",
            ));
        }

        if !bytes.starts_with(PDF_SIGNATURE) {
            return Err(UploadValidationError::new(
                UploadErrorKind::NotPdf,
                "Only PDF files are supported",
                "Export your resume to PDF and try again",
            ));
        }

        if bytes.len() < MIN_UPLOAD_BYTES {
            return Err(UploadValidationError::new(
                UploadErrorKind::TooSmall,
                format!("File too small: {} bytes (min 1KB)", bytes.len()),
                "The file looks truncated, please upload the full PDF",
            ));
        }

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadValidationError::new(
                UploadErrorKind::TooLarge,
                format!(
                    "File too large: {:.1}MB (max 2MB)",
                    bytes.len() as f64 / 1024.0 / 1024.0
                ),
                "Compress the PDF or remove embedded images",
            ));
        }

        if let Some(pages) = count_pdf_pages(bytes) {
            if pages > 1 {
                return Err(UploadValidationError::new(
                    UploadErrorKind::MultiplePages,
                    format!("Resume has {} pages, only single-page resumes are supported", pages),
                    "Trim your resume to one page",
                ));
            }
        }

        Ok(())
    }

    pub async fn validate_file(path: &Path) -> Result<Vec<u8>, UploadValidationError> {
        let bytes = fs::read(path).await.map_err(|e| {
            UploadValidationError::new(
                UploadErrorKind::Unreadable,
                format!("Cannot read uploaded file: {}", e),
                "Try uploading the file again",
            )
        })?;

        match Self::validate_bytes(&bytes) {
            Ok(()) => {
                info!("Upload validation passed: {} ({} bytes)", path.display(), bytes.len());
                Ok(bytes)
            }
            Err(validation_error) => {
                error!("Upload validation failed: {}", validation_error.message);
                Err(validation_error)
            }
        }
    }
}

/// Count `/Type /Page` objects; `None` when pages live in compressed object streams
pub fn count_pdf_pages(bytes: &[u8]) -> Option<usize> {
    let mut count = 0;
    let mut i = 0;

    while let Some(offset) = find(&bytes[i..], b"/Type") {
        let mut j = i + offset + b"/Type".len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes[j..].starts_with(b"/Page") {
            let after = bytes.get(j + b"/Page".len()).copied();
            // `/Pages` is the page tree node, not a page
            if !matches!(after, Some(c) if c.is_ascii_alphanumeric()) {
                count += 1;
            }
        }
        i = j;
    }

    if count == 0 {
        None
    } else {
        Some(count)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
