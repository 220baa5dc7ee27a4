//! Upload validation.
//!
//! Runs before any bytes are read. The size limit is checked on its own, so an
//! oversized file is reported as too large whatever its type.

use crate::error::ValidationError;
use crate::types::{DocumentFormat, FileMeta};

/// Largest accepted upload, in bytes.
pub const MAX_FILE_BYTES: u64 = 10_000_000;

/// Check a file's type and size, returning the format it will be decoded as.
pub fn validate(meta: &FileMeta) -> Result<DocumentFormat, ValidationError> {
    if meta.size_bytes > MAX_FILE_BYTES {
        return Err(ValidationError::TooLarge {
            size_bytes: meta.size_bytes,
            max_bytes: MAX_FILE_BYTES,
        });
    }

    DocumentFormat::from_mime(&meta.mime_type).ok_or_else(|| ValidationError::UnsupportedType {
        mime_type: meta.mime_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MIME_DOCX, MIME_PDF, MIME_TEXT};

    #[test]
    fn accepts_supported_types() {
        assert_eq!(validate(&FileMeta::new(MIME_TEXT, 12)), Ok(DocumentFormat::PlainText));
        assert_eq!(validate(&FileMeta::new(MIME_PDF, 12)), Ok(DocumentFormat::Pdf));
        assert_eq!(validate(&FileMeta::new(MIME_DOCX, 12)), Ok(DocumentFormat::Docx));
    }

    #[test]
    fn rejects_unsupported_type() {
        let result = validate(&FileMeta::new("image/png", 12));
        assert!(matches!(result, Err(ValidationError::UnsupportedType { mime_type }) if mime_type == "image/png"));
    }

    #[test]
    fn accepts_exactly_max_size() {
        assert!(validate(&FileMeta::new(MIME_TEXT, MAX_FILE_BYTES)).is_ok());
    }

    #[test]
    fn rejects_one_byte_over_regardless_of_type() {
        for mime in [MIME_TEXT, MIME_PDF, MIME_DOCX, "image/png", ""] {
            let result = validate(&FileMeta::new(mime, 10_000_001));
            assert!(
                matches!(result, Err(ValidationError::TooLarge { size_bytes: 10_000_001, .. })),
                "mime {mime} was not rejected as too large"
            );
        }
    }
}
