//! Shared validation utilities

use thiserror::Error;

/// Maximum length for an uploaded filename.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Errors that can occur during filename validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilenameValidationError {
    #[error("Filename is required and cannot be empty")]
    Required,

    #[error("Filename must not exceed {max_length} characters")]
    TooLong { max_length: usize },

    #[error("Filename must not contain path separators")]
    PathSeparator,
}

/// Validate an uploaded filename.
///
/// The name is used as part of the stored file name, so path separators are
/// rejected outright rather than sanitized.
pub fn validate_filename(filename: &str) -> Result<(), FilenameValidationError> {
    if filename.trim().is_empty() {
        return Err(FilenameValidationError::Required);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(FilenameValidationError::TooLong {
            max_length: MAX_FILENAME_LENGTH,
        });
    }

    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(FilenameValidationError::PathSeparator);
    }

    Ok(())
}
