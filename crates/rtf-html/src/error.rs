//! Error types for conversion.

use rtf_html_config::ConfigError;

use crate::writer::WriteError;

/// Error creating a converter or converting a document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// Settings failed validation.
    #[error("invalid settings")]
    InvalidSettings(#[from] ConfigError),

    /// The visual hyperlink pattern is not a valid regex.
    #[error("invalid visual hyperlink pattern")]
    HyperlinkPattern(#[from] regex::Error),

    /// Writing to the output failed.
    #[error("failed to write markup")]
    Write(#[from] WriteError),
}
