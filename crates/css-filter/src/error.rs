//! Error type for filter application.

use std::fmt;

/// Error returned when a pixel buffer cannot be filtered.
///
/// Parsing never fails (unknown tokens are skipped), so the only failure
/// mode is a buffer that is not a whole number of RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Buffer length is not a multiple of 4 bytes
    InvalidBufferLength(usize),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidBufferLength(len) => {
                write!(f, "RGBA buffer length {} is not a multiple of 4", len)
            }
        }
    }
}

impl std::error::Error for FilterError {}
