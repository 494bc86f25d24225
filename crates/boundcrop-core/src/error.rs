//! Error types for crop sessions.

use crate::raster::{EncodeError, RasterError};
use crate::session::SessionState;
use thiserror::Error;

/// Errors surfaced by a crop session and its collaborators.
///
/// Degenerate geometry (parallel constraint lines) is not an error: the
/// resolvers treat it as an unconstrained axis.
#[derive(Debug, Error)]
pub enum CropError {
    /// The host reported a handle this crate does not know.
    #[error("Unknown control: {0}")]
    UnknownControl(String),

    /// The session is not in a state that allows the requested action.
    #[error("Cannot {action} while the session is {state}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    /// Raster extraction failed.
    #[error("Raster extraction failed: {0}")]
    Raster(#[from] RasterError),

    /// Encoding the extracted raster failed.
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// The image loader could not produce the replacement image.
    #[error("Image loading failed: {0}")]
    LoadFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CropError::UnknownControl("mtr".to_string());
        assert_eq!(err.to_string(), "Unknown control: mtr");

        let err = CropError::InvalidState {
            action: "apply",
            state: SessionState::Cancelled,
        };
        assert_eq!(err.to_string(), "Cannot apply while the session is cancelled");
    }

    #[test]
    fn test_raster_error_converts() {
        let err: CropError = RasterError::EmptyRegion {
            width: 0,
            height: 5,
        }
        .into();
        assert!(matches!(err, CropError::Raster(_)));
    }
}
