//! # Error Types
//!
//! This module defines the error type shared by every part of the cinta
//! library. Each failure is local to a single label: nothing here is retried,
//! and a batch keeps composing the remaining labels when one of them fails.

use thiserror::Error;

/// Main error type for cinta operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// Unsupported tape class, rotation or template identifier
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or unreadable font file (or other local resource)
    #[error("Resource error: {0}")]
    Resource(String),

    /// Invalid label content (empty text, missing payload, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Text does not fit its budget even at the smallest size allowed
    #[error("Layout overflow: {element} does not fit within {budget_px}px")]
    LayoutOverflow {
        /// Which element overflowed (e.g. "text", "shelf number")
        element: String,
        /// The pixel budget the element had to fit in
        budget_px: i64,
    },

    /// The code encoder rejected the payload
    #[error("Encode error: {0}")]
    Encode(String),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// Transport-level errors reported by a print sink
    #[error("Transport error: {0}")]
    Transport(String),

    /// A multi-copy print stopped at a sink failure
    #[error("Print interrupted after {acknowledged} of {requested} copies: {source}")]
    PrintInterrupted {
        /// Copies the device acknowledged before the failure
        acknowledged: u32,
        /// Copies the job asked for
        requested: u32,
        /// The sink's error for the failed copy
        source: Box<LabelError>,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LabelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LabelError>();
    }

    #[test]
    fn test_overflow_message_names_element() {
        let err = LabelError::LayoutOverflow {
            element: "text".to_string(),
            budget_px: -14,
        };
        assert_eq!(err.to_string(), "Layout overflow: text does not fit within -14px");
    }

    #[test]
    fn test_interrupted_print_keeps_sink_error() {
        use std::error::Error as _;

        let err = LabelError::PrintInterrupted {
            acknowledged: 1,
            requested: 5,
            source: Box::new(LabelError::Transport("paper jam".to_string())),
        };
        assert_eq!(
            err.to_string(),
            "Print interrupted after 1 of 5 copies: Transport error: paper jam"
        );
        assert!(err.source().is_some());
    }
}
