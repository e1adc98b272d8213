//! Error types for Sweepr
//!
//! Centralized error handling using thiserror.
//!
//! Most malformed input is deliberately *not* an error: bad ranges clamp to a
//! single value, over-aggressive skip lists fall back to the unfiltered name
//! list, and an empty combination space produces default outputs. Only genuine
//! configuration mistakes (an unknown mode string, an unregistered node name)
//! fail fast.

use thiserror::Error;

/// All error types that can occur in Sweepr
#[derive(Debug, Error)]
pub enum SweeprError {
    /// Mode string is not one of "sequential", "random", "ping_pong"
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// Node name not present in the registry
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// JSON serialization/deserialization error (dynamic invoke payloads)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Sweepr operations
pub type Result<T> = std::result::Result<T, SweeprError>;
