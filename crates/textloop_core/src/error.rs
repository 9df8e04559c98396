//! Error types

use thiserror::Error;

/// Configuration and lifecycle errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextLoopError {
    /// The item list was empty
    #[error("text loop requires at least one item")]
    EmptyItems,

    /// Tick interval of zero milliseconds
    #[error("tick interval must be greater than zero (got {0}ms)")]
    InvalidInterval(u64),

    /// Negative or non-finite initial size
    #[error("invalid initial size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    /// Spring parameters that would never settle
    #[error("invalid spring configuration: stiffness {stiffness}, damping {damping}")]
    InvalidSpring { stiffness: f32, damping: f32 },

    /// `mount` called on a widget that is already mounted or was unmounted
    #[error("widget cannot be mounted from the {0} state")]
    AlreadyMounted(&'static str),

    /// Configuration file could not be parsed
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for textloop operations
pub type Result<T> = std::result::Result<T, TextLoopError>;
