//! Error types for the spellindex library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SpellIndexError`] enum. Absence of a word is never an error: lookups
//! report it through their return value instead.
//!
//! # Examples
//!
//! ```
//! use spellindex::error::{Result, SpellIndexError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpellIndexError::invalid_argument("capacity must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for spellindex operations.
#[derive(Error, Debug)]
pub enum SpellIndexError {
    /// I/O errors (reading word streams, writing reports)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON configuration errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A caller supplied an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A full probe cycle found neither the key nor an empty slot
    #[error("Index full: no free slot reachable in a table of capacity {capacity}")]
    IndexFull { capacity: usize },

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SpellIndexError.
pub type Result<T> = std::result::Result<T, SpellIndexError>;

impl SpellIndexError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpellIndexError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpellIndexError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpellIndexError::Other(msg.into())
    }

    /// Create the error reported when a probe cycle wraps around.
    pub fn index_full(capacity: usize) -> Self {
        SpellIndexError::IndexFull { capacity }
    }
}
