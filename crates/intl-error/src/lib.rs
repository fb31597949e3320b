//! # intl-error
//!
//! The coded error shared by every intl crate.
//!
//! ## Design Philosophy
//!
//! - **IntlErrorCode**: a fixed set of failure categories (`MISSING_MESSAGE`,
//!   `INVALID_KEY`, ...)
//! - **Original message**: optional free-form detail for one error instance
//! - **Message**: `CODE` or `CODE: detail`, composed once and never changed
//!
//! ## Usage
//!
//! ```rust
//! use intl_error::{IntlError, IntlErrorCode};
//!
//! let err = IntlError::new(IntlErrorCode::InvalidMessage, Some("missing key"));
//! assert_eq!(err.to_string(), "INVALID_MESSAGE: missing key");
//!
//! let err = IntlError::from_code(IntlErrorCode::InsufficientPath);
//! assert_eq!(err.to_string(), "INSUFFICIENT_PATH");
//! assert_eq!(err.original_message(), None);
//! ```
//!
//! ## Principles
//!
//! - All fallible intl functions return `Result<T, intl_error::IntlError>`
//! - External errors are wrapped with `set_source(err)`

mod code;
mod error;

pub use code::IntlErrorCode;
pub use error::IntlError;

/// Result type alias using IntlError
pub type Result<T> = std::result::Result<T, IntlError>;
