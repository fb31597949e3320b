//! Message catalogs, locale negotiation and message formatting.
//!
//! Every fallible operation returns [`intl_error::Result`], so failures carry
//! an [`IntlErrorCode`] such as `MISSING_MESSAGE` or `INVALID_KEY`.
//!
//! ```rust
//! use intl_core::{Catalog, FormatArgs, Translator};
//!
//! let catalog = Catalog::from_json_str("en", r#"{"Index": {"title": "Hello {name}!"}}"#)?;
//! let t = Translator::new(catalog).with_namespace("Index");
//! assert_eq!(t.t("title", &FormatArgs::new().with("name", "Ada")), "Hello Ada!");
//! assert_eq!(t.t("missing", &FormatArgs::new()), "Index.missing");
//! # Ok::<(), intl_core::IntlError>(())
//! ```
pub mod catalog;
pub mod config;
pub mod format;
pub mod loader;
pub mod locale;
pub mod translator;

pub use catalog::{Catalog, join_path};
pub use config::{Formats, IntlConfig, NumberFormat};
pub use format::{FormatArgs, FormatValue};
pub use intl_error::{IntlError, IntlErrorCode, Result};
pub use loader::{load_all, load_catalog};
pub use locale::{LocaleMatch, negotiate, parse_accept_language};
pub use translator::{ErrorHandler, MessageFallback, Translator, log_error, path_fallback};
