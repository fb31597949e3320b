//! intl command-line interface.
pub mod check;
pub mod translate;

pub use check::{check_project, render_report};
pub use translate::{TranslateRequest, parse_arg, translate};

use intl_core::IntlErrorCode;

/// Every error code, one per line.
pub fn list_codes() -> String {
    IntlErrorCode::iter()
        .map(|code| code.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
