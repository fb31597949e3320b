//! The main Error type for intl.

use crate::IntlErrorCode;
use serde::Serialize;
use std::fmt;

/// An error tagged with an [`IntlErrorCode`] and optional detail text.
///
/// The message is composed once at construction: the code's string form,
/// followed by `": "` and the original message when one was given.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntlError {
    code: IntlErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_message: Option<String>,
    message: String,
    #[serde(skip)]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl IntlError {
    /// Create a new error with the given code and optional detail.
    pub fn new<S: Into<String>>(code: IntlErrorCode, original_message: Option<S>) -> Self {
        let original_message = original_message.map(Into::into);
        let message = match &original_message {
            Some(detail) => format!("{}: {}", code.as_str(), detail),
            None => code.as_str().to_string(),
        };

        Self {
            code,
            original_message,
            message,
            source: None,
        }
    }

    /// Create an error that carries only its code.
    pub fn from_code(code: IntlErrorCode) -> Self {
        Self::new::<String>(code, None)
    }

    /// Get the error code.
    pub fn code(&self) -> IntlErrorCode {
        self.code
    }

    /// Get the detail text supplied at construction, if any.
    pub fn original_message(&self) -> Option<&str> {
        self.original_message.as_deref()
    }

    /// Get the composed message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the source error. The message is left untouched.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for IntlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for IntlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.code)?;

        if let Some(detail) = &self.original_message {
            writeln!(f)?;
            writeln!(f, "    Message: {}", detail)?;
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for IntlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<IntlErrorCode> for IntlError {
    fn from(code: IntlErrorCode) -> Self {
        Self::from_code(code)
    }
}

impl IntlError {
    /// Create a MissingMessage error
    pub fn missing_message(message: impl Into<String>) -> Self {
        Self::new(IntlErrorCode::MissingMessage, Some(message))
    }

    /// Create a MissingFormat error
    pub fn missing_format(message: impl Into<String>) -> Self {
        Self::new(IntlErrorCode::MissingFormat, Some(message))
    }

    /// Create an EnvironmentFallback error
    pub fn environment_fallback(message: impl Into<String>) -> Self {
        Self::new(IntlErrorCode::EnvironmentFallback, Some(message))
    }

    /// Create an InsufficientPath error
    pub fn insufficient_path(message: impl Into<String>) -> Self {
        Self::new(IntlErrorCode::InsufficientPath, Some(message))
    }

    /// Create an InvalidMessage error
    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::new(IntlErrorCode::InvalidMessage, Some(message))
    }

    /// Create an InvalidKey error
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::new(IntlErrorCode::InvalidKey, Some(message))
    }

    /// Create a FormattingError
    pub fn formatting_error(message: impl Into<String>) -> Self {
        Self::new(IntlErrorCode::FormattingError, Some(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_with_detail() {
        let err = IntlError::new(IntlErrorCode::InvalidMessage, Some("missing key"));
        assert_eq!(err.message(), "INVALID_MESSAGE: missing key");
        assert_eq!(err.to_string(), "INVALID_MESSAGE: missing key");
        assert_eq!(err.code(), IntlErrorCode::InvalidMessage);
        assert_eq!(err.original_message(), Some("missing key"));
    }

    #[test]
    fn test_message_without_detail() {
        let err = IntlError::from_code(IntlErrorCode::InsufficientPath);
        assert_eq!(err.message(), "INSUFFICIENT_PATH");
        assert_eq!(err.code(), IntlErrorCode::InsufficientPath);
        assert_eq!(err.original_message(), None);
    }

    #[test]
    fn test_every_code_composes_message() {
        for code in IntlErrorCode::iter() {
            let bare = IntlError::from_code(code);
            assert_eq!(bare.message(), code.as_str());

            let detailed = IntlError::new(code, Some("context"));
            assert_eq!(detailed.message(), format!("{}: context", code));
            assert_eq!(detailed.code(), code);
        }
    }

    #[test]
    fn test_empty_detail_is_still_present() {
        let err = IntlError::new(IntlErrorCode::FormattingError, Some(""));
        assert_eq!(err.message(), "FORMATTING_ERROR: ");
        assert_eq!(err.original_message(), Some(""));
    }

    #[test]
    fn test_convenience_constructors() {
        let err = IntlError::missing_message("Could not resolve `a.b`");
        assert_eq!(err.code(), IntlErrorCode::MissingMessage);
        assert_eq!(err.message(), "MISSING_MESSAGE: Could not resolve `a.b`");

        assert_eq!(
            IntlError::invalid_key("a.b").code(),
            IntlErrorCode::InvalidKey
        );
        assert_eq!(
            IntlError::environment_fallback("no time zone").code(),
            IntlErrorCode::EnvironmentFallback
        );
    }

    #[test]
    fn test_set_source_keeps_message() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = IntlError::missing_message("messages/de.json").set_source(io_err);

        assert!(err.source_ref().is_some());
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.message(), "MISSING_MESSAGE: messages/de.json");
    }

    #[test]
    fn test_serialize() {
        let err = IntlError::invalid_key("a.b");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "INVALID_KEY",
                "originalMessage": "a.b",
                "message": "INVALID_KEY: a.b",
            })
        );

        let bare = serde_json::to_value(IntlError::from(IntlErrorCode::MissingFormat)).unwrap();
        assert_eq!(
            bare,
            serde_json::json!({ "code": "MISSING_FORMAT", "message": "MISSING_FORMAT" })
        );
    }

    #[test]
    fn test_debug_includes_source() {
        let io_err = std::io::Error::other("disk on fire");
        let err = IntlError::missing_message("messages/en.json").set_source(io_err);
        let debug = format!("{:?}", err);
        assert!(debug.contains("MISSING_MESSAGE"));
        assert!(debug.contains("messages/en.json"));
        assert!(debug.contains("disk on fire"));
    }
}
