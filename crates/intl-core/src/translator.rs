//! Translating keys against one locale's catalog.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use intl_error::{IntlError, Result};

use crate::catalog::{Catalog, join_path};
use crate::config::{IntlConfig, NumberFormat};
use crate::format::{self, FormatArgs, Message};

/// Called with every error `t` swallows.
pub type ErrorHandler = Arc<dyn Fn(&IntlError) + Send + Sync>;

/// Produces the string `t` returns in place of a message that failed.
/// Receives the namespace, the key and the error.
pub type MessageFallback = Arc<dyn Fn(Option<&str>, &str, &IntlError) -> String + Send + Sync>;

/// Logs the error; fallbacks are warnings, everything else is an error.
pub fn log_error(error: &IntlError) {
    if error.code().is_fallback() {
        tracing::warn!(code = %error.code(), "{}", error);
    } else {
        tracing::error!(code = %error.code(), "{}", error);
    }
}

/// Returns the dotted path of the message.
pub fn path_fallback(namespace: Option<&str>, key: &str, _error: &IntlError) -> String {
    join_path(namespace, key)
}

/// Looks up and formats messages for one locale, optionally scoped to a namespace.
#[derive(Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    namespace: Option<String>,
    formats: Arc<BTreeMap<String, NumberFormat>>,
    on_error: ErrorHandler,
    fallback: MessageFallback,
    /// Parsed messages by full path, shared with namespaced copies.
    cache: Arc<RwLock<HashMap<String, Arc<Message>>>>,
}

impl Translator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            namespace: None,
            formats: Arc::new(BTreeMap::new()),
            on_error: Arc::new(log_error),
            fallback: Arc::new(path_fallback),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A translator using the named formats of `config`.
    pub fn from_config(config: &IntlConfig, catalog: Catalog) -> Self {
        Self::new(catalog).with_formats(config.formats.number.clone())
    }

    pub fn with_formats(mut self, formats: BTreeMap<String, NumberFormat>) -> Self {
        self.formats = Arc::new(formats);
        self
    }

    pub fn on_error(mut self, handler: impl Fn(&IntlError) + Send + Sync + 'static) -> Self {
        self.on_error = Arc::new(handler);
        self
    }

    pub fn message_fallback(
        mut self,
        fallback: impl Fn(Option<&str>, &str, &IntlError) -> String + Send + Sync + 'static,
    ) -> Self {
        self.fallback = Arc::new(fallback);
        self
    }

    /// Scope to `namespace`, nested below the current namespace if there is one.
    pub fn with_namespace(&self, namespace: &str) -> Self {
        let mut scoped = self.clone();
        scoped.namespace = Some(join_path(self.namespace.as_deref(), namespace));
        scoped
    }

    pub fn locale(&self) -> &str {
        self.catalog.locale()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Hand an error to the error handler.
    pub fn report(&self, error: &IntlError) {
        (self.on_error)(error);
    }

    /// Translate `key`. Never fails: errors go to the error handler and the
    /// message fallback is returned instead.
    pub fn t(&self, key: &str, args: &FormatArgs) -> String {
        match self.try_t(key, args) {
            Ok(text) => text,
            Err(error) => {
                self.report(&error);
                (self.fallback)(self.namespace(), key, &error)
            }
        }
    }

    /// Translate `key`, returning the error instead of a fallback.
    pub fn try_t(&self, key: &str, args: &FormatArgs) -> Result<String> {
        let message = self.parsed(key)?;
        format::format(&message, args, &self.formats)
    }

    /// The unformatted message source.
    pub fn raw(&self, key: &str) -> Result<&str> {
        self.catalog.resolve(self.namespace(), key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.catalog.has(&join_path(self.namespace(), key))
    }

    fn parsed(&self, key: &str) -> Result<Arc<Message>> {
        let path = join_path(self.namespace(), key);
        if let Some(message) = self.cache.read().get(&path) {
            return Ok(Arc::clone(message));
        }

        let message = Arc::new(format::parse(self.raw(key)?)?);
        tracing::trace!(path = %path, "cached parsed message");
        self.cache.write().insert(path, Arc::clone(&message));
        Ok(message)
    }
}
