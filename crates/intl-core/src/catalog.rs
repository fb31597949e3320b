//! Nested message catalogs for a single locale.

use serde_json::{Map, Value};

use intl_error::{IntlError, Result};

/// Joins a namespace and a key into a dotted message path.
pub fn join_path(namespace: Option<&str>, key: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}.{key}"),
        _ => key.to_string(),
    }
}

/// A validated message tree: every key is free of `.` and every leaf is a string.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    locale: String,
    root: Map<String, Value>,
}

impl Catalog {
    pub fn from_json_str(locale: impl Into<String>, source: &str) -> Result<Self> {
        let locale = locale.into();
        let value: Value = serde_json::from_str(source).map_err(|e| {
            IntlError::invalid_message(format!(
                "messages for locale `{}` are not valid JSON",
                locale
            ))
            .set_source(e)
        })?;
        Self::from_value(locale, value)
    }

    pub fn from_value(locale: impl Into<String>, value: Value) -> Result<Self> {
        let locale = locale.into();
        let Value::Object(root) = value else {
            return Err(IntlError::invalid_message(format!(
                "messages for locale `{}` must be an object",
                locale
            )));
        };

        let mut invalid_keys = Vec::new();
        let mut bad_leaves = Vec::new();
        check_tree(&root, "", &mut invalid_keys, &mut bad_leaves);

        if !invalid_keys.is_empty() {
            return Err(IntlError::invalid_key(format!(
                "Namespace keys must be non-empty and can not contain the character \".\" as it is used to express nesting. Invalid keys: {}",
                invalid_keys.join(", ")
            )));
        }
        if !bad_leaves.is_empty() {
            return Err(IntlError::invalid_message(format!(
                "messages must be strings or objects, found other values at: {}",
                bad_leaves.join(", ")
            )));
        }

        Ok(Self { locale, root })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Look up the message at `namespace.key`.
    pub fn resolve(&self, namespace: Option<&str>, key: &str) -> Result<&str> {
        let path = join_path(namespace, key);
        match self.lookup(&path)? {
            Value::String(message) => Ok(message),
            _ => Err(IntlError::insufficient_path(format!(
                "Message at `{}` resolved to an object, but only strings are supported. Use a `.` to retrieve nested messages.",
                path
            ))),
        }
    }

    /// The sub-tree for a namespace.
    pub fn namespace(&self, namespace: &str) -> Result<&Map<String, Value>> {
        match self.lookup(namespace)? {
            Value::Object(map) => Ok(map),
            _ => Err(IntlError::insufficient_path(format!(
                "Namespace `{}` resolved to a message, not a group of messages.",
                namespace
            ))),
        }
    }

    pub fn has(&self, path: &str) -> bool {
        matches!(self.lookup(path), Ok(Value::String(_)))
    }

    /// Every message path in dotted form, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaves(&self.root, "", &mut keys);
        keys.sort();
        keys
    }

    /// Message paths present in `other` that this catalog lacks.
    pub fn missing_from(&self, other: &Catalog) -> Vec<String> {
        other
            .keys()
            .into_iter()
            .filter(|path| !self.has(path))
            .collect()
    }

    fn lookup(&self, path: &str) -> Result<&Value> {
        let mut segments = path.split('.');
        let mut current = segments
            .next()
            .and_then(|first| self.root.get(first))
            .ok_or_else(|| self.missing(path))?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment).ok_or_else(|| self.missing(path))?,
                _ => return Err(self.missing(path)),
            };
        }
        Ok(current)
    }

    fn missing(&self, path: &str) -> IntlError {
        IntlError::missing_message(format!(
            "Could not resolve `{}` in messages for locale `{}`.",
            path, self.locale
        ))
    }
}

fn check_tree(
    map: &Map<String, Value>,
    prefix: &str,
    invalid_keys: &mut Vec<String>,
    bad_leaves: &mut Vec<String>,
) {
    for (key, value) in map {
        let path = join_path(Some(prefix), key);
        if key.is_empty() || key.contains('.') {
            invalid_keys.push(format!("`{}`", path));
        }
        match value {
            Value::Object(child) => check_tree(child, &path, invalid_keys, bad_leaves),
            Value::String(_) => {}
            _ => bad_leaves.push(path),
        }
    }
}

fn collect_leaves(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = join_path(Some(prefix), key);
        match value {
            Value::Object(child) => collect_leaves(child, &path, out),
            _ => out.push(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intl_error::IntlErrorCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::from_value(
            "en",
            json!({
                "Index": {
                    "title": "Hello world!",
                    "nav": { "home": "Home", "about": "About" }
                },
                "greeting": "Hi {name}"
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve() {
        let c = catalog();
        assert_eq!(c.resolve(Some("Index"), "title").unwrap(), "Hello world!");
        assert_eq!(c.resolve(Some("Index"), "nav.home").unwrap(), "Home");
        assert_eq!(c.resolve(None, "Index.nav.about").unwrap(), "About");
        assert_eq!(c.resolve(None, "greeting").unwrap(), "Hi {name}");
    }

    #[test]
    fn test_resolve_missing() {
        let err = catalog().resolve(Some("Index"), "subtitle").unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::MissingMessage);
        assert_eq!(
            err.message(),
            "MISSING_MESSAGE: Could not resolve `Index.subtitle` in messages for locale `en`."
        );

        let err = catalog().resolve(None, "greeting.deeper").unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::MissingMessage);
    }

    #[test]
    fn test_resolve_insufficient_path() {
        let err = catalog().resolve(Some("Index"), "nav").unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::InsufficientPath);
        assert!(err.message().contains("`Index.nav`"));
    }

    #[test]
    fn test_namespace() {
        let c = catalog();
        assert_eq!(c.namespace("Index.nav").unwrap().len(), 2);
        assert_eq!(
            c.namespace("greeting").unwrap_err().code(),
            IntlErrorCode::InsufficientPath
        );
        assert_eq!(
            c.namespace("Missing").unwrap_err().code(),
            IntlErrorCode::MissingMessage
        );
    }

    #[test]
    fn test_invalid_keys_are_all_reported() {
        let err = Catalog::from_value(
            "en",
            json!({ "a.b": "x", "nested": { "c.d": "y", "ok": "z" } }),
        )
        .unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::InvalidKey);
        assert!(err.message().contains("a.b"));
        assert!(err.message().contains("nested.c.d"));
    }

    #[test]
    fn test_empty_keys_are_rejected() {
        let err = Catalog::from_value("en", json!({ "": { "x": "y" } })).unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::InvalidKey);

        let err = Catalog::from_value("en", json!({ "Index": { "": "y" } })).unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::InvalidKey);
        assert!(err.message().contains("`Index.`"), "{}", err.message());
    }

    #[test]
    fn test_non_string_leaf() {
        let err = Catalog::from_value("en", json!({ "count": 3 })).unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::InvalidMessage);

        let err = Catalog::from_value("en", json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::InvalidMessage);
    }

    #[test]
    fn test_from_json_str_reports_parse_error() {
        let err = Catalog::from_json_str("de", "{ not json").unwrap_err();
        assert_eq!(err.code(), IntlErrorCode::InvalidMessage);
        assert!(err.source_ref().is_some());
    }

    #[test]
    fn test_keys_and_missing_from() {
        let en = catalog();
        assert_eq!(
            en.keys(),
            vec!["Index.nav.about", "Index.nav.home", "Index.title", "greeting"]
        );

        let de = Catalog::from_value(
            "de",
            json!({ "Index": { "title": "Hallo Welt!", "nav": { "home": "Start" } } }),
        )
        .unwrap();
        assert_eq!(de.missing_from(&en), vec!["Index.nav.about", "greeting"]);
        assert!(en.missing_from(&de).is_empty());
    }
}
