//! Picking the locale for a request.

use intl_error::IntlError;

use crate::config::IntlConfig;

/// The locale chosen for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMatch {
    pub locale: String,
    /// True when nothing the caller asked for was supported and the default
    /// locale was used instead.
    pub fell_back: bool,
    requested: Option<String>,
}

impl LocaleMatch {
    /// The ENVIRONMENT_FALLBACK error describing this match, if a fallback happened.
    pub fn fallback_error(&self) -> Option<IntlError> {
        if !self.fell_back {
            return None;
        }
        let detail = match &self.requested {
            Some(requested) => format!(
                "locale `{}` is not supported, falling back to `{}`",
                requested, self.locale
            ),
            None => format!(
                "no locale was requested, falling back to `{}`",
                self.locale
            ),
        };
        Some(IntlError::environment_fallback(detail))
    }
}

/// Parse an `Accept-Language` header into tags ordered by preference.
///
/// Entries with `q=0` or an unparsable weight are dropped. Entries of
/// equal weight keep header order.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(f32, usize, String)> = Vec::new();

    for (index, entry) in header.split(',').enumerate() {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or("").trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }

        let mut quality = Some(1.0f32);
        for param in parts {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            if name.trim().eq_ignore_ascii_case("q") {
                quality = value
                    .trim()
                    .parse::<f32>()
                    .ok()
                    .filter(|q| (0.0..=1.0).contains(q));
            }
        }

        match quality {
            Some(q) if q > 0.0 => weighted.push((q, index, tag.to_string())),
            _ => {}
        }
    }

    weighted.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    weighted.into_iter().map(|(_, _, tag)| tag).collect()
}

fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

fn find_exact<'a>(config: &'a IntlConfig, tag: &str) -> Option<&'a str> {
    config
        .locales
        .iter()
        .find(|l| l.eq_ignore_ascii_case(tag))
        .map(String::as_str)
}

fn find_by_language<'a>(config: &'a IntlConfig, tag: &str) -> Option<&'a str> {
    let wanted = primary_subtag(tag);
    config
        .locales
        .iter()
        .find(|l| primary_subtag(l).eq_ignore_ascii_case(wanted))
        .map(String::as_str)
}

/// Choose a locale from an explicit request and/or an `Accept-Language` header.
///
/// An explicit request only matches exactly. Header entries are tried in
/// preference order, each matching exactly or else by primary language
/// subtag. Anything else falls back to the default locale.
pub fn negotiate(
    config: &IntlConfig,
    requested: Option<&str>,
    accept_language: Option<&str>,
) -> LocaleMatch {
    if let Some(locale) = requested.and_then(|r| find_exact(config, r)) {
        return LocaleMatch {
            locale: locale.to_string(),
            fell_back: false,
            requested: requested.map(str::to_string),
        };
    }

    let accepted = accept_language.map(parse_accept_language).unwrap_or_default();
    let header_match = accepted
        .iter()
        .find_map(|tag| find_exact(config, tag).or_else(|| find_by_language(config, tag)));

    if let Some(locale) = header_match {
        tracing::trace!(locale, "negotiated locale from accept-language");
        return LocaleMatch {
            locale: locale.to_string(),
            fell_back: requested.is_some(),
            requested: requested.map(str::to_string),
        };
    }

    let requested = requested
        .map(str::to_string)
        .or_else(|| accepted.first().cloned());
    LocaleMatch {
        locale: config.default_locale.clone(),
        fell_back: true,
        requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intl_error::IntlErrorCode;
    use pretty_assertions::assert_eq;

    fn config() -> IntlConfig {
        IntlConfig::new(&["en", "de", "pt-BR"], "en").unwrap()
    }

    #[test]
    fn test_parse_accept_language_orders_by_quality() {
        let tags = parse_accept_language("fr;q=0.5, de-AT, en;q=0.8, *;q=0.1");
        assert_eq!(tags, vec!["de-AT", "en", "fr"]);
    }

    #[test]
    fn test_parse_accept_language_drops_zero_and_garbage() {
        let tags = parse_accept_language("de;q=0, en;q=abc, it, es;q=1.5");
        assert_eq!(tags, vec!["it"]);
    }

    #[test]
    fn test_parse_accept_language_weight_name_is_case_insensitive() {
        let tags = parse_accept_language("de;Q=0, en; q = 0.5, fr;q=0.9");
        assert_eq!(tags, vec!["fr", "en"]);

        let tags = parse_accept_language("it; Q = nope, es;Q=0.3");
        assert_eq!(tags, vec!["es"]);
    }

    #[test]
    fn test_parse_accept_language_keeps_order_for_ties() {
        let tags = parse_accept_language("it, fr, es");
        assert_eq!(tags, vec!["it", "fr", "es"]);
    }

    #[test]
    fn test_requested_locale_wins() {
        let m = negotiate(&config(), Some("DE"), Some("en"));
        assert_eq!(m.locale, "de");
        assert!(!m.fell_back);
        assert!(m.fallback_error().is_none());
    }

    #[test]
    fn test_header_matches_by_language() {
        let m = negotiate(&config(), None, Some("de-AT,de;q=0.9"));
        assert_eq!(m.locale, "de");
        assert!(!m.fell_back);

        let m = negotiate(&config(), None, Some("pt-PT"));
        assert_eq!(m.locale, "pt-BR");
    }

    #[test]
    fn test_header_tags_are_tried_in_preference_order() {
        let m = negotiate(&config(), None, Some("fr, en;q=0.8, de-AT;q=0.9"));
        assert_eq!(m.locale, "de");

        let m = negotiate(&config(), None, Some("PT-br;q=0.5, es"));
        assert_eq!(m.locale, "pt-BR");
    }

    #[test]
    fn test_unsupported_request_falls_back() {
        let m = negotiate(&config(), Some("fr"), None);
        assert_eq!(m.locale, "en");
        assert!(m.fell_back);

        let err = m.fallback_error().unwrap();
        assert_eq!(err.code(), IntlErrorCode::EnvironmentFallback);
        assert_eq!(
            err.message(),
            "ENVIRONMENT_FALLBACK: locale `fr` is not supported, falling back to `en`"
        );
    }

    #[test]
    fn test_nothing_requested_falls_back() {
        let m = negotiate(&config(), None, None);
        assert_eq!(m.locale, "en");
        assert!(m.fell_back);
        assert!(m.fallback_error().unwrap().message().contains("no locale"));
    }
}
