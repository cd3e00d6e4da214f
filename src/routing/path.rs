//! Path decomposition shared by the resolver and the switcher.
//!
//! Paths have the shape `/{locale}{rest}` where the locale segment ends at the
//! first `/`, `?` or `#`. `rest` is kept byte-for-byte so that recomposing
//! with any locale preserves the sub-path, query and anchor exactly.

use crate::i18n::Locale;
use crate::routing::RouteError;
use std::fmt;

/// The locale-independent part of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePath {
    rest: String,
}

impl RoutePath {
    /// The route without the separator that follows the locale segment
    /// (`/en/services` gives `services`, `/en` gives an empty string).
    pub fn as_str(&self) -> &str {
        self.rest.strip_prefix('/').unwrap_or(&self.rest)
    }

    /// Everything after the locale segment, separator included.
    pub fn raw(&self) -> &str {
        &self.rest
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Sub-path without query or anchor (`contact` for `/en/contact?x=1#form`).
    pub fn sub_path(&self) -> &str {
        let route = self.as_str();
        let end = route.find(['?', '#']).unwrap_or(route.len());
        &route[..end]
    }

    pub fn query(&self) -> Option<&str> {
        let before_fragment = self.rest.split('#').next().unwrap_or_default();
        before_fragment.split_once('?').map(|(_, query)| query)
    }

    /// In-page anchor without the `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.rest.split_once('#').map(|(_, fragment)| fragment)
    }

    /// Recompose a full path under `locale`.
    pub fn with_locale(&self, locale: Locale) -> String {
        format!("/{}{}", locale.code(), self.rest)
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a path into its raw locale segment and the route after it.
///
/// Returns `None` when the path is not absolute or the first segment is empty.
/// The segment is not validated here.
pub fn split_locale(path: &str) -> Option<(&str, RoutePath)> {
    let after_slash = path.strip_prefix('/')?;
    let end = after_slash
        .find(['/', '?', '#'])
        .unwrap_or(after_slash.len());
    let (segment, rest) = after_slash.split_at(end);

    if segment.is_empty() {
        return None;
    }

    Some((
        segment,
        RoutePath {
            rest: rest.to_string(),
        },
    ))
}

/// Split a path and validate its locale segment.
pub fn decompose(path: &str) -> Result<(Locale, RoutePath), RouteError> {
    let (segment, route_path) = split_locale(path).ok_or_else(|| RouteError::UnsupportedLocale {
        segment: String::new(),
    })?;
    let locale = Locale::from_code(segment)?;
    Ok((locale, route_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== split_locale Tests ====================

    #[test]
    fn test_split_locale_with_sub_path() {
        let (segment, route) = split_locale("/en/services").unwrap();
        assert_eq!(segment, "en");
        assert_eq!(route.as_str(), "services");
        assert_eq!(route.raw(), "/services");
    }

    #[test]
    fn test_split_locale_bare_locale() {
        let (segment, route) = split_locale("/ar").unwrap();
        assert_eq!(segment, "ar");
        assert!(route.is_empty());
        assert_eq!(route.raw(), "");
    }

    #[test]
    fn test_split_locale_anchor_directly_after_locale() {
        let (segment, route) = split_locale("/en#contact").unwrap();
        assert_eq!(segment, "en");
        assert_eq!(route.fragment(), Some("contact"));
        assert_eq!(route.sub_path(), "");
    }

    #[test]
    fn test_split_locale_query_directly_after_locale() {
        let (segment, route) = split_locale("/ar?ref=nav").unwrap();
        assert_eq!(segment, "ar");
        assert_eq!(route.query(), Some("ref=nav"));
    }

    #[test]
    fn test_split_locale_rejects_relative_and_empty() {
        assert!(split_locale("").is_none());
        assert!(split_locale("en/services").is_none());
        assert!(split_locale("/").is_none());
        assert!(split_locale("//services").is_none());
        assert!(split_locale("/#contact").is_none());
    }

    #[test]
    fn test_split_locale_does_not_validate() {
        let (segment, _) = split_locale("/xx/services").unwrap();
        assert_eq!(segment, "xx");
    }

    // ==================== RoutePath Tests ====================

    #[test]
    fn test_route_path_parts() {
        let (_, route) = split_locale("/en/contact?source=hero#form").unwrap();
        assert_eq!(route.as_str(), "contact?source=hero#form");
        assert_eq!(route.sub_path(), "contact");
        assert_eq!(route.query(), Some("source=hero"));
        assert_eq!(route.fragment(), Some("form"));
    }

    #[test]
    fn test_route_path_question_mark_inside_fragment_is_not_query() {
        let (_, route) = split_locale("/en/about#faq?q").unwrap();
        assert_eq!(route.query(), None);
        assert_eq!(route.fragment(), Some("faq?q"));
    }

    #[test]
    fn test_with_locale_is_exact() {
        for path in ["/en", "/en/", "/en/services", "/en#home", "/en/a/b?c=d#e"] {
            let (_, route) = split_locale(path).unwrap();
            assert_eq!(route.with_locale(Locale::English), path);
        }
    }

    // ==================== decompose Tests ====================

    #[test]
    fn test_decompose_supported_locale() {
        let (locale, route) = decompose("/ar/about").unwrap();
        assert_eq!(locale, Locale::Arabic);
        assert_eq!(route.as_str(), "about");
    }

    #[test]
    fn test_decompose_unsupported_locale() {
        let err = decompose("/EN/about").unwrap_err();
        assert!(matches!(err, RouteError::UnsupportedLocale { ref segment } if segment == "EN"));
    }

    #[test]
    fn test_decompose_missing_locale() {
        assert!(matches!(
            decompose("/"),
            Err(RouteError::UnsupportedLocale { .. })
        ));
    }
}
