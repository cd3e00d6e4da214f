use crate::i18n::{script_font, I18nError, Locale, TextDirection, TranslationBundle};
use crate::routing::RoutePath;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Everything content consumers need for one resolved navigation.
///
/// Created once per navigation and never mutated; a new navigation produces a
/// new context.
#[derive(Debug, Clone)]
pub struct LocaleContext {
    locale: Locale,
    direction: TextDirection,
    route_path: RoutePath,
    bundle: Arc<TranslationBundle>,
}

impl LocaleContext {
    pub fn new(locale: Locale, route_path: RoutePath, bundle: Arc<TranslationBundle>) -> Self {
        Self {
            locale,
            direction: locale.direction(),
            route_path,
            bundle,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn route_path(&self) -> &RoutePath {
        &self.route_path
    }

    pub fn bundle(&self) -> &Arc<TranslationBundle> {
        &self.bundle
    }

    /// Font class for localized text, if the locale's script needs one.
    pub fn font_class(&self) -> Option<&'static str> {
        script_font(self.locale)
    }

    /// The full path this context was resolved from.
    pub fn path(&self) -> String {
        self.route_path.with_locale(self.locale)
    }

    /// Translated string for `key`.
    pub fn t(&self, key: &str) -> Result<&str, I18nError> {
        self.bundle.text(key)
    }

    /// Raw node for `key` (lists, sub-trees).
    pub fn raw(&self, key: &str) -> Result<&Value, I18nError> {
        self.bundle.raw(key)
    }

    /// Ordered list for `key`, deserialized entry by entry.
    pub fn list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, I18nError> {
        self.bundle.list(key)
    }
}
