use crate::i18n::{I18nError, Locale, UnsupportedLocale};
use thiserror::Error;

/// Why a path could not be resolved. Both variants are shown as "not found".
#[derive(Debug, Error)]
pub enum RouteError {
    /// The first path segment is missing or not a supported locale.
    #[error("unsupported locale segment '{segment}'")]
    UnsupportedLocale { segment: String },

    /// The locale is supported but its bundle could not be loaded.
    #[error("could not load the {locale} bundle")]
    BundleLoadFailure {
        locale: Locale,
        #[source]
        source: I18nError,
    },
}

impl RouteError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::UnsupportedLocale { .. } => "unsupported_locale",
            RouteError::BundleLoadFailure { .. } => "bundle_load_failure",
        }
    }
}

impl From<UnsupportedLocale> for RouteError {
    fn from(err: UnsupportedLocale) -> Self {
        RouteError::UnsupportedLocale { segment: err.code }
    }
}
