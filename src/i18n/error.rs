use crate::i18n::Locale;
use thiserror::Error;

/// Errors raised while loading or reading translation bundles.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("no message bundle found for locale '{locale}'")]
    SourceNotFound { locale: Locale },

    #[error("failed to fetch message bundle for locale '{locale}': {message}")]
    Source { locale: Locale, message: String },

    #[error("message bundle for locale '{locale}' is not valid JSON")]
    Malformed {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },

    #[error("message bundle for locale '{locale}' must be a JSON object")]
    NotAnObject { locale: Locale },

    #[error("missing translation key '{key}'")]
    MissingKey { key: String },

    #[error("translation key '{key}' is not a {expected}")]
    WrongType { key: String, expected: &'static str },
}
