//! Locale registry: Single source of truth for all supported locales.
//!
//! The set of locales is closed (see [`Locale`]); this registry only carries
//! the display metadata for each of them. It uses a singleton pattern with
//! `OnceLock` so the table is built once and shared read-only afterwards.

use crate::i18n::Locale;
use std::sync::OnceLock;

/// Display metadata for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// The locale this entry describes
    pub locale: Locale,

    /// Locale code as it appears in the first path segment (e.g., "en", "ar")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Arabic")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "العربية")
    pub native_name: &'static str,

    /// Short label for the compact (mobile) language switch button
    pub short_label: &'static str,

    /// Script-specific font class applied to text in this locale, if any
    pub font_class: Option<&'static str>,

    /// Whether this is the canonical locale that other bundles are checked against
    pub is_canonical: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: Locale::ALL.iter().map(|&locale| config_for(locale)).collect(),
        })
    }

    /// Get the configuration of a locale.
    ///
    /// Every [`Locale`] has an entry by construction, so this lookup is total.
    pub fn config(&self, locale: Locale) -> &LocaleConfig {
        &self.locales[locale.index()]
    }

    /// Get a locale configuration by its path code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the code names a supported locale (exact match)
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|config| config.code == code)
    }

    /// Get all locale configurations, in [`Locale::ALL`] order.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the canonical locale configuration.
    pub fn canonical(&self) -> &LocaleConfig {
        self.config(Locale::CANONICAL)
    }
}

/// Static metadata for each supported locale.
fn config_for(locale: Locale) -> LocaleConfig {
    match locale {
        Locale::English => LocaleConfig {
            locale,
            code: locale.code(),
            name: "English",
            native_name: "English",
            short_label: "EN",
            font_class: None,
            is_canonical: true,
        },
        Locale::Arabic => LocaleConfig {
            locale,
            code: locale.code(),
            name: "Arabic",
            native_name: "العربية",
            short_label: "ع",
            font_class: Some("font-arabic"),
            is_canonical: false,
        },
    }
}
