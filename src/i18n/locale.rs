//! Locale type: the closed set of locales the site is published in.
//!
//! A `Locale` can only be obtained from a code that exactly matches one of the
//! supported codes, so holding one is proof that the locale was validated.

use crate::i18n::{direction_of, LocaleConfig, LocaleRegistry, TextDirection};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Locale {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

/// Returned when a candidate code is not one of the supported locales.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale '{code}'")]
pub struct UnsupportedLocale {
    pub code: String,
}

impl Locale {
    /// Every supported locale, in registry order.
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Arabic];

    /// The locale all other bundles are validated against.
    pub const CANONICAL: Locale = Locale::English;

    /// Create a Locale from a path segment.
    ///
    /// Matching is exact and case-sensitive: "EN", "en-US" and " en" are all
    /// rejected.
    pub fn from_code(code: &str) -> Result<Locale, UnsupportedLocale> {
        LocaleRegistry::get()
            .get_by_code(code)
            .map(|config| config.locale)
            .ok_or_else(|| UnsupportedLocale {
                code: code.to_string(),
            })
    }

    /// The code used as the first path segment (e.g., "en", "ar").
    pub const fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Arabic => "ar",
        }
    }

    pub(crate) const fn index(&self) -> usize {
        match self {
            Locale::English => 0,
            Locale::Arabic => 1,
        }
    }

    /// Get the display metadata for this locale.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get().config(*self)
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language (used as the switch button label).
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the canonical locale.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }

    /// Text direction of this locale.
    pub fn direction(&self) -> TextDirection {
        direction_of(*self)
    }

    /// The locale the site's single language button switches to.
    pub const fn toggle(&self) -> Locale {
        match self {
            Locale::English => Locale::Arabic,
            Locale::Arabic => Locale::English,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s)
    }
}

/// Check whether `candidate` is exactly one of the supported locale codes.
pub fn is_supported(candidate: &str) -> bool {
    Locale::from_code(candidate).is_ok()
}
