//! Text direction of each locale.

use crate::i18n::Locale;
use serde::Serialize;
use std::fmt;

/// Left-to-right or right-to-left text flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value of the document `dir` attribute.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }

    pub const fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::Rtl)
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a locale to its text direction.
pub const fn direction_of(locale: Locale) -> TextDirection {
    match locale {
        Locale::English => TextDirection::Ltr,
        Locale::Arabic => TextDirection::Rtl,
    }
}

/// Font class applied to localized text, for scripts that need one.
pub fn script_font(locale: Locale) -> Option<&'static str> {
    locale.config().font_class
}
