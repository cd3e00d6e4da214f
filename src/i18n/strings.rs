use crate::i18n::Locale;

/// Shell strings that must render without a translation bundle.
///
/// The not-found page is shown precisely when a bundle could not be resolved,
/// so its text cannot come from one.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    /// Heading of the not-found page
    pub not_found_title: &'static str,

    /// Explanation shown below the heading
    pub not_found_message: &'static str,

    /// Label of the link back to this locale's home page
    pub home_link: &'static str,

    /// Accessible label of the language switch button
    pub switch_language: &'static str,
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    not_found_title: "Page not found",
    not_found_message: "The page you are looking for does not exist or is not available in this language.",
    home_link: "Go to the English site",
    switch_language: "Switch language",
};

// ==================== Arabic Strings ====================

pub const ARABIC_STRINGS: LocaleStrings = LocaleStrings {
    not_found_title: "الصفحة غير موجودة",
    not_found_message: "الصفحة التي تبحث عنها غير موجودة أو غير متاحة بهذه اللغة.",
    home_link: "الانتقال إلى الموقع العربي",
    switch_language: "تغيير اللغة",
};

impl LocaleStrings {
    pub fn for_locale(locale: Locale) -> &'static LocaleStrings {
        match locale {
            Locale::English => &ENGLISH_STRINGS,
            Locale::Arabic => &ARABIC_STRINGS,
        }
    }
}
