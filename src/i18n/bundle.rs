//! Translation bundles: the immutable content tree for one locale.

use crate::i18n::{I18nError, Locale};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// All translated content for one locale.
///
/// Keys are dotted paths into the JSON tree (e.g. `"about.stats.years.label"`).
/// Leaves are strings or ordered lists (plain strings or structured records).
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationBundle {
    locale: Locale,
    root: Value,
}

impl TranslationBundle {
    /// Parse a bundle from raw JSON. The root must be an object.
    pub fn from_json(locale: Locale, raw: &str) -> Result<Self, I18nError> {
        let root: Value =
            serde_json::from_str(raw).map_err(|source| I18nError::Malformed { locale, source })?;
        if !root.is_object() {
            return Err(I18nError::NotAnObject { locale });
        }
        Ok(Self { locale, root })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The whole content tree, e.g. for embedding in a page.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Look up a string leaf.
    pub fn text(&self, key: &str) -> Result<&str, I18nError> {
        self.raw(key)?
            .as_str()
            .ok_or_else(|| I18nError::WrongType {
                key: key.to_string(),
                expected: "string",
            })
    }

    /// Look up any node (string, list or sub-tree).
    pub fn raw(&self, key: &str) -> Result<&Value, I18nError> {
        self.node(key).ok_or_else(|| I18nError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Look up an ordered list and deserialize each entry.
    pub fn list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, I18nError> {
        let items = self
            .raw(key)?
            .as_array()
            .ok_or_else(|| I18nError::WrongType {
                key: key.to_string(),
                expected: "list",
            })?;

        items
            .iter()
            .map(|item| {
                T::deserialize(item).map_err(|_| I18nError::WrongType {
                    key: key.to_string(),
                    expected: "list of the requested record type",
                })
            })
            .collect()
    }

    fn node(&self, key: &str) -> Option<&Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.')
            .try_fold(&self.root, |node, segment| node.as_object()?.get(segment))
    }
}
