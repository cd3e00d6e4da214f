//! Bundle completeness validation.
//!
//! Compares a locale's bundle against the canonical bundle so missing or
//! mistyped keys show up at startup instead of as a failed lookup on a page.

use crate::i18n::TranslationBundle;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys that content consumers will fail on
    pub errors: Vec<String>,

    /// Differences that render, but probably not as intended
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for bundle completeness against the canonical bundle.
pub struct BundleValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl BundleValidator {
    /// Validate that `candidate` provides every key of `canonical` with the
    /// same shape.
    ///
    /// Errors:
    /// - a canonical key is missing
    /// - a key holds a different kind of value (string vs list vs object)
    ///
    /// Warnings:
    /// - a key exists only in the candidate
    /// - a list has a different number of entries
    /// - a string uses different `{placeholder}` names
    /// - a string is empty
    pub fn validate(canonical: &TranslationBundle, candidate: &TranslationBundle) -> ValidationReport {
        let mut report = ValidationReport::new();
        Self::compare("", canonical.as_value(), candidate.as_value(), &mut report);
        report
    }

    fn compare(key: &str, expected: &Value, actual: &Value, report: &mut ValidationReport) {
        match (expected, actual) {
            (Value::Object(expected_map), Value::Object(actual_map)) => {
                for (name, expected_child) in expected_map {
                    let child_key = join_key(key, name);
                    match actual_map.get(name) {
                        Some(actual_child) => {
                            Self::compare(&child_key, expected_child, actual_child, report)
                        }
                        None => report.errors.push(format!("Missing key '{}'", child_key)),
                    }
                }
                for name in actual_map.keys() {
                    if !expected_map.contains_key(name) {
                        report
                            .warnings
                            .push(format!("Unexpected key '{}'", join_key(key, name)));
                    }
                }
            }
            (Value::Array(expected_items), Value::Array(actual_items)) => {
                if expected_items.len() != actual_items.len() {
                    report.warnings.push(format!(
                        "List length mismatch at '{}': canonical has {}, bundle has {}",
                        key,
                        expected_items.len(),
                        actual_items.len()
                    ));
                }
                for (index, (expected_item, actual_item)) in
                    expected_items.iter().zip(actual_items).enumerate()
                {
                    Self::compare(&format!("{}[{}]", key, index), expected_item, actual_item, report);
                }
            }
            (Value::String(expected_text), Value::String(actual_text)) => {
                if actual_text.trim().is_empty() && !expected_text.trim().is_empty() {
                    report.warnings.push(format!("Empty string at '{}'", key));
                }
                let expected_placeholders = Self::extract_placeholders(expected_text);
                let actual_placeholders = Self::extract_placeholders(actual_text);
                if expected_placeholders != actual_placeholders {
                    report.warnings.push(format!(
                        "Placeholder mismatch at '{}': canonical has {:?}, bundle has {:?}",
                        key, expected_placeholders, actual_placeholders
                    ));
                }
            }
            _ if kind_of(expected) == kind_of(actual) => {}
            _ => report.errors.push(format!(
                "Type mismatch at '{}': expected {}, found {}",
                display_key(key),
                kind_of(expected),
                kind_of(actual)
            )),
        }
    }

    /// Extract `{name}` placeholders from text
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

fn join_key(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn display_key(key: &str) -> &str {
    if key.is_empty() {
        "<root>"
    } else {
        key
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
