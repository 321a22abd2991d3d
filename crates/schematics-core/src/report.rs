//! Aggregated, localizable validation errors
//!
//! An [`ErrorSet`] collects [`ErrorEntry`] values keyed by target (or, for
//! array validation, by element identifier). Entries for the same key
//! accumulate; rendering to user-facing text happens at query time via
//! [`ErrorSet::get_strings`] with a caller-supplied template.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Key used for structural errors that concern the whole input rather than
/// a single field.
pub const WHOLE_DATA: &str = "whole-data";

/// One failing target/value pair with locale-indexed messages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorEntry {
    /// Concrete matched path of the failing value (the target key itself
    /// for structural and required-field errors).
    pub path: String,
    /// The failing value, when one was bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Name of the validator/operator responsible.
    pub validator: String,
    /// Locale → human message.
    pub messages: IndexMap<String, String>,
    /// Locale → display-name override for the field.
    pub display_names: IndexMap<String, String>,
}

impl ErrorEntry {
    pub fn new(path: impl Into<String>, validator: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            validator: validator.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_message(mut self, locale: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_message(locale, message);
        self
    }

    pub fn add_message(&mut self, locale: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(locale.into(), message.into());
    }

    pub fn add_display_name(&mut self, locale: impl Into<String>, name: impl Into<String>) {
        self.display_names.insert(locale.into(), name.into());
    }

    /// Message for the requested locale, falling back to the first message
    /// attached when the locale has no entry.
    pub fn message_for(&self, locale: &str) -> Option<&str> {
        self.messages
            .get(locale)
            .or_else(|| self.messages.values().next())
            .map(String::as_str)
    }
}

/// Per-key error collection; keys are target keys for object validation and
/// element identifiers for array validation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorSet {
    entries: IndexMap<String, Vec<ErrorEntry>>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set holding a single whole-data structural error, filed
    /// under the caller's locale.
    pub fn whole_data(
        validator: impl Into<String>,
        message: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        let mut set = Self::new();
        set.add(
            WHOLE_DATA,
            ErrorEntry::new(WHOLE_DATA, validator).with_message(locale, message),
        );
        set
    }

    pub fn add(&mut self, key: impl Into<String>, entry: ErrorEntry) {
        self.entries.entry(key.into()).or_default().push(entry);
    }

    /// Merge another set into this one, accumulating entries per key.
    pub fn merge(&mut self, other: ErrorSet) {
        for (key, entries) in other.entries {
            self.entries.entry(key).or_default().extend(entries);
        }
    }

    /// Merge another set's entries under a single key, discarding its own
    /// keys. Used by array validation to key per-element error sets by the
    /// element identifier.
    pub fn merge_under(&mut self, key: impl Into<String>, other: ErrorSet) {
        let bucket = self.entries.entry(key.into()).or_default();
        for (_, entries) in other.entries {
            bucket.extend(entries);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.entries.values().any(|entries| !entries.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        !self.has_errors()
    }

    /// Number of keys carrying at least one entry.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|entries| !entries.is_empty())
            .count()
    }

    pub fn get(&self, key: &str) -> Option<&Vec<ErrorEntry>> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<ErrorEntry>)> {
        self.entries.iter()
    }

    /// Render all entries for the requested locale.
    ///
    /// Template placeholders: `%target` (the entry's key), `%message`,
    /// `%validator`, and `%value` (JSON-rendered failing value).
    pub fn get_strings(&self, locale: &str, template: &str) -> Vec<String> {
        let mut out = Vec::new();
        for (key, entries) in &self.entries {
            for entry in entries {
                let message = entry.message_for(locale).unwrap_or("");
                let value = entry
                    .value
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                out.push(
                    template
                        .replace("%target", key)
                        .replace("%validator", &entry.validator)
                        .replace("%message", message)
                        .replace("%value", &value),
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entries_accumulate_per_key() {
        let mut set = ErrorSet::new();
        set.add("age", ErrorEntry::new("age", "IsNumber").with_message("en", "not a number"));
        set.add("age", ErrorEntry::new("age", "MinAllowed").with_message("en", "too small"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("age").unwrap().len(), 2);
    }

    #[test]
    fn test_get_strings_substitutes_placeholders() {
        let mut set = ErrorSet::new();
        set.add(
            "name",
            ErrorEntry::new("name", "IsString")
                .with_value(json!(42))
                .with_message("en", "must be a string"),
        );
        let rendered = set.get_strings("en", "%target: %message (%validator)");
        assert_eq!(rendered, vec!["name: must be a string (IsString)"]);
    }

    #[test]
    fn test_locale_fallback_to_first_message() {
        let mut entry = ErrorEntry::new("name", "IsString");
        entry.add_message("en", "must be a string");
        entry.add_message("de", "muss eine Zeichenkette sein");
        assert_eq!(entry.message_for("de"), Some("muss eine Zeichenkette sein"));
        assert_eq!(entry.message_for("fr"), Some("must be a string"));
    }

    #[test]
    fn test_merge_under_keys_by_identifier() {
        let mut per_element = ErrorSet::new();
        per_element.add("name", ErrorEntry::new("name", "IsString").with_message("en", "bad"));
        let mut merged = ErrorSet::new();
        merged.merge_under("row-0", per_element);
        assert_eq!(merged.len(), 1);
        assert!(merged.get("row-0").is_some());
        assert!(merged.get("name").is_none());
    }

    #[test]
    fn test_whole_data_constructor() {
        let set = ErrorSet::whole_data("validate-object", "data is not valid json", "en");
        assert!(set.has_errors());
        let strings = set.get_strings("en", "%message");
        assert_eq!(strings, vec!["data is not valid json"]);
    }

    #[test]
    fn test_whole_data_files_under_caller_locale() {
        let set = ErrorSet::whole_data("validate-object", "ungueltige Daten", "de");
        let entry = &set.get(WHOLE_DATA).unwrap()[0];
        assert!(entry.messages.contains_key("de"));
        assert!(!entry.messages.contains_key("en"));
    }
}
