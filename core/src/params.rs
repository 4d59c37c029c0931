//! Query parameters for a single API call.

use serde::Serialize;
use url::form_urlencoded;

use crate::types::{clamp_priority, ItemFields};

/// Ordered flat `key=value` pairs, encoded as
/// `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    pub fn push_opt(&mut self, key: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Add `values` as a single JSON array literal, e.g. `ids=[1,2,3]`.
    pub fn with_list<T: Serialize>(mut self, key: &str, values: &[T]) -> Self {
        // Slices of ids and strings always serialize.
        let literal = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
        self.0.push((key.to_string(), literal));
        self
    }

    /// Add the `content`, `date_string` and clamped `priority` fields of an item.
    pub fn with_item(mut self, item: &ItemFields) -> Self {
        self.push("content", &item.content);
        self.push_opt("date_string", item.date_string.as_ref());
        self.push_opt("priority", item.priority.map(clamp_priority));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.0)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_pairs_in_insertion_order() {
        let params = Params::new().with("project_id", 42).with("token", "abc");
        assert_eq!(params.encode(), "project_id=42&token=abc");
    }

    #[test]
    fn list_is_a_json_array_literal() {
        let params = Params::new().with_list("ids", &[1u64, 2, 3]);
        assert_eq!(params.get("ids"), Some("[1,2,3]"));
        assert_eq!(params.encode(), "ids=%5B1%2C2%2C3%5D");
    }

    #[test]
    fn string_list_is_quoted() {
        let params = Params::new().with_list("queries", &["today", "p1"]);
        assert_eq!(params.get("queries"), Some(r#"["today","p1"]"#));
    }

    #[test]
    fn item_fields_skip_missing_options() {
        let params = Params::new().with_item(&ItemFields::new("Call mom"));
        assert_eq!(params.get("content"), Some("Call mom"));
        assert_eq!(params.get("date_string"), None);
        assert_eq!(params.get("priority"), None);
    }

    #[test]
    fn item_priority_is_clamped() {
        let params = Params::new().with_item(&ItemFields::new("x").priority(9));
        assert_eq!(params.get("priority"), Some("4"));
    }

    #[test]
    fn spaces_and_symbols_are_escaped() {
        let params = Params::new().with("content", "milk & eggs");
        assert_eq!(params.encode(), "content=milk+%26+eggs");
    }
}
