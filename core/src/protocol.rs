//! Sentinel-string classification.
//!
//! # Design
//! The service answers some failures with a bare JSON string in place of the
//! payload, and the vocabulary differs per method. Each operation owns a table
//! mapping its sentinels to error kinds, and `classify` turns a decoded value
//! into a `Reply` against that table so call sites never compare strings.

use serde_json::Value;

use crate::error::ServiceErrorKind;

/// `login` answers this when the credentials are wrong.
pub const LOGIN_ERROR: &str = "LOGIN_ERROR";

/// Sentinels answered by `register`. The service historically spells the
/// first one without the second E, so both spellings are accepted.
pub const REGISTER_SENTINELS: &[(&str, ServiceErrorKind)] = &[
    ("ALREADY_REGISTERED", ServiceErrorKind::AlreadyRegistered),
    ("ALREADY_REGISTRED", ServiceErrorKind::AlreadyRegistered),
    ("TOO_SHORT_PASSWORD", ServiceErrorKind::PasswordTooShort),
    ("INVALID_EMAIL", ServiceErrorKind::InvalidEmail),
    ("INVALID_TIMEZONE", ServiceErrorKind::InvalidTimezone),
    ("INVALID_FULL_NAME", ServiceErrorKind::InvalidFullName),
];

/// Sentinels answered by the item write methods.
pub const WRITE_SENTINELS: &[(&str, ServiceErrorKind)] = &[
    ("ERROR_PROJECT_NOT_FOUND", ServiceErrorKind::ProjectNotFound),
    ("ERROR_ITEM_NOT_FOUND", ServiceErrorKind::ItemNotFound),
    ("ERROR_WRONG_DATE_SYNTAX", ServiceErrorKind::WrongDateSyntax),
];

/// A decoded payload, interpreted against one operation's sentinel table.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<K> {
    /// Not a string: legitimate data.
    Data(Value),
    /// A string found in the table.
    Rejected(K),
    /// A string not found in the table. Whether this is data or an error is
    /// up to the operation.
    Unrecognized(String),
}

pub fn classify<K: Copy>(value: Value, table: &[(&str, K)]) -> Reply<K> {
    match value {
        Value::String(s) => match table.iter().find(|(sentinel, _)| *sentinel == s) {
            Some((_, kind)) => Reply::Rejected(*kind),
            None => Reply::Unrecognized(s),
        },
        other => Reply::Data(other),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn every_register_sentinel_maps_to_its_kind() {
        for (sentinel, kind) in REGISTER_SENTINELS {
            assert_eq!(
                classify(json!(sentinel), REGISTER_SENTINELS),
                Reply::Rejected(*kind),
                "{sentinel}"
            );
        }
    }

    #[test]
    fn unknown_string_is_unrecognized() {
        assert_eq!(
            classify(json!("SOMETHING_ELSE"), REGISTER_SENTINELS),
            Reply::Unrecognized("SOMETHING_ELSE".to_string())
        );
    }

    #[test]
    fn sentinel_match_is_exact() {
        assert_eq!(
            classify(json!("invalid_email"), REGISTER_SENTINELS),
            Reply::Unrecognized("invalid_email".to_string())
        );
    }

    #[test]
    fn structured_values_are_data() {
        let profile = json!({"id": 1, "email": "a@b.c"});
        assert_eq!(
            classify(profile.clone(), REGISTER_SENTINELS),
            Reply::Data(profile)
        );
        assert_eq!(classify(json!([1, 2]), WRITE_SENTINELS), Reply::Data(json!([1, 2])));
        assert_eq!(classify(json!(null), WRITE_SENTINELS), Reply::Data(json!(null)));
    }
}
