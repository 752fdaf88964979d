//! Update-payload whitelisting.
//!
//! Update endpoints accept a raw JSON object and apply it to the stored
//! item, so any key a client sends would otherwise land in storage. The
//! whitelist check rejects over-posting (clients setting `author`, `id` and
//! the like) wholesale: one unexpected key invalidates the entire payload,
//! no partial application.

use serde_json::{Map, Value};

/// Keys a client may send when updating a todo.
pub const ALLOWED_UPDATE_TODO_KEYS: &[&str] = &["title", "description", "deadline", "isDone"];

/// Keys a client may send when updating a shopping list.
pub const ALLOWED_UPDATE_SHOPPING_LIST_KEYS: &[&str] =
    &["title", "deadline", "isDone", "upcomingItems", "doneItems"];

/// Keys a client may send when updating their own account.
pub const ALLOWED_UPDATE_USER_KEYS: &[&str] = &["firstName", "lastName"];

/// Checks that an update payload only carries allowed, well-formed values.
///
/// Rules:
/// - every key must be in `allowed_keys`;
/// - a string value must be non-empty after trimming: an explicitly
///   provided empty string means "cleared", which updates never allow,
///   while an omitted field is simply left untouched;
/// - explicit `null` is rejected for the same reason;
/// - non-string scalars (`false`, `0`) and arrays are valid values.
///
/// The empty payload passes: it updates nothing.
pub fn check_is_proper_update_payload(payload: &Map<String, Value>, allowed_keys: &[&str]) -> bool {
    payload.iter().all(|(key, value)| {
        allowed_keys.contains(&key.as_str()) && is_acceptable_value(value)
    })
}

fn is_acceptable_value(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Null => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_proper_payload_accepted() {
        let payload = object(json!({"firstName": "John", "lastName": "Doe"}));
        assert!(check_is_proper_update_payload(
            &payload,
            ALLOWED_UPDATE_USER_KEYS
        ));
    }

    #[test]
    fn test_unknown_key_rejects_whole_payload() {
        let payload = object(json!({
            "firstName": "John",
            "lastName": "Doe",
            "notAllowed": "x",
        }));
        assert!(!check_is_proper_update_payload(
            &payload,
            ALLOWED_UPDATE_USER_KEYS
        ));
    }

    #[test]
    fn test_empty_string_value_rejected() {
        let payload = object(json!({"firstName": "", "lastName": "Doe"}));
        assert!(!check_is_proper_update_payload(
            &payload,
            ALLOWED_UPDATE_USER_KEYS
        ));
    }

    #[test]
    fn test_whitespace_only_string_rejected() {
        let payload = object(json!({"title": "   "}));
        assert!(!check_is_proper_update_payload(
            &payload,
            ALLOWED_UPDATE_TODO_KEYS
        ));
    }

    #[test]
    fn test_null_value_rejected() {
        let payload = object(json!({"deadline": null}));
        assert!(!check_is_proper_update_payload(
            &payload,
            ALLOWED_UPDATE_TODO_KEYS
        ));
    }

    #[test]
    fn test_falsy_non_string_values_accepted() {
        // `false` is a legitimate isDone value, not an empty one.
        let payload = object(json!({"isDone": false}));
        assert!(check_is_proper_update_payload(
            &payload,
            ALLOWED_UPDATE_TODO_KEYS
        ));
    }

    #[test]
    fn test_array_values_accepted() {
        let payload = object(json!({"upcomingItems": ["milk", "bread"], "doneItems": []}));
        assert!(check_is_proper_update_payload(
            &payload,
            ALLOWED_UPDATE_SHOPPING_LIST_KEYS
        ));
    }

    #[test]
    fn test_empty_payload_accepted() {
        let payload = Map::new();
        assert!(check_is_proper_update_payload(
            &payload,
            ALLOWED_UPDATE_TODO_KEYS
        ));
    }
}
