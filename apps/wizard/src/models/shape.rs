//! Helpers for moving loosely-typed JSON into the record's fixed shapes.
//!
//! Profiles come back from the API and the resume parser with numbers where
//! the wizard keeps text, `null`s, arrays for comma-display fields and extra
//! bookkeeping keys. `conform` reshapes such a value to match a template
//! value (usually a serialized `Default`), so deserializing the result into
//! the typed struct cannot fail.

use serde_json::{Map, Value};

/// JavaScript-style truthiness, used for "first present synonym" lookups.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Renders a JSON value as display text. Arrays of scalars are joined with `sep`;
/// objects and `null` have no text form.
pub fn value_to_text(value: &Value, sep: &str) -> Option<String> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(sep),
        ),
        other => scalar_text(other),
    }
}

/// Reshapes `incoming` to the structure of `template`.
///
/// Object keys missing from `incoming` (or `null`) take the template value and
/// keys unknown to the template are dropped. Text slots accept numbers, booleans
/// and arrays (joined with `", "`). Array slots are passed through unchanged;
/// callers conform collection elements against their own entry template.
pub fn conform(template: &Value, incoming: &Value) -> Value {
    match (template, incoming) {
        (_, Value::Null) => template.clone(),
        (Value::Object(shape), Value::Object(given)) => {
            let mut out = Map::with_capacity(shape.len());
            for (key, default) in shape {
                let value = given
                    .get(key)
                    .map(|v| conform(default, v))
                    .unwrap_or_else(|| default.clone());
                out.insert(key.clone(), value);
            }
            Value::Object(out)
        }
        (Value::String(_), other) => value_to_text(other, ", ")
            .map(Value::String)
            .unwrap_or_else(|| template.clone()),
        (Value::Bool(_), Value::Bool(b)) | (Value::Null, Value::Bool(b)) => Value::Bool(*b),
        (Value::Array(_), Value::Array(items)) => Value::Array(items.clone()),
        _ => template.clone(),
    }
}

/// Whether a direct edit may store `value` in a slot whose default is `template`.
/// A `null` default marks a tri-state yes/no field.
pub fn accepts(template: &Value, value: &Value) -> bool {
    match template {
        Value::String(_) => matches!(value, Value::String(_) | Value::Number(_)),
        Value::Bool(_) => value.is_boolean(),
        Value::Null => matches!(value, Value::Bool(_) | Value::Null),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_matches_js() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!(5), ", ").as_deref(), Some("5"));
        assert_eq!(
            value_to_text(&json!(["a", "b"]), "\n").as_deref(),
            Some("a\nb")
        );
        assert_eq!(value_to_text(&json!({ "a": 1 }), ", "), None);
    }

    #[test]
    fn test_conform_fills_defaults_and_drops_unknown_keys() {
        let template = json!({ "name": "", "level": "Conversational", "on": false });
        let incoming = json!({ "name": "Rust", "level": null, "_id": "x", "on": true });
        assert_eq!(
            conform(&template, &incoming),
            json!({ "name": "Rust", "level": "Conversational", "on": true })
        );
    }

    #[test]
    fn test_conform_coerces_text_slots() {
        let template = json!({ "years": "", "skills": "" });
        let incoming = json!({ "years": 7, "skills": ["Go", "Rust"] });
        assert_eq!(
            conform(&template, &incoming),
            json!({ "years": "7", "skills": "Go, Rust" })
        );
    }

    #[test]
    fn test_conform_keeps_tri_state() {
        let template = json!({ "usAuthorized": null });
        assert_eq!(
            conform(&template, &json!({ "usAuthorized": false })),
            json!({ "usAuthorized": false })
        );
        assert_eq!(
            conform(&template, &json!({ "usAuthorized": "maybe" })),
            json!({ "usAuthorized": null })
        );
    }

    #[test]
    fn test_accepts() {
        assert!(accepts(&json!(""), &json!("text")));
        assert!(accepts(&json!(""), &json!(12)));
        assert!(!accepts(&json!(""), &json!(true)));
        assert!(accepts(&json!(false), &json!(true)));
        assert!(!accepts(&json!(false), &json!("yes")));
        assert!(accepts(&json!(null), &json!(null)));
        assert!(!accepts(&json!([]), &json!([])));
    }
}
