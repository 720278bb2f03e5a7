use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A client-supplied attribute. `None` means the key was absent, while
/// `Some(Value::Null)` is an explicit `null`.
pub type Field = Option<Value>;

/// Deserialize a present key as `Some`, even when its value is `null`.
/// Pair with `#[serde(default)]` so an absent key stays `None`.
pub fn present<'de, D>(deserializer: D) -> Result<Field, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Overwrite `slot` only when the incoming field was sent.
pub fn merge(slot: &mut Field, incoming: Field) {
    if let Some(value) = incoming {
        *slot = Some(value);
    }
}

/// Text used when a field is spliced into a generated key.
pub fn key_text(field: &Field) -> String {
    match field {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Default)]
    struct Probe {
        #[serde(default, deserialize_with = "present")]
        a: Field,
    }

    #[test]
    fn absent_and_null_are_distinct() {
        let absent: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.a, None);
        let null: Probe = serde_json::from_value(json!({"a": null})).unwrap();
        assert_eq!(null.a, Some(Value::Null));
    }

    #[test]
    fn merge_keeps_slot_when_absent() {
        let mut slot = Some(json!("old"));
        merge(&mut slot, None);
        assert_eq!(slot, Some(json!("old")));
        merge(&mut slot, Some(Value::Null));
        assert_eq!(slot, Some(Value::Null));
    }

    #[test]
    fn key_text_renders_like_string_interpolation() {
        assert_eq!(key_text(&Some(json!("Ab3dE9"))), "Ab3dE9");
        assert_eq!(key_text(&None), "undefined");
        assert_eq!(key_text(&Some(Value::Null)), "null");
        assert_eq!(key_text(&Some(json!(42))), "42");
    }
}
