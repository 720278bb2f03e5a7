use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::{merge, present, Field};
use crate::record::Record;

/// Administrator account. Admins are only ever seeded through the data file,
/// so even the `empid` is kept exactly as it was written there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub empid: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub num: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub pass: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub cpass: Field,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `PUT /admin/:empid`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AdminFields {
    #[serde(default, deserialize_with = "present")]
    pub name: Field,
    #[serde(default, deserialize_with = "present")]
    pub email: Field,
    #[serde(default, deserialize_with = "present")]
    pub num: Field,
    #[serde(default, deserialize_with = "present")]
    pub pass: Field,
    #[serde(default, deserialize_with = "present")]
    pub cpass: Field,
}

impl Record for Admin {
    type Patch = AdminFields;
    const LABEL: &'static str = "Employee";

    // Path segments are strings, so a numeric empid in the file never matches.
    fn key_matches(&self, key: &str) -> bool {
        matches!(&self.empid, Some(Value::String(id)) if id == key)
    }

    fn apply(&mut self, patch: AdminFields) {
        merge(&mut self.pass, patch.pass);
        merge(&mut self.cpass, patch.cpass);
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.num, patch.num);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_only_string_empid() {
        let admin: Admin = serde_json::from_value(json!({"empid": "E1", "name": "Root"})).unwrap();
        assert!(admin.key_matches("E1"));
        assert!(!admin.key_matches("E2"));

        let numeric: Admin = serde_json::from_value(json!({"empid": 1})).unwrap();
        assert!(!numeric.key_matches("1"));
    }

    #[test]
    fn seeded_record_round_trips_unchanged() {
        let raw = json!({"empid": "E1", "name": "Root", "pass": null, "role": "super"});
        let admin: Admin = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&admin).unwrap(), raw);
    }
}
