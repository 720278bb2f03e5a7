use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::{merge, present, Field};
use crate::record::Record;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    pub parentkey: String,
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
    /// Attributes found in the data file that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /parents` and `PUT /parents/:parentkey`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ParentFields {
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

impl Parent {
    pub fn new(parentkey: String, fields: ParentFields) -> Self {
        Self {
            parentkey,
            name: fields.name,
            email: fields.email,
            num: fields.num,
            pass: fields.pass,
            cpass: fields.cpass,
            extra: Map::new(),
        }
    }
}

impl Record for Parent {
    type Patch = ParentFields;
    const LABEL: &'static str = "Parent";

    fn key_matches(&self, key: &str) -> bool {
        self.parentkey == key
    }

    fn apply(&mut self, patch: ParentFields) {
        merge(&mut self.pass, patch.pass);
        merge(&mut self.cpass, patch.cpass);
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.num, patch.num);
    }
}
