use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::{merge, present, Field};
use crate::record::Record;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub parentkey: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub num: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gender: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub birthday: Field,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /children`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NewChild {
    #[serde(default, deserialize_with = "present")]
    pub parentkey: Field,
    #[serde(default, deserialize_with = "present")]
    pub name: Field,
    #[serde(default, deserialize_with = "present")]
    pub email: Field,
    #[serde(default, deserialize_with = "present")]
    pub num: Field,
    #[serde(default, deserialize_with = "present")]
    pub gender: Field,
    #[serde(default, deserialize_with = "present")]
    pub birthday: Field,
}

/// Body of `PUT /children/:id`. The owning `parentkey` cannot be changed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChildPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Field,
    #[serde(default, deserialize_with = "present")]
    pub email: Field,
    #[serde(default, deserialize_with = "present")]
    pub num: Field,
    #[serde(default, deserialize_with = "present")]
    pub gender: Field,
    #[serde(default, deserialize_with = "present")]
    pub birthday: Field,
}

impl Child {
    pub fn new(id: String, fields: NewChild) -> Self {
        Self {
            id,
            parentkey: fields.parentkey,
            name: fields.name,
            email: fields.email,
            num: fields.num,
            gender: fields.gender,
            birthday: fields.birthday,
            extra: Map::new(),
        }
    }
}

impl Record for Child {
    type Patch = ChildPatch;
    const LABEL: &'static str = "Child";

    fn key_matches(&self, key: &str) -> bool {
        self.id == key
    }

    fn apply(&mut self, patch: ChildPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.num, patch.num);
        merge(&mut self.gender, patch.gender);
        merge(&mut self.birthday, patch.birthday);
    }
}
