use serde::{de::DeserializeOwned, Serialize};

/// Behavior shared by every stored entity: how it is named in responses,
/// how its primary key is matched, and how a partial update is merged.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Body of a partial update; fields left out keep their stored value.
    type Patch: Default + DeserializeOwned + Send;

    /// Label used in `"<label> not found"` messages.
    const LABEL: &'static str;

    fn key_matches(&self, key: &str) -> bool;

    fn apply(&mut self, patch: Self::Patch);
}
