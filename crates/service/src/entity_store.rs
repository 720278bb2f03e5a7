use std::collections::HashSet;
use std::sync::Arc;

use configs::{ChildIdScope, StorageConfig};
use models::{field::key_text, Admin, Child, NewChild, Parent, ParentFields};
use tracing::{debug, error, info};

use crate::keygen;
use crate::storage::json_seq_store::JsonSeqStore;

/// The three record sequences of the service, owned together.
pub struct EntityStore {
    parents: JsonSeqStore<Parent>,
    children: JsonSeqStore<Child>,
    admins: JsonSeqStore<Admin>,
    child_id_scope: ChildIdScope,
}

/// Record counts per sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub parents: usize,
    pub children: usize,
    pub admins: usize,
}

impl EntityStore {
    /// Load every sequence from the files named in `cfg`.
    pub async fn load(cfg: &StorageConfig) -> Arc<Self> {
        let store = Self {
            parents: JsonSeqStore::load(cfg.parents_path()).await,
            children: JsonSeqStore::load(cfg.children_path()).await,
            admins: JsonSeqStore::load(cfg.admin_path()).await,
            child_id_scope: cfg.child_id_scope,
        };
        let counts = store.counts().await;
        info!(
            parents = counts.parents,
            children = counts.children,
            admins = counts.admins,
            "entity store loaded"
        );
        Arc::new(store)
    }

    pub fn from_parts(
        parents: JsonSeqStore<Parent>,
        children: JsonSeqStore<Child>,
        admins: JsonSeqStore<Admin>,
        child_id_scope: ChildIdScope,
    ) -> Arc<Self> {
        Arc::new(Self { parents, children, admins, child_id_scope })
    }

    pub fn parents(&self) -> &JsonSeqStore<Parent> { &self.parents }
    pub fn children(&self) -> &JsonSeqStore<Child> { &self.children }
    pub fn admins(&self) -> &JsonSeqStore<Admin> { &self.admins }

    /// Append a parent under a fresh random key.
    pub async fn create_parent(&self, fields: ParentFields) -> Parent {
        let parent = self
            .parents
            .insert_with(|existing| {
                let key = keygen::unique_parent_key(&mut rand::thread_rng(), |k| {
                    existing.iter().any(|p| p.parentkey == k)
                });
                Parent::new(key, fields)
            })
            .await;
        debug!(parentkey = %parent.parentkey, "parent created");
        parent
    }

    /// Append a child whose id is derived from the submitted `parentkey`.
    ///
    /// With [`ChildIdScope::Parents`] the candidate id is checked against
    /// parent keys, not child ids, so repeated children of one parent share
    /// the id `<parentkey>1`.
    pub async fn create_child(&self, fields: NewChild) -> Child {
        let base = key_text(&fields.parentkey);
        let child = match self.child_id_scope {
            ChildIdScope::Parents => {
                let parent_keys: HashSet<String> = self
                    .parents
                    .read(|ps| ps.iter().map(|p| p.parentkey.clone()).collect())
                    .await;
                self.children
                    .insert_with(|_| {
                        let id = keygen::child_id(&base, |id| parent_keys.contains(id));
                        Child::new(id, fields)
                    })
                    .await
            }
            ChildIdScope::Children => {
                self.children
                    .insert_with(|existing| {
                        let id = keygen::child_id(&base, |id| existing.iter().any(|c| c.id == id));
                        Child::new(id, fields)
                    })
                    .await
            }
        };
        debug!(id = %child.id, "child created");
        child
    }

    pub async fn counts(&self) -> Counts {
        Counts {
            parents: self.parents.len().await,
            children: self.children.len().await,
            admins: self.admins.len().await,
        }
    }

    /// Write every sequence back to its file. Each file is attempted even if
    /// an earlier one failed; returns how many writes failed.
    pub async fn flush(&self) -> usize {
        let results = [
            (self.parents.file_path().to_path_buf(), self.parents.flush().await),
            (self.children.file_path().to_path_buf(), self.children.flush().await),
            (self.admins.file_path().to_path_buf(), self.admins.flush().await),
        ];
        let mut failed = 0;
        for (file, result) in results {
            match result {
                Ok(()) => info!(file = %file.display(), event = "flush", "data file saved"),
                Err(e) => {
                    failed += 1;
                    error!(file = %file.display(), event = "flush_failed", error = %e, "error saving data file");
                }
            }
        }
        failed
    }
}
