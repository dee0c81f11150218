use std::sync::{Arc, RwLock};

use crate::classification::domain::attention_state::AttentionSnapshot;

/// The process-wide published classification result.
///
/// Single writer (the pipeline, once per iteration), any number of readers
/// (status reporting). Readers always see a fully-formed snapshot — either
/// the previous one or the newly published one, never a torn mix — and are
/// never blocked by an in-flight frame iteration beyond the brief write
/// lock. Clones share the same underlying cell.
#[derive(Clone, Default)]
pub struct SnapshotCell {
    inner: Arc<RwLock<AttentionSnapshot>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: AttentionSnapshot) {
        // A panicked writer cannot leave a half-written snapshot behind
        // (the value is Copy), so a poisoned lock is safe to recover.
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = snapshot;
    }

    pub fn latest(&self) -> AttentionSnapshot {
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }
}
