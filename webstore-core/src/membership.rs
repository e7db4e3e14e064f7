//! Cart/wishlist membership tracking.
//!
//! A [`MembershipTracker`] keeps one local set of product IDs in sync with
//! the persisted mirror and the remote service. Each mutation follows the
//! same path: take the per-item pending marker, issue the remote call,
//! commit the set and mirror only on success, and clear the marker on every
//! settle path. The set is never optimistically updated, so a failed call
//! needs no rollback.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Mutex;

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::mirror::{MirrorError, MirrorStore, StoreKey};
use crate::models::ProductId;

/// Direction of a membership mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Add,
    Remove,
}

#[derive(Debug, Error)]
pub enum MembershipError {
    /// A mutation for this product is already in flight; the duplicate
    /// submission is rejected without touching any state.
    #[error("an operation for product '{0}' is already in progress")]
    OperationPending(ProductId),
    #[error(transparent)]
    Remote(#[from] GatewayError),
    #[error(transparent)]
    Mirror(#[from] MirrorError),
}

/// Membership set for one store key, backed by the persisted mirror.
///
/// The pending guard and the item set live behind short-lived mutexes that
/// are never held across an await, so operations on different product IDs
/// proceed independently while duplicate submissions for the same ID are
/// rejected by an atomic check-and-set.
#[derive(Debug)]
pub struct MembershipTracker {
    key: StoreKey,
    mirror: MirrorStore,
    items: Mutex<HashSet<ProductId>>,
    pending: Mutex<HashSet<ProductId>>,
}

impl MembershipTracker {
    /// Open a tracker, hydrating the set from the persisted mirror.
    pub fn open(key: StoreKey, mirror: MirrorStore) -> Self {
        let items = mirror.read(key);
        Self {
            key,
            mirror,
            items: Mutex::new(items),
            pending: Mutex::new(HashSet::new()),
        }
    }

    pub fn key(&self) -> StoreKey {
        self.key
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.lock().unwrap().contains(id)
    }

    pub fn is_pending(&self, id: &ProductId) -> bool {
        self.pending.lock().unwrap().contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// Snapshot of the set, sorted for stable display.
    pub fn items(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self.items.lock().unwrap().iter().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Run one membership mutation against the remote service.
    ///
    /// `op` is the remote call (add or remove, matching `intent`). On
    /// success the in-memory set is updated and the mirror overwritten; on
    /// failure the set is left as it was and the error is logged. The
    /// pending marker for `id` is cleared whichever way the call settles.
    pub async fn apply<F, Fut>(
        &self,
        id: &ProductId,
        intent: Intent,
        op: F,
    ) -> Result<(), MembershipError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), GatewayError>>,
    {
        if !self.begin(id) {
            return Err(MembershipError::OperationPending(id.clone()));
        }

        let outcome = match op().await {
            Ok(()) => self.commit(id, intent),
            Err(e) => {
                tracing::error!(key = %self.key, product = %id, error = %e, "remote mutation failed");
                Err(MembershipError::Remote(e))
            }
        };

        self.finish(id);
        outcome
    }

    /// Check-and-set the pending marker. Returns false if a mutation for
    /// this ID is already in flight.
    fn begin(&self, id: &ProductId) -> bool {
        self.pending.lock().unwrap().insert(id.clone())
    }

    fn finish(&self, id: &ProductId) {
        self.pending.lock().unwrap().remove(id);
    }

    fn commit(&self, id: &ProductId, intent: Intent) -> Result<(), MembershipError> {
        let mut items = self.items.lock().unwrap();
        match intent {
            Intent::Add => items.insert(id.clone()),
            Intent::Remove => items.remove(id),
        };
        self.mirror.write(self.key, &items)?;
        tracing::debug!(key = %self.key, product = %id, size = items.len(), "membership committed");
        Ok(())
    }

    /// Replace the set with the remote service's record and rewrite the
    /// mirror. Remote wins on any drift.
    pub fn reconcile(&self, remote: HashSet<ProductId>) -> Result<(), MirrorError> {
        let mut items = self.items.lock().unwrap();
        *items = remote;
        self.mirror.write(self.key, &items)
    }

    /// Empty the set and the mirror, e.g. after an order consumed the cart.
    pub fn clear(&self) -> Result<(), MirrorError> {
        self.reconcile(HashSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_tracker(key: StoreKey) -> (MembershipTracker, MirrorStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(temp_dir.path().to_path_buf());
        let tracker = MembershipTracker::open(key, mirror.clone());
        (tracker, mirror, temp_dir)
    }

    fn remote_ok() -> Result<(), GatewayError> {
        Ok(())
    }

    fn remote_err() -> Result<(), GatewayError> {
        Err(GatewayError::Network("connection refused".to_string()))
    }

    #[test]
    fn test_open_hydrates_from_mirror() {
        let temp_dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(temp_dir.path().to_path_buf());
        std::fs::write(mirror.path(StoreKey::Wishlist), r#"["a","b"]"#).unwrap();

        let tracker = MembershipTracker::open(StoreKey::Wishlist, mirror);
        assert_eq!(tracker.len(), 2);
        assert!(tracker.contains(&ProductId::from("a")));
        assert!(tracker.contains(&ProductId::from("b")));
    }

    #[test]
    fn test_open_with_malformed_mirror_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(temp_dir.path().to_path_buf());
        std::fs::write(mirror.path(StoreKey::Cart), "not an array").unwrap();

        let tracker = MembershipTracker::open(StoreKey::Cart, mirror);
        assert!(tracker.is_empty());
    }

    #[tokio::test]
    async fn test_successful_add_commits_set_and_mirror() {
        let (tracker, mirror, _temp) = test_tracker(StoreKey::Wishlist);
        let p1 = ProductId::from("p1");

        assert!(!tracker.is_pending(&p1));
        tracker
            .apply(&p1, Intent::Add, || async { remote_ok() })
            .await
            .unwrap();

        assert!(tracker.contains(&p1));
        assert!(mirror.read(StoreKey::Wishlist).contains(&p1));
        assert!(!tracker.is_pending(&p1));
    }

    #[tokio::test]
    async fn test_successful_remove_clears_set_and_mirror() {
        let (tracker, mirror, _temp) = test_tracker(StoreKey::Wishlist);
        let p1 = ProductId::from("p1");

        tracker
            .apply(&p1, Intent::Add, || async { remote_ok() })
            .await
            .unwrap();
        tracker
            .apply(&p1, Intent::Remove, || async { remote_ok() })
            .await
            .unwrap();

        assert!(!tracker.contains(&p1));
        assert!(mirror.read(StoreKey::Wishlist).is_empty());
        assert!(!tracker.is_pending(&p1));
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_state_unchanged() {
        let (tracker, mirror, _temp) = test_tracker(StoreKey::Cart);
        let p1 = ProductId::from("p1");

        let result = tracker
            .apply(&p1, Intent::Add, || async { remote_err() })
            .await;

        assert!(matches!(result, Err(MembershipError::Remote(_))));
        assert!(!tracker.contains(&p1));
        assert!(mirror.read(StoreKey::Cart).is_empty());
        assert!(!tracker.is_pending(&p1));
    }

    #[test]
    fn test_pending_guard_rejects_duplicate() {
        let (tracker, _mirror, _temp) = test_tracker(StoreKey::Cart);
        let p1 = ProductId::from("p1");

        assert!(tracker.begin(&p1));
        assert!(!tracker.begin(&p1));

        // A different product is unaffected.
        assert!(tracker.begin(&ProductId::from("p2")));

        tracker.finish(&p1);
        assert!(tracker.begin(&p1));
    }

    #[tokio::test]
    async fn test_apply_rejects_while_pending() {
        let (tracker, _mirror, _temp) = test_tracker(StoreKey::Cart);
        let p1 = ProductId::from("p1");

        // Simulate an in-flight operation for p1.
        assert!(tracker.begin(&p1));

        let result = tracker
            .apply(&p1, Intent::Add, || async { remote_ok() })
            .await;
        assert!(matches!(result, Err(MembershipError::OperationPending(_))));

        // The rejected call must not have cleared the original marker.
        assert!(tracker.is_pending(&p1));
    }

    #[tokio::test]
    async fn test_operations_on_other_ids_proceed_while_one_pending() {
        let (tracker, _mirror, _temp) = test_tracker(StoreKey::Cart);
        let p1 = ProductId::from("p1");
        let p2 = ProductId::from("p2");

        assert!(tracker.begin(&p1));

        tracker
            .apply(&p2, Intent::Add, || async { remote_ok() })
            .await
            .unwrap();
        assert!(tracker.contains(&p2));
    }

    #[test]
    fn test_reconcile_remote_wins() {
        let (tracker, mirror, _temp) = test_tracker(StoreKey::Cart);

        let remote: HashSet<ProductId> =
            ["x", "y"].iter().map(|s| ProductId::from(*s)).collect();
        tracker.reconcile(remote.clone()).unwrap();

        assert_eq!(tracker.len(), 2);
        assert_eq!(mirror.read(StoreKey::Cart), remote);
    }

    #[tokio::test]
    async fn test_clear_empties_set_and_mirror() {
        let (tracker, mirror, _temp) = test_tracker(StoreKey::Cart);
        let p1 = ProductId::from("p1");

        tracker
            .apply(&p1, Intent::Add, || async { remote_ok() })
            .await
            .unwrap();
        tracker.clear().unwrap();

        assert!(tracker.is_empty());
        assert!(mirror.read(StoreKey::Cart).is_empty());
    }

    #[tokio::test]
    async fn test_wishlist_add_then_remove_scenario() {
        let (tracker, mirror, _temp) = test_tracker(StoreKey::Wishlist);
        let p1 = ProductId::from("p1");

        tracker
            .apply(&p1, Intent::Add, || async { remote_ok() })
            .await
            .unwrap();
        assert_eq!(tracker.items(), vec![p1.clone()]);
        assert_eq!(
            std::fs::read_to_string(mirror.path(StoreKey::Wishlist)).unwrap(),
            r#"["p1"]"#
        );

        tracker
            .apply(&p1, Intent::Remove, || async { remote_ok() })
            .await
            .unwrap();
        assert!(tracker.is_empty());
        assert_eq!(
            std::fs::read_to_string(mirror.path(StoreKey::Wishlist)).unwrap(),
            "[]"
        );
    }
}
