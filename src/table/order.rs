//! Manual row order maintained by drag-and-drop.
//!
//! The order is a permutation of dataset identities. It survives dataset
//! replacement through [`OrderState::reconcile`]: rows that are still present
//! keep their relative position, new rows are appended in dataset order and
//! vanished rows are dropped.

use std::collections::HashSet;
use tracing::debug;

use crate::data::identity::Identity;

/// Whether an order still matches the dataset it was built against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Reconciled,
    /// The dataset gained or lost identities since the order was last reconciled
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderState {
    ids: Vec<Identity>,
}

impl OrderState {
    pub fn from_identities(ids: &[Identity]) -> Self {
        Self { ids: ids.to_vec() }
    }

    /// Move `source` so it lands directly before `target`.
    ///
    /// Unknown identities and `source == target` leave the order unchanged.
    pub fn reorder(mut self, source: &Identity, target: &Identity) -> Self {
        if source == target {
            return self;
        }
        let Some(from) = self.position(source) else {
            debug!(target: "order", "reorder ignored, unknown source {}", source);
            return self;
        };
        if self.position(target).is_none() {
            debug!(target: "order", "reorder ignored, unknown target {}", target);
            return self;
        }

        let moved = self.ids.remove(from);
        // Look the target up again; removing the source may have shifted it
        if let Some(to) = self.position(target) {
            self.ids.insert(to, moved);
        }
        self
    }

    /// Rebuild against a dataset's identities (in dataset order)
    pub fn reconcile(&self, dataset_ids: &[Identity]) -> Self {
        let present: HashSet<&Identity> = dataset_ids.iter().collect();
        let mut ids: Vec<Identity> = self
            .ids
            .iter()
            .filter(|id| present.contains(id))
            .cloned()
            .collect();

        let kept: HashSet<&Identity> = self.ids.iter().collect();
        ids.extend(dataset_ids.iter().filter(|id| !kept.contains(id)).cloned());

        Self { ids }
    }

    pub fn status(&self, dataset_ids: &[Identity]) -> OrderStatus {
        if self.ids.len() != dataset_ids.len() {
            return OrderStatus::Stale;
        }
        let ours: HashSet<&Identity> = self.ids.iter().collect();
        if dataset_ids.iter().all(|id| ours.contains(id)) {
            OrderStatus::Reconciled
        } else {
            OrderStatus::Stale
        }
    }

    pub fn position(&self, id: &Identity) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    pub fn ids(&self) -> &[Identity] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> Vec<Identity> {
        values.iter().copied().map(Identity::Int).collect()
    }

    fn order(values: &[i64]) -> OrderState {
        OrderState::from_identities(&ids(values))
    }

    #[test]
    fn test_drag_up_lands_before_target() {
        let moved = order(&[1, 2, 3, 4, 5]).reorder(&Identity::Int(5), &Identity::Int(2));
        assert_eq!(moved.ids(), ids(&[1, 5, 2, 3, 4]).as_slice());
    }

    #[test]
    fn test_drag_down_lands_before_target() {
        let moved = order(&[1, 2, 3, 4, 5]).reorder(&Identity::Int(1), &Identity::Int(4));
        assert_eq!(moved.ids(), ids(&[2, 3, 1, 4, 5]).as_slice());
    }

    #[test]
    fn test_reorder_no_ops() {
        let base = order(&[1, 2, 3]);
        assert_eq!(base.clone().reorder(&Identity::Int(2), &Identity::Int(2)), base);
        assert_eq!(base.clone().reorder(&Identity::Int(9), &Identity::Int(2)), base);
        assert_eq!(base.clone().reorder(&Identity::Int(2), &Identity::Int(9)), base);
    }

    #[test]
    fn test_reconcile_keeps_survivors_and_appends_new() {
        let current = order(&[3, 1, 2]);
        let reconciled = current.reconcile(&ids(&[1, 2, 4, 5]));
        assert_eq!(reconciled.ids(), ids(&[1, 2, 4, 5]).as_slice());

        let current = order(&[3, 2, 1]);
        let reconciled = current.reconcile(&ids(&[1, 2, 3, 7]));
        assert_eq!(reconciled.ids(), ids(&[3, 2, 1, 7]).as_slice());
    }

    #[test]
    fn test_status() {
        let current = order(&[2, 1]);
        assert_eq!(current.status(&ids(&[1, 2])), OrderStatus::Reconciled);
        assert_eq!(current.status(&ids(&[1, 2, 3])), OrderStatus::Stale);
        assert_eq!(current.status(&ids(&[1, 3])), OrderStatus::Stale);
    }

    #[test]
    fn test_string_identities() {
        let current = OrderState::from_identities(&[
            Identity::from("MER-1"),
            Identity::from("MER-2"),
            Identity::from("MER-3"),
        ]);
        let moved = current.reorder(&Identity::from("MER-3"), &Identity::from("MER-1"));
        assert_eq!(moved.position(&Identity::from("MER-3")), Some(0));
    }
}
