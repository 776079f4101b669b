use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::data::identity::Identity;

/// Header checkbox state, relative to the currently visible rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAggregate {
    None,
    Partial,
    All,
}

/// Selected row identities.
///
/// Selection is keyed by identity, never by position, so it is unaffected by
/// sorting, filtering, paging and manual reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<Identity>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row; identities outside `dataset` are ignored
    pub fn toggle_one(mut self, id: &Identity, dataset: &HashSet<Identity>) -> Self {
        if !dataset.contains(id) {
            debug!(target: "selection", "toggle ignored, {} not in dataset", id);
            return self;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
        self
    }

    /// Header checkbox: select exactly the visible rows, or clear them when
    /// they are all selected already. An empty view leaves the selection alone.
    pub fn toggle_all_visible(mut self, visible: &[Identity]) -> Self {
        if visible.is_empty() {
            debug!(target: "selection", "toggle-all ignored, no visible rows");
            return self;
        }
        match self.aggregate(visible) {
            SelectionAggregate::All => {
                for id in visible {
                    self.selected.remove(id);
                }
            }
            SelectionAggregate::None | SelectionAggregate::Partial => {
                self.selected = visible.iter().cloned().collect();
            }
        }
        self
    }

    pub fn clear(mut self) -> Self {
        self.selected.clear();
        self
    }

    pub fn aggregate(&self, visible: &[Identity]) -> SelectionAggregate {
        if visible.is_empty() {
            return SelectionAggregate::None;
        }
        let hits = visible.iter().filter(|id| self.selected.contains(id)).count();
        if hits == 0 {
            SelectionAggregate::None
        } else if hits == visible.len() {
            SelectionAggregate::All
        } else {
            SelectionAggregate::Partial
        }
    }

    /// Drop identities that left the dataset
    pub fn retain_known(mut self, dataset: &HashSet<Identity>) -> Self {
        let before = self.selected.len();
        self.selected.retain(|id| dataset.contains(id));
        if self.selected.len() != before {
            debug!(
                target: "selection",
                "pruned {} stale selections",
                before - self.selected.len()
            );
        }
        self
    }

    pub fn contains(&self, id: &Identity) -> bool {
        self.selected.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> Vec<Identity> {
        values.iter().copied().map(Identity::Int).collect()
    }

    fn dataset(values: &[i64]) -> HashSet<Identity> {
        ids(values).into_iter().collect()
    }

    #[test]
    fn test_toggle_one() {
        let all = dataset(&[1, 2, 3]);
        let selection = SelectionState::new().toggle_one(&Identity::Int(2), &all);
        assert!(selection.contains(&Identity::Int(2)));
        let selection = selection.toggle_one(&Identity::Int(2), &all);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_unknown_is_ignored() {
        let all = dataset(&[1, 2, 3]);
        let selection = SelectionState::new().toggle_one(&Identity::Int(42), &all);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_aggregate() {
        let all = dataset(&[1, 2, 3]);
        let selection = SelectionState::new().toggle_one(&Identity::Int(1), &all);
        assert_eq!(selection.aggregate(&ids(&[1, 2])), SelectionAggregate::Partial);
        assert_eq!(selection.aggregate(&ids(&[1])), SelectionAggregate::All);
        assert_eq!(selection.aggregate(&ids(&[2, 3])), SelectionAggregate::None);
        assert_eq!(selection.aggregate(&[]), SelectionAggregate::None);
    }

    #[test]
    fn test_toggle_all_visible_replaces_then_clears() {
        let all = dataset(&[1, 2, 3, 4, 5]);
        let visible = ids(&[2, 3, 4]);
        let selection = SelectionState::new()
            .toggle_one(&Identity::Int(1), &all)
            .toggle_one(&Identity::Int(2), &all);

        let selection = selection.toggle_all_visible(&visible);
        assert_eq!(selection.iter().cloned().collect::<Vec<_>>(), visible);
        assert_eq!(selection.aggregate(&visible), SelectionAggregate::All);

        let selection = selection.toggle_all_visible(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_on_empty_view_keeps_selection() {
        let all = dataset(&[1, 2, 3]);
        let selection = SelectionState::new()
            .toggle_one(&Identity::Int(1), &all)
            .toggle_one(&Identity::Int(2), &all);

        let selection = selection.toggle_all_visible(&[]);
        assert_eq!(selection.iter().cloned().collect::<Vec<_>>(), ids(&[1, 2]));
    }

    #[test]
    fn test_retain_known() {
        let selection = SelectionState::new()
            .toggle_one(&Identity::Int(1), &dataset(&[1, 2]))
            .toggle_one(&Identity::Int(2), &dataset(&[1, 2]));
        let pruned = selection.retain_known(&dataset(&[2, 3]));
        assert_eq!(pruned.iter().cloned().collect::<Vec<_>>(), ids(&[2]));
    }
}
