//! Disclosure gate - progressive reveal of generated follow-up content.
//!
//! The gate knows nothing about how authentication is determined; the
//! caller's auth subsystem supplies an opaque boolean.

use serde::{Deserialize, Serialize};

/// One follow-up candidate with its visibility decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpItem {
    pub text: String,
    pub locked: bool,
}

/// Ordered follow-up candidates after the gate has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FollowUpList {
    items: Vec<FollowUpItem>,
}

impl FollowUpList {
    /// Creates a list from already-decided items.
    pub fn new(items: Vec<FollowUpItem>) -> Self {
        Self { items }
    }

    /// Returns the items in order.
    pub fn items(&self) -> &[FollowUpItem] {
        &self.items
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of locked candidates.
    pub fn locked_count(&self) -> usize {
        self.items.iter().filter(|item| item.locked).count()
    }

    /// Iterates over the unlocked candidates.
    pub fn unlocked(&self) -> impl Iterator<Item = &FollowUpItem> {
        self.items.iter().filter(|item| !item.locked)
    }
}

/// Decides how much follow-up content is visible to the caller.
///
/// The first `free_count` candidates are always unlocked; the rest are
/// locked exactly when the caller is unauthenticated. Pure function, no
/// side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisclosureGate {
    free_count: usize,
}

impl DisclosureGate {
    /// Creates a gate that always unlocks the first `free_count` candidates.
    pub fn new(free_count: usize) -> Self {
        Self { free_count }
    }

    /// Returns the configured free-candidate count.
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    /// Applies the gate to a candidate list.
    pub fn reveal(&self, candidates: &[String], is_authenticated: bool) -> FollowUpList {
        let items = candidates
            .iter()
            .enumerate()
            .map(|(index, text)| FollowUpItem {
                text: text.clone(),
                locked: index >= self.free_count && !is_authenticated,
            })
            .collect();
        FollowUpList::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("follow-up {}", i)).collect()
    }

    #[test]
    fn unauthenticated_unlocks_exactly_the_first_k() {
        let gate = DisclosureGate::new(2);
        let list = gate.reveal(&candidates(5), false);

        let locked: Vec<bool> = list.items().iter().map(|i| i.locked).collect();
        assert_eq!(locked, vec![false, false, true, true, true]);
    }

    #[test]
    fn authenticated_unlocks_everything() {
        let gate = DisclosureGate::new(2);
        let list = gate.reveal(&candidates(5), true);

        assert_eq!(list.locked_count(), 0);
        assert_eq!(list.unlocked().count(), 5);
    }

    #[test]
    fn order_and_text_are_preserved() {
        let gate = DisclosureGate::new(1);
        let input = candidates(3);
        let list = gate.reveal(&input, false);

        let texts: Vec<&str> = list.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["follow-up 0", "follow-up 1", "follow-up 2"]);
    }

    #[test]
    fn free_count_larger_than_list_unlocks_all() {
        let gate = DisclosureGate::new(10);
        let list = gate.reveal(&candidates(3), false);
        assert_eq!(list.locked_count(), 0);
    }

    #[test]
    fn zero_free_count_locks_everything_for_guests() {
        let gate = DisclosureGate::new(0);
        let list = gate.reveal(&candidates(3), false);
        assert_eq!(list.locked_count(), 3);
    }

    #[test]
    fn empty_candidates_yield_empty_list() {
        let gate = DisclosureGate::new(2);
        let list = gate.reveal(&[], false);
        assert!(list.is_empty());
    }

    #[test]
    fn same_k_applies_across_auth_states() {
        let gate = DisclosureGate::new(2);
        let input = candidates(4);

        let guest = gate.reveal(&input, false);
        let member = gate.reveal(&input, true);

        // The always-free prefix is identical either way.
        assert_eq!(guest.items()[..2], member.items()[..2]);
    }

    #[test]
    fn list_serializes_as_plain_array() {
        let gate = DisclosureGate::new(1);
        let json = serde_json::to_string(&gate.reveal(&candidates(2), false)).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"locked\":true"));
    }
}
