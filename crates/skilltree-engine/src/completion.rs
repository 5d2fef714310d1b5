//! Per-user completion state and the decoration it derives.

use std::collections::HashSet;

/// In-memory set of completed entity ids.
///
/// Owns the set exclusively; all mutation goes through [`toggle`]. The
/// tracker knows nothing about persistence — the caller writes the change
/// to its store and, if that fails, calls `toggle` again as the explicit
/// compensating action.
///
/// [`toggle`]: CompletionTracker::toggle
#[derive(Debug, Clone, Default)]
pub struct CompletionTracker {
    completed: HashSet<String>,
    revision: u64,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an external fetch of completed entity ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completed: ids.into_iter().map(Into::into).collect(),
            revision: 0,
        }
    }

    /// Flip membership for the given id; returns the resulting state.
    /// Involutive: toggling twice with no calls in between restores the
    /// original membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.revision += 1;
        if self.completed.remove(id) {
            false
        } else {
            self.completed.insert(id.to_string());
            true
        }
    }

    pub fn is_node_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// An edge is completed iff both of its endpoint nodes are.
    pub fn is_edge_completed(&self, source: &str, target: &str) -> bool {
        self.is_node_completed(source) && self.is_node_completed(target)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Monotonic counter bumped on every toggle. Lets the orchestrator
    /// detect stale decoration without diffing the whole set.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_involutive() {
        let mut tracker = CompletionTracker::new();
        assert!(tracker.toggle("t1"));
        assert!(tracker.is_node_completed("t1"));
        assert!(!tracker.toggle("t1"));
        assert!(!tracker.is_node_completed("t1"));
        assert_eq!(tracker.completed_count(), 0);
    }

    #[test]
    fn edge_requires_both_endpoints() {
        let mut tracker = CompletionTracker::new();
        tracker.toggle("t1");
        tracker.toggle("t2");
        assert!(tracker.is_edge_completed("t1", "t2"));
        assert!(!tracker.is_edge_completed("t2", "t3"));
    }

    #[test]
    fn seeded_from_external_fetch() {
        let tracker = CompletionTracker::from_ids(["t1", "t2"]);
        assert_eq!(tracker.completed_count(), 2);
        assert!(tracker.is_node_completed("t2"));
        assert_eq!(tracker.revision(), 0);
    }

    #[test]
    fn revision_bumps_on_every_toggle() {
        let mut tracker = CompletionTracker::new();
        tracker.toggle("t1");
        tracker.toggle("t1");
        assert_eq!(tracker.revision(), 2);
    }

    #[test]
    fn compensating_toggle_restores_state() {
        // Persistence failed externally; the caller re-invokes toggle.
        let mut tracker = CompletionTracker::from_ids(["t1"]);
        let optimistic = tracker.toggle("t2");
        assert!(optimistic);
        let reverted = tracker.toggle("t2");
        assert!(!reverted);
        assert!(tracker.is_node_completed("t1"));
        assert!(!tracker.is_node_completed("t2"));
    }
}
