//! Duplicate suppression for overlapping extraction queries.

use std::collections::HashSet;

use crate::xml::NodeId;

/// Tracks which source nodes have already contributed output.
///
/// The same paragraph can be reached through more than one query (a direct
/// child pass and an all-descendants pass, or a list walk and the enclosing
/// paragraph scan). Identity is the arena node id, not content: two distinct
/// nodes with identical text are independent.
///
/// One instance is owned by each top-level field extraction and passed by
/// reference through the recursive descent. It must be reset before each
/// independent field (brief, detailed, every parameter description, ...);
/// sharing a stale set across fields silently drops content.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<NodeId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Has this node already produced output in the current extraction?
    pub fn was_visited(&self, id: NodeId) -> bool {
        self.seen.contains(&id)
    }

    /// Record a node as handled.
    pub fn mark_visited(&mut self, id: NodeId) {
        self.seen.insert(id);
    }

    /// Clear all state, ready for the next independent extraction.
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}
