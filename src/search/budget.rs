//! Search budget.
//!
//! Bounds one turn's search by recursion depth, node count and wall-clock
//! deadline. The evaluator consults the budget on entry to every node; once
//! the node or time limit is hit the budget stays exhausted and every
//! remaining node collapses to a static leaf.

use std::time::{Duration, Instant};

/// How often (in nodes) the wall clock is consulted.
const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// Resource limits and counters for one search.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    depth_limit: usize,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    nodes: u64,
    deepest: usize,
    depth_cutoffs: u64,
    exhausted: bool,
}

impl SearchBudget {
    /// A budget with no node, time or depth limit.
    pub fn unlimited() -> Self {
        SearchBudget {
            depth_limit: usize::MAX,
            node_limit: None,
            deadline: None,
            nodes: 0,
            deepest: 0,
            depth_cutoffs: 0,
            exhausted: false,
        }
    }

    /// A budget with the given node limit and time allowance.
    pub fn new(node_limit: Option<u64>, time_left: Option<Duration>) -> Self {
        SearchBudget {
            node_limit,
            deadline: time_left.map(|t| Instant::now() + t),
            ..Self::unlimited()
        }
    }

    /// Sets the recursion ceiling.
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Registers a node at `depth`. Returns false when the node must not be
    /// expanded, either because it sits at the depth ceiling or because the
    /// node or time budget is spent.
    pub fn enter(&mut self, depth: usize) -> bool {
        self.nodes += 1;
        self.deepest = self.deepest.max(depth);

        if self.exhausted {
            return false;
        }
        if self.node_limit.is_some_and(|limit| self.nodes > limit) {
            self.exhausted = true;
            return false;
        }
        if self.nodes % DEADLINE_CHECK_INTERVAL == 0 && self.deadline_passed() {
            self.exhausted = true;
            return false;
        }
        if depth >= self.depth_limit {
            self.depth_cutoffs += 1;
            return false;
        }
        true
    }

    /// Consults the wall clock immediately. Returns true if the budget is
    /// exhausted.
    pub fn poll(&mut self) -> bool {
        if !self.exhausted && self.deadline_passed() {
            self.exhausted = true;
        }
        self.exhausted
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// True once the node or time budget ran out.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Time left before the deadline, if there is one.
    pub fn remaining_time(&self) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Deepest ply visited so far.
    pub fn deepest(&self) -> usize {
        self.deepest
    }

    /// Number of nodes cut off by the depth ceiling.
    pub fn depth_cutoffs(&self) -> u64 {
        self.depth_cutoffs
    }

    /// The recursion ceiling.
    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}
