// src/crawl/frontier.rs
// =============================================================================
// This module implements the crawl frontier: the pages we still have to visit
// plus the set of links we have already dealt with.
//
// Two collections work together:
// - pending: the URLs waiting to be fetched (a stack by default)
// - visited: every link that has been classified, so we never look at it again
//
// A third set, `scheduled`, remembers everything that was ever pushed. That
// is what guarantees a URL is pushed (and therefore popped) at most once,
// even the root, which is never in `visited` at the start.
//
// Rust concepts:
// - VecDeque: One collection that can act as a stack OR a queue
// - HashSet: O(1) "have we seen this?" checks
// - Copy enums: TraversalOrder is tiny, so we pass it by value
// =============================================================================

use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Order in which discovered pages are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Most recently discovered page first (stack)
    #[default]
    DepthFirst,
    /// Oldest discovered page first (queue)
    BreadthFirst,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontierError {
    #[error("frontier is empty")]
    Empty,
}

#[derive(Debug)]
pub struct Frontier {
    pending: VecDeque<String>,
    scheduled: HashSet<String>,
    visited: HashSet<String>,
    order: TraversalOrder,
}

impl Frontier {
    // Creates a frontier holding exactly the root URL
    pub fn new(root: &str, order: TraversalOrder) -> Self {
        let mut frontier = Self {
            pending: VecDeque::new(),
            scheduled: HashSet::new(),
            visited: HashSet::new(),
            order,
        };
        frontier.push(root);
        frontier
    }

    // Adds a URL to the pending work
    //
    // Returns false (and does nothing) if this URL was pushed before.
    pub fn push(&mut self, url: &str) -> bool {
        if !self.scheduled.insert(url.to_string()) {
            return false;
        }
        self.pending.push_back(url.to_string());
        true
    }

    // Takes the next URL to visit
    //
    // DepthFirst pops from the back (newest), BreadthFirst from the front (oldest).
    pub fn pop(&mut self) -> Result<String, FrontierError> {
        let next = match self.order {
            TraversalOrder::DepthFirst => self.pending.pop_back(),
            TraversalOrder::BreadthFirst => self.pending.pop_front(),
        };
        next.ok_or(FrontierError::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    /// Read-only view of the visited set, handed to the link classifier
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }
}
