//! Index Module
//!
//! Ordered in-memory index of catalogue entries keyed by book id.
//!
//! ## Responsibilities
//! - Point lookup, insert and delete in O(log n)
//! - Ascending range scans pruned by the range bounds
//! - Nearest-key lookup with tie reporting
//! - Count every effective node recolouring during rebalancing
//!
//! ## Data Structure Choice
//! A red-black tree stored in an arena (`Vec` of nodes addressed by index):
//! - Child links are the only ownership edges, parent links are plain indices
//! - Slot 0 is the shared black sentinel terminating every leaf path
//! - Freed slots are recycled through a free list
//!
//! ```text
//!              ┌──────────┐
//!              │ 20 black │
//!              └────┬─────┘
//!           ┌───────┴───────┐
//!      ┌────▼───┐      ┌────▼───┐
//!      │ 10 red │      │ 30 red │
//!      └───┬────┘      └───┬────┘
//!        NIL NIL         NIL NIL      (all NIL links point at slot 0)
//! ```

mod range;
mod tree;

use thiserror::Error;

pub use range::Range;
pub use tree::OrderedIndex;

/// Book identifier, the index key
pub type BookId = i64;

/// Node colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Result of a nearest-key lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Closest<'a, V> {
    /// The target key itself is present
    Exact(&'a V),

    /// The single entry with the smallest distance to the target
    Nearest(&'a V),

    /// Two entries at equal distance, lower key first
    Tie(&'a V, &'a V),
}

impl<'a, V> Closest<'a, V> {
    /// Matched entries in ascending key order
    pub fn into_vec(self) -> Vec<&'a V> {
        match self {
            Closest::Exact(v) | Closest::Nearest(v) => vec![v],
            Closest::Tie(lower, higher) => vec![lower, higher],
        }
    }
}

/// A broken red-black or search-tree property, found by `OrderedIndex::check`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeViolation {
    #[error("root is red")]
    RedRoot,

    #[error("sentinel is not black")]
    RedSentinel,

    #[error("red node {0} has a red child")]
    RedChild(BookId),

    #[error("unequal black height below node {key}: left {left}, right {right}")]
    BlackHeight {
        key: BookId,
        left: usize,
        right: usize,
    },

    #[error("node {0} is out of search order")]
    Order(BookId),

    #[error("node {0} has a stale parent link")]
    ParentLink(BookId),

    #[error("index reports {expected} entries but {found} are reachable")]
    Length { expected: usize, found: usize },
}
