//! Waitlist Module
//!
//! Bounded priority queue of pending reservations, one per book.
//!
//! ## Responsibilities
//! - Reject offers beyond a fixed capacity without touching the queue
//! - Serve the reservation with the lowest (priority, sequence) first
//! - Drain every reservation in service order when a book is deleted
//! - Produce a read-only ordered snapshot for reports
//!
//! ## Ordering
//! ```text
//!   (priority, sequence) ascending
//!       priority: lower number is served first
//!       sequence: earlier arrival wins a priority tie
//! ```

mod heap;

use std::cmp::Ordering;

pub use heap::Waitlist;

/// Patron identifier
pub type PatronId = i64;

/// Priority rank (lower value is served first)
pub type Priority = i64;

/// A single pending claim on a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// Patron waiting for the book
    pub patron: PatronId,

    /// Priority rank
    pub priority: Priority,

    /// Arrival order, unique per library
    pub sequence: u64,
}

impl Reservation {
    pub fn new(patron: PatronId, priority: Priority, sequence: u64) -> Self {
        Self {
            patron,
            priority,
            sequence,
        }
    }

    /// The key the waitlist orders by
    pub fn service_key(&self) -> (Priority, u64) {
        (self.priority, self.sequence)
    }
}

impl Ord for Reservation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.service_key()
            .cmp(&other.service_key())
            .then_with(|| self.patron.cmp(&other.patron))
    }
}

impl PartialOrd for Reservation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
