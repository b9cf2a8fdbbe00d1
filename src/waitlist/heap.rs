//! Waitlist implementation
//!
//! Binary min-heap with a hard capacity.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Reservation;

/// Capacity-bounded min-priority queue of reservations
#[derive(Debug, Clone)]
pub struct Waitlist {
    /// Max-heap over reversed reservations, i.e. a min-heap
    heap: BinaryHeap<Reverse<Reservation>>,

    /// Max number of pending reservations
    capacity: usize,
}

impl Waitlist {
    /// Create an empty waitlist holding at most `capacity` reservations
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue a reservation.
    ///
    /// Returns the reservation back if the waitlist is already full; the
    /// queue is left untouched in that case.
    pub fn offer(&mut self, reservation: Reservation) -> Result<(), Reservation> {
        if self.is_full() {
            return Err(reservation);
        }
        self.heap.push(Reverse(reservation));
        Ok(())
    }

    /// Remove and return the reservation with the lowest (priority, sequence)
    pub fn pop(&mut self) -> Option<Reservation> {
        self.heap.pop().map(|Reverse(r)| r)
    }

    /// Look at the next reservation to be served without removing it
    pub fn peek(&self) -> Option<&Reservation> {
        self.heap.peek().map(|Reverse(r)| r)
    }

    /// Remove every reservation, yielding them in service order
    pub fn drain_ordered(&mut self) -> Vec<Reservation> {
        let mut drained = Vec::with_capacity(self.heap.len());
        while let Some(reservation) = self.pop() {
            drained.push(reservation);
        }
        drained
    }

    /// Reservations in service order, without consuming them
    pub fn snapshot(&self) -> Vec<Reservation> {
        let mut pending: Vec<Reservation> = self.heap.iter().map(|Reverse(r)| *r).collect();
        pending.sort_unstable();
        pending
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
