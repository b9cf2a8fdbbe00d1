//! Tests for Waitlist
//!
//! Tests verify:
//! - Capacity limit rejects without mutating
//! - Service order by (priority, sequence)
//! - Ordered drain and non-consuming snapshot

use shelfkv::waitlist::{Reservation, Waitlist};

// =============================================================================
// Capacity Tests
// =============================================================================

#[test]
fn test_new_waitlist_is_empty() {
    let waitlist = Waitlist::with_capacity(20);
    assert!(waitlist.is_empty());
    assert_eq!(waitlist.len(), 0);
    assert_eq!(waitlist.capacity(), 20);
    assert!(waitlist.peek().is_none());
}

#[test]
fn test_offer_beyond_capacity_rejects_only_the_last() {
    let mut waitlist = Waitlist::with_capacity(20);
    for i in 0..20 {
        assert!(waitlist.offer(Reservation::new(i, 1, i as u64)).is_ok());
    }
    assert!(waitlist.is_full());

    let extra = Reservation::new(99, 0, 20);
    assert_eq!(waitlist.offer(extra), Err(extra));
    assert_eq!(waitlist.len(), 20);
    // The rejected reservation never made it in, even with the best priority
    assert_ne!(waitlist.peek().map(|r| r.patron), Some(99));
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[test]
fn test_pop_lowest_priority_first() {
    let mut waitlist = Waitlist::with_capacity(20);
    waitlist.offer(Reservation::new(1, 5, 0)).unwrap();
    waitlist.offer(Reservation::new(2, 1, 1)).unwrap();
    waitlist.offer(Reservation::new(3, 3, 2)).unwrap();

    assert_eq!(waitlist.pop().map(|r| r.patron), Some(2));
    assert_eq!(waitlist.pop().map(|r| r.patron), Some(3));
    assert_eq!(waitlist.pop().map(|r| r.patron), Some(1));
    assert_eq!(waitlist.pop(), None);
}

#[test]
fn test_equal_priority_served_in_arrival_order() {
    let mut waitlist = Waitlist::with_capacity(20);
    // Patron ids deliberately out of order relative to arrival
    waitlist.offer(Reservation::new(30, 2, 0)).unwrap();
    waitlist.offer(Reservation::new(10, 2, 1)).unwrap();
    waitlist.offer(Reservation::new(20, 2, 2)).unwrap();

    let order: Vec<i64> = waitlist.drain_ordered().iter().map(|r| r.patron).collect();
    assert_eq!(order, vec![30, 10, 20]);
}

#[test]
fn test_repeated_pop_is_non_decreasing() {
    let mut waitlist = Waitlist::with_capacity(20);
    let priorities = [4, 2, 9, 2, 0, 7, 4, 4, 1, 3, 8, 2];
    for (seq, &priority) in priorities.iter().enumerate() {
        waitlist
            .offer(Reservation::new(seq as i64, priority, seq as u64))
            .unwrap();
    }

    let mut last = None;
    while let Some(reservation) = waitlist.pop() {
        let key = reservation.service_key();
        if let Some(prev) = last {
            assert!(prev <= key, "{:?} served before {:?}", prev, key);
        }
        last = Some(key);
    }
    assert_eq!(waitlist.len(), 0);
}

// =============================================================================
// Drain / Snapshot Tests
// =============================================================================

#[test]
fn test_drain_ordered_empties_waitlist() {
    let mut waitlist = Waitlist::with_capacity(20);
    waitlist.offer(Reservation::new(9, 3, 0)).unwrap();
    waitlist.offer(Reservation::new(7, 1, 1)).unwrap();
    waitlist.offer(Reservation::new(8, 1, 2)).unwrap();

    let drained: Vec<i64> = waitlist.drain_ordered().iter().map(|r| r.patron).collect();
    assert_eq!(drained, vec![7, 8, 9]);
    assert!(waitlist.is_empty());
    assert!(waitlist.drain_ordered().is_empty());
}

#[test]
fn test_snapshot_does_not_consume() {
    let mut waitlist = Waitlist::with_capacity(20);
    waitlist.offer(Reservation::new(1, 2, 0)).unwrap();
    waitlist.offer(Reservation::new(2, 1, 1)).unwrap();

    let snapshot: Vec<i64> = waitlist.snapshot().iter().map(|r| r.patron).collect();
    assert_eq!(snapshot, vec![2, 1]);
    assert_eq!(waitlist.len(), 2);
    assert_eq!(waitlist.peek().map(|r| r.patron), Some(2));
}

#[test]
fn test_negative_priority_ranks_first() {
    let mut waitlist = Waitlist::with_capacity(4);
    waitlist.offer(Reservation::new(1, 0, 0)).unwrap();
    waitlist.offer(Reservation::new(2, -5, 1)).unwrap();
    assert_eq!(waitlist.pop().map(|r| r.patron), Some(2));
}
