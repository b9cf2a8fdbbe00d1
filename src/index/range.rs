//! Range iterator
//!
//! Lazy in-order traversal bounded by `[lo, hi]`.

use super::tree::{NodeId, NIL};
use super::{BookId, OrderedIndex};

/// Ascending iterator over the entries of an `OrderedIndex` within a key range
///
/// Subtrees entirely below `lo` are never entered, and iteration stops at
/// the first key above `hi`.
pub struct Range<'a, V> {
    index: &'a OrderedIndex<V>,

    /// Nodes whose left subtree has been handled, next smallest on top
    stack: Vec<NodeId>,

    lo: BookId,
    hi: BookId,
}

impl<'a, V> Range<'a, V> {
    pub(super) fn new(index: &'a OrderedIndex<V>, lo: BookId, hi: BookId) -> Self {
        let mut range = Self {
            index,
            stack: Vec::new(),
            lo,
            hi,
        };
        range.descend(index.root());
        range
    }

    /// Push the path towards the smallest key >= lo in the subtree at `node`
    fn descend(&mut self, mut node: NodeId) {
        while node != NIL {
            if self.index.key_of(node) >= self.lo {
                self.stack.push(node);
                node = self.index.left_of(node);
            } else {
                node = self.index.right_of(node);
            }
        }
    }
}

impl<'a, V> Iterator for Range<'a, V> {
    type Item = (BookId, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let key = self.index.key_of(node);
        if key > self.hi {
            self.stack.clear();
            return None;
        }

        self.descend(self.index.right_of(node));
        self.index.value_of(node).map(|value| (key, value))
    }
}
