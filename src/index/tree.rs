//! Red-black tree implementation
//!
//! Arena-backed tree with a shared sentinel at slot 0.

use super::{BookId, Closest, Color, Range, TreeViolation};

/// Index of a node slot in the arena
pub(super) type NodeId = usize;

/// The sentinel slot. Black, never holds a value.
pub(super) const NIL: NodeId = 0;

#[derive(Debug)]
struct Node<V> {
    key: BookId,
    /// `None` only for the sentinel and for freed slots
    value: Option<V>,
    color: Color,
    parent: NodeId,
    left: NodeId,
    right: NodeId,
}

impl<V> Node<V> {
    fn sentinel() -> Self {
        Self {
            key: 0,
            value: None,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }
}

/// Ordered index keyed by book id, balanced as a red-black tree
///
/// ## Colour flip accounting
/// `color_flips` grows by one for every node whose stored colour actually
/// changes during insert or delete rebalancing. Rotations only move links.
#[derive(Debug)]
pub struct OrderedIndex<V> {
    /// Node arena, slot 0 is the sentinel
    nodes: Vec<Node<V>>,

    /// Recycled slots
    free: Vec<NodeId>,

    root: NodeId,

    /// Number of live entries
    len: usize,

    /// Cumulative effective recolourings
    color_flips: u64,
}

impl<V> OrderedIndex<V> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            free: Vec::new(),
            root: NIL,
            len: 0,
            color_flips: 0,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cumulative number of effective colour changes. Never decreases.
    pub fn color_flip_count(&self) -> u64 {
        self.color_flips
    }

    pub fn contains(&self, key: BookId) -> bool {
        self.find(key) != NIL
    }

    /// Look up an entry by key
    pub fn get(&self, key: BookId) -> Option<&V> {
        self.nodes[self.find(key)].value.as_ref()
    }

    /// Look up an entry by key for in-place mutation
    pub fn get_mut(&mut self, key: BookId) -> Option<&mut V> {
        let node = self.find(key);
        self.nodes[node].value.as_mut()
    }

    /// Entries with `lo <= key <= hi`, ascending
    pub fn range(&self, lo: BookId, hi: BookId) -> Range<'_, V> {
        Range::new(self, lo, hi)
    }

    /// All entries, ascending
    pub fn iter(&self) -> Range<'_, V> {
        Range::new(self, BookId::MIN, BookId::MAX)
    }

    /// Entry closest to `target`.
    ///
    /// Walks from the root tracking the nearest key below and above the
    /// target. An exact match wins outright; otherwise the smaller distance
    /// wins and equal distances return both entries. `None` on an empty index.
    pub fn closest(&self, target: BookId) -> Option<Closest<'_, V>> {
        let mut lower = NIL;
        let mut higher = NIL;
        let mut current = self.root;

        while current != NIL {
            let key = self.nodes[current].key;
            if key < target {
                lower = current;
                current = self.nodes[current].right;
            } else if key > target {
                higher = current;
                current = self.nodes[current].left;
            } else {
                return self.nodes[current].value.as_ref().map(Closest::Exact);
            }
        }

        let lower_value = self.nodes[lower].value.as_ref();
        let higher_value = self.nodes[higher].value.as_ref();

        match (lower_value, higher_value) {
            (Some(l), Some(h)) => {
                let below = target.abs_diff(self.nodes[lower].key);
                let above = self.nodes[higher].key.abs_diff(target);
                Some(match below.cmp(&above) {
                    std::cmp::Ordering::Less => Closest::Nearest(l),
                    std::cmp::Ordering::Greater => Closest::Nearest(h),
                    std::cmp::Ordering::Equal => Closest::Tie(l, h),
                })
            }
            (Some(l), None) => Some(Closest::Nearest(l)),
            (None, Some(h)) => Some(Closest::Nearest(h)),
            (None, None) => None,
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert an entry.
    ///
    /// The index does not reject duplicate keys: an equal key descends to
    /// the right, exactly like a larger one.
    pub fn insert(&mut self, key: BookId, value: V) {
        let node = self.alloc(key, value);

        let mut parent = NIL;
        let mut current = self.root;
        while current != NIL {
            parent = current;
            current = if key < self.nodes[current].key {
                self.nodes[current].left
            } else {
                self.nodes[current].right
            };
        }

        self.nodes[node].parent = parent;
        self.len += 1;

        if parent == NIL {
            // A lone root is created black, it is not a recolouring
            self.root = node;
            self.nodes[node].color = Color::Black;
        } else {
            if key < self.nodes[parent].key {
                self.nodes[parent].left = node;
            } else {
                self.nodes[parent].right = node;
            }
            self.insert_fixup(node);
        }

        debug_assert!(self.check().is_ok(), "red-black invariant broken by insert");
    }

    /// Remove an entry and hand its value back. `None` if the key is absent,
    /// in which case the tree is untouched.
    pub fn remove(&mut self, key: BookId) -> Option<V> {
        let z = self.find(key);
        if z == NIL {
            return None;
        }

        let mut removed_color = self.nodes[z].color;
        let x;

        if self.nodes[z].left == NIL {
            x = self.nodes[z].right;
            self.transplant(z, x);
        } else if self.nodes[z].right == NIL {
            x = self.nodes[z].left;
            self.transplant(z, x);
        } else {
            let y = self.minimum(self.nodes[z].right);
            removed_color = self.nodes[y].color;
            x = self.nodes[y].right;

            if self.nodes[y].parent == z {
                self.nodes[x].parent = y;
            } else {
                self.transplant(y, x);
                let z_right = self.nodes[z].right;
                self.nodes[y].right = z_right;
                self.nodes[z_right].parent = y;
            }

            self.transplant(z, y);
            let z_left = self.nodes[z].left;
            self.nodes[y].left = z_left;
            self.nodes[z_left].parent = y;
            // y inherits z's colour as part of the splice, not a rebalance
            self.nodes[y].color = self.nodes[z].color;
        }

        if removed_color == Color::Black {
            self.delete_fixup(x);
        }

        // The sentinel may have been used as a temporary parent holder
        self.nodes[NIL].parent = NIL;
        self.len -= 1;
        let value = self.release(z);

        debug_assert!(self.check().is_ok(), "red-black invariant broken by remove");
        value
    }

    // =========================================================================
    // Invariant checking
    // =========================================================================

    /// Verify every red-black and search-tree property.
    ///
    /// Returns the black height of the tree (sentinel counted) on success.
    pub fn check(&self) -> Result<usize, TreeViolation> {
        if self.nodes[NIL].color != Color::Black {
            return Err(TreeViolation::RedSentinel);
        }
        if self.nodes[self.root].color != Color::Black {
            return Err(TreeViolation::RedRoot);
        }
        if self.root != NIL && self.nodes[self.root].parent != NIL {
            return Err(TreeViolation::ParentLink(self.nodes[self.root].key));
        }

        let mut found = 0;
        let height = self.check_subtree(self.root, None, None, &mut found)?;
        if found != self.len {
            return Err(TreeViolation::Length {
                expected: self.len,
                found,
            });
        }
        Ok(height)
    }

    fn check_subtree(
        &self,
        node: NodeId,
        lo: Option<BookId>,
        hi: Option<BookId>,
        found: &mut usize,
    ) -> Result<usize, TreeViolation> {
        if node == NIL {
            return Ok(1);
        }
        *found += 1;

        let n = &self.nodes[node];
        if lo.is_some_and(|lo| n.key < lo) || hi.is_some_and(|hi| n.key > hi) {
            return Err(TreeViolation::Order(n.key));
        }

        for child in [n.left, n.right] {
            if child == NIL {
                continue;
            }
            if self.nodes[child].parent != node {
                return Err(TreeViolation::ParentLink(self.nodes[child].key));
            }
            if n.color == Color::Red && self.nodes[child].color == Color::Red {
                return Err(TreeViolation::RedChild(n.key));
            }
        }

        let left = self.check_subtree(n.left, lo, Some(n.key), found)?;
        let right = self.check_subtree(n.right, Some(n.key), hi, found)?;
        if left != right {
            return Err(TreeViolation::BlackHeight {
                key: n.key,
                left,
                right,
            });
        }

        Ok(left + usize::from(n.color == Color::Black))
    }

    // =========================================================================
    // Arena access (shared with the range iterator)
    // =========================================================================

    pub(super) fn root(&self) -> NodeId {
        self.root
    }

    pub(super) fn key_of(&self, node: NodeId) -> BookId {
        self.nodes[node].key
    }

    pub(super) fn value_of(&self, node: NodeId) -> Option<&V> {
        self.nodes[node].value.as_ref()
    }

    pub(super) fn left_of(&self, node: NodeId) -> NodeId {
        self.nodes[node].left
    }

    pub(super) fn right_of(&self, node: NodeId) -> NodeId {
        self.nodes[node].right
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn find(&self, key: BookId) -> NodeId {
        let mut current = self.root;
        while current != NIL {
            let k = self.nodes[current].key;
            if key == k {
                return current;
            }
            current = if key < k {
                self.nodes[current].left
            } else {
                self.nodes[current].right
            };
        }
        NIL
    }

    fn minimum(&self, mut node: NodeId) -> NodeId {
        while self.nodes[node].left != NIL {
            node = self.nodes[node].left;
        }
        node
    }

    fn alloc(&mut self, key: BookId, value: V) -> NodeId {
        let node = Node {
            key,
            value: Some(value),
            color: Color::Red,
            parent: NIL,
            left: NIL,
            right: NIL,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, node: NodeId) -> Option<V> {
        let slot = &mut self.nodes[node];
        let value = slot.value.take();
        slot.parent = NIL;
        slot.left = NIL;
        slot.right = NIL;
        self.free.push(node);
        value
    }

    fn color(&self, node: NodeId) -> Color {
        self.nodes[node].color
    }

    fn parent(&self, node: NodeId) -> NodeId {
        self.nodes[node].parent
    }

    /// Assign a colour, counting it only if the stored value changes
    fn set_color(&mut self, node: NodeId, color: Color) {
        if self.nodes[node].color != color {
            self.nodes[node].color = color;
            self.color_flips += 1;
        }
    }

    /// Replace the subtree rooted at `u` with the one rooted at `v`
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.nodes[u].parent;
        if parent == NIL {
            self.root = v;
        } else if u == self.nodes[parent].left {
            self.nodes[parent].left = v;
        } else {
            self.nodes[parent].right = v;
        }
        self.nodes[v].parent = parent;
    }

    fn rotate_left(&mut self, x: NodeId) {
        let y = self.nodes[x].right;
        let y_left = self.nodes[y].left;

        self.nodes[x].right = y_left;
        if y_left != NIL {
            self.nodes[y_left].parent = x;
        }

        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        if parent == NIL {
            self.root = y;
        } else if x == self.nodes[parent].left {
            self.nodes[parent].left = y;
        } else {
            self.nodes[parent].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    fn rotate_right(&mut self, x: NodeId) {
        let y = self.nodes[x].left;
        let y_right = self.nodes[y].right;

        self.nodes[x].left = y_right;
        if y_right != NIL {
            self.nodes[y_right].parent = x;
        }

        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        if parent == NIL {
            self.root = y;
        } else if x == self.nodes[parent].right {
            self.nodes[parent].right = y;
        } else {
            self.nodes[parent].left = y;
        }

        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.color(self.parent(z)) == Color::Red {
            let p = self.parent(z);
            let g = self.parent(p);

            if p == self.nodes[g].left {
                let uncle = self.nodes[g].right;
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.nodes[p].right {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.nodes[g].left;
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.nodes[p].left {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.color(x) == Color::Black {
            let p = self.parent(x);

            if x == self.nodes[p].left {
                let mut s = self.nodes[p].right;

                if self.color(s) == Color::Red {
                    self.set_color(s, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    s = self.nodes[self.parent(x)].right;
                }

                if self.color(self.nodes[s].left) == Color::Black
                    && self.color(self.nodes[s].right) == Color::Black
                {
                    self.set_color(s, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.color(self.nodes[s].right) == Color::Black {
                        let near = self.nodes[s].left;
                        self.set_color(near, Color::Black);
                        self.set_color(s, Color::Red);
                        self.rotate_right(s);
                        s = self.nodes[self.parent(x)].right;
                    }

                    let p = self.parent(x);
                    let far = self.nodes[s].right;
                    self.set_color(s, self.color(p));
                    self.set_color(p, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_left(p);
                    x = self.root;
                }
            } else {
                let mut s = self.nodes[p].left;

                if self.color(s) == Color::Red {
                    self.set_color(s, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    s = self.nodes[self.parent(x)].left;
                }

                if self.color(self.nodes[s].right) == Color::Black
                    && self.color(self.nodes[s].left) == Color::Black
                {
                    self.set_color(s, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.color(self.nodes[s].left) == Color::Black {
                        let near = self.nodes[s].right;
                        self.set_color(near, Color::Black);
                        self.set_color(s, Color::Red);
                        self.rotate_left(s);
                        s = self.nodes[self.parent(x)].left;
                    }

                    let p = self.parent(x);
                    let far = self.nodes[s].left;
                    self.set_color(s, self.color(p));
                    self.set_color(p, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_right(p);
                    x = self.root;
                }
            }
        }

        self.set_color(x, Color::Black);
    }
}

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(keys: &[BookId]) -> OrderedIndex<BookId> {
        let mut index = OrderedIndex::new();
        for &key in keys {
            index.insert(key, key);
        }
        index
    }

    #[test]
    fn test_rotation_does_not_touch_colors_or_counter() {
        let mut index = index_of(&[10, 20, 30]);
        let before = index.color_flip_count();
        let colors: Vec<Color> = (1..index.nodes.len()).map(|n| index.color(n)).collect();

        let root = index.root;
        index.rotate_left(root);

        let after: Vec<Color> = (1..index.nodes.len()).map(|n| index.color(n)).collect();
        assert_eq!(colors, after);
        assert_eq!(index.color_flip_count(), before);
        assert_eq!(index.key_of(index.root), 30);
    }

    #[test]
    fn test_reassigning_same_color_is_not_a_flip() {
        let mut index = index_of(&[10, 20, 30]);
        let before = index.color_flip_count();

        // Rotate, then put every node back to the colour it already holds
        let root = index.root;
        index.rotate_right(root);
        for node in 1..index.nodes.len() {
            let current = index.color(node);
            index.set_color(node, current);
        }
        assert_eq!(index.color_flip_count(), before);

        // The new root is red after the rotation; blackening it is a real change
        let new_root = index.root;
        assert_eq!(index.color(new_root), Color::Red);
        index.set_color(new_root, Color::Black);
        assert_eq!(index.color_flip_count(), before + 1);
    }

    #[test]
    fn test_sentinel_parent_reset_after_remove() {
        let mut index = index_of(&[5, 3, 8, 1, 4, 7, 9]);
        index.remove(3);
        assert_eq!(index.parent(NIL), NIL);
        assert_eq!(index.color(NIL), Color::Black);
        assert!(index.check().is_ok());
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut index = index_of(&[1, 2, 3, 4]);
        let slots = index.nodes.len();
        index.remove(2);
        index.insert(5, 5);
        assert_eq!(index.nodes.len(), slots);
        assert_eq!(index.len(), 4);
        assert!(index.check().is_ok());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "red-black invariant broken by insert")]
    fn test_debug_build_checks_tree_after_insert() {
        let mut index = index_of(&[10, 20, 30]);
        // Left child now sorts after its parent
        let left = index.nodes[index.root].left;
        index.nodes[left].key = 1_000;
        index.insert(5, 5);
    }

    #[test]
    fn test_insert_fixup_case_one_counts_four_flips() {
        // 20 black root, 10 and 30 red children; inserting 5 recolours
        // 10, 30 black and 20 red, then the root goes back to black.
        let mut index = index_of(&[20, 10, 30]);
        assert_eq!(index.color_flip_count(), 0);
        index.insert(5, 5);
        assert_eq!(index.color_flip_count(), 4);
        assert!(index.check().is_ok());
    }
}
