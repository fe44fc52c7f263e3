use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::{Handle, NodeHandle};
use super::node::{Node, Side};
use crate::error::InsertError;

/// Explicit stack for whole-tree walks, so degenerate (list-shaped) trees never recurse.
type Worklist = SmallVec<[Handle; 32]>;

/// The unbalanced BST engine backing `Tree`.
#[derive(Clone)]
pub(crate) struct RawTree<K, V> {
    /// Arena storing every node; `len()` of the arena is the number of entries.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<K, V> RawTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of entries in the tree.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree contains no entries.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), InsertError> {
        self.nodes.try_reserve(additional)
    }

    /// Destroys every node. Issued handles become stale.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Checks that `handle` still names a live node of this tree.
    #[inline]
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Option<Handle> {
        self.nodes.resolve(handle)
    }

    #[inline]
    pub(crate) fn publish(&self, handle: Handle) -> NodeHandle {
        self.nodes.publish(handle)
    }

    /// Follows `left` links from `start` until none remain.
    pub(crate) fn minimum(&self, start: Handle) -> Handle {
        let mut current = start;
        while let Some(left) = self.nodes.get(current).left() {
            current = left;
        }
        current
    }

    /// Follows `right` links from `start` until none remain.
    pub(crate) fn maximum(&self, start: Handle) -> Handle {
        let mut current = start;
        while let Some(right) = self.nodes.get(current).right() {
            current = right;
        }
        current
    }

    /// The smallest node of the tree.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.minimum(root))
    }

    /// The largest node of the tree.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.maximum(root))
    }

    /// The next node in key order.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right() {
            return Some(self.minimum(right));
        }
        // Climb until we arrive from a left child; that parent is the successor.
        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).left() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// The previous node in key order.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.nodes.get(handle).left() {
            return Some(self.maximum(left));
        }
        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).right() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Puts `replacement` (and its subtree) where `target` hangs, fixing both directions of the
    /// link. `target` keeps its own child links; the caller decides what happens to them.
    fn transplant(&mut self, target: Handle, replacement: Option<Handle>) {
        let parent = self.nodes.get(target).parent();
        if let Some(replacement) = replacement {
            self.nodes.get_mut(replacement).set_parent(parent);
        }
        match parent {
            None => self.root = replacement,
            Some(parent) => {
                let side = self
                    .nodes
                    .get(parent)
                    .side_of(target)
                    .expect("`RawTree::transplant()` - `target` is not a child of its parent!");
                self.nodes.get_mut(parent).set_child(side, replacement);
            }
        }
    }

    /// Hangs `child` under `parent` on `side`, setting both links.
    fn attach(&mut self, parent: Handle, side: Side, child: Handle) {
        self.nodes.get_mut(parent).set_child(side, Some(child));
        self.nodes.get_mut(child).set_parent(Some(parent));
    }

    /// Unlinks `handle`, frees its slot, and returns its entry.
    pub(crate) fn delete(&mut self, handle: Handle) -> (K, V) {
        let node = self.nodes.get(handle);
        match (node.left(), node.right()) {
            (None, right) => {
                tracing::trace!("delete: no left child, lifting right subtree");
                self.transplant(handle, right);
            }
            (Some(left), None) => {
                tracing::trace!("delete: no right child, lifting left subtree");
                self.transplant(handle, Some(left));
            }
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                tracing::trace!(adjacent = successor == right, "delete: two children, splicing in successor");
                if successor != right {
                    let successor_right = self.nodes.get(successor).right();
                    self.transplant(successor, successor_right);
                    self.attach(successor, Side::Right, right);
                }
                self.transplant(handle, Some(successor));
                self.attach(successor, Side::Left, left);
            }
        }
        self.nodes.take(handle).into_entry()
    }

    /// Removes every node in pre-order, handing each entry to `sink`. Parents are always seen
    /// before their children, so re-inserting in this order keeps every parent above its children.
    pub(crate) fn drain_preorder(&mut self, mut sink: impl FnMut(K, V)) {
        let mut worklist: Worklist = self.root.take().into_iter().collect();
        while let Some(handle) = worklist.pop() {
            let node = self.nodes.take(handle);
            // Right first, so the left subtree is visited first.
            worklist.extend(node.right());
            worklist.extend(node.left());
            let (key, value) = node.into_entry();
            sink(key, value);
        }
        self.nodes.clear();
    }
}

impl<K: Ord, V> RawTree<K, V> {
    /// Descends from `start` towards `key` and returns the first node with an equal key.
    pub(crate) fn search<Q>(&self, start: Handle, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = start;
        loop {
            let node = self.nodes.get(current);
            match node.key().borrow().cmp(key) {
                Ordering::Less => current = node.right()?,
                Ordering::Greater => current = node.left()?,
                Ordering::Equal => return Some(current),
            }
        }
    }

    /// Searches the whole tree.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(self.root?, key)
    }

    /// Inserts a new node. Equal keys go to the right, so they sort after existing ones.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<NodeHandle, InsertError> {
        let mut slot: Option<(Handle, Side)> = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = if key < *node.key() { Side::Left } else { Side::Right };
            slot = Some((handle, side));
            current = node.child(side);
        }

        let mut node = Node::new(key, value);
        node.set_parent(slot.map(|(parent, _)| parent));
        let handle = self.nodes.try_alloc(node)?;

        match slot {
            None => self.root = Some(handle.slot()),
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, Some(handle.slot())),
        }
        Ok(handle)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::manual_assert, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    impl<K: Ord + core::fmt::Debug, V> RawTree<K, V> {
        /// Validates order, parent links, and reachability. Panics with every violation found.
        pub(crate) fn validate_invariants(&self) {
            let Some(root) = self.root else {
                assert_eq!(self.len(), 0, "Empty tree should have len 0");
                return;
            };

            let mut errors: Vec<String> = Vec::new();
            if self.nodes.get(root).parent().is_some() {
                errors.push("root has a parent".into());
            }

            // (node, lower bound inclusive, upper bound exclusive)
            let mut stack: Vec<(Handle, Option<&K>, Option<&K>)> = alloc::vec![(root, None, None)];
            let mut reachable = 0usize;
            while let Some((handle, lower, upper)) = stack.pop() {
                reachable += 1;
                if reachable > self.len() {
                    errors.push(alloc::format!("more nodes reachable than len={}", self.len()));
                    break;
                }

                let node = self.nodes.get(handle);
                let key = node.key();
                if lower.is_some_and(|lower| key < lower) {
                    errors.push(alloc::format!("{:?} is below its lower bound {:?}", key, lower));
                }
                if upper.is_some_and(|upper| key >= upper) {
                    errors.push(alloc::format!("{:?} is not below its upper bound {:?}", key, upper));
                }

                for (side, child) in [(Side::Left, node.left()), (Side::Right, node.right())] {
                    let Some(child) = child else { continue };
                    if self.nodes.get(child).parent() != Some(handle) {
                        errors.push(alloc::format!("{:?} child of {:?} has a wrong parent link", side, key));
                    }
                    match side {
                        Side::Left => stack.push((child, lower, Some(key))),
                        Side::Right => stack.push((child, Some(key), upper)),
                    }
                }
            }

            if reachable != self.len() {
                errors.push(alloc::format!("reachable={} but len={}", reachable, self.len()));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        fn in_order_keys(&self) -> Vec<&K> {
            let mut keys = Vec::new();
            let mut current = self.first();
            while let Some(handle) = current {
                keys.push(self.nodes.get(handle).key());
                current = self.successor(handle);
            }
            keys
        }
    }

    fn build(keys: &[i32]) -> (RawTree<i32, i32>, Vec<NodeHandle>) {
        let mut tree = RawTree::new();
        let handles = keys.iter().map(|&key| tree.insert(key, key * 10).unwrap()).collect();
        tree.validate_invariants();
        (tree, handles)
    }

    #[test]
    fn empty_tree_has_no_extremes() {
        let tree: RawTree<i32, i32> = RawTree::new();
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert_eq!(tree.find(&0), None);
        tree.validate_invariants();
    }

    #[test]
    fn branching_shape_links() {
        //        5
        //       / \
        //      4   6
        //     /     \
        //    2       9
        //   / \     /
        //  1   3   7
        // /         \
        // 0          8
        let (tree, handles) = build(&[5, 4, 2, 3, 1, 0, 6, 9, 7, 8]);
        let slot = |i: usize| handles[i].slot();

        assert_eq!(tree.root(), Some(slot(0)));
        assert_eq!(tree.node(slot(0)).left(), Some(slot(1)));
        assert_eq!(tree.node(slot(0)).right(), Some(slot(6)));
        assert_eq!(tree.node(slot(1)).left(), Some(slot(2)));
        assert_eq!(tree.node(slot(1)).right(), None);
        assert_eq!(tree.node(slot(2)).left(), Some(slot(4)));
        assert_eq!(tree.node(slot(2)).right(), Some(slot(3)));
        assert_eq!(tree.node(slot(6)).right(), Some(slot(7)));
        assert_eq!(tree.node(slot(7)).left(), Some(slot(8)));
        assert_eq!(tree.node(slot(8)).right(), Some(slot(9)));
        assert_eq!(tree.node(slot(9)).parent(), Some(slot(8)));

        assert_eq!(tree.minimum(slot(1)), slot(5));
        assert_eq!(tree.maximum(slot(6)), slot(7));
        assert_eq!(tree.in_order_keys(), [&0, &1, &2, &3, &4, &5, &6, &7, &8, &9]);
    }

    #[test]
    fn successor_climbs_out_of_left_subtree() {
        let (tree, handles) = build(&[5, 4, 2, 3, 1, 0, 6, 9, 7, 8]);
        // 3 has no right child: climb past 2 (reached from its right) to 4 (reached from its left).
        assert_eq!(tree.successor(handles[3].slot()), Some(handles[1].slot()));
        assert_eq!(tree.successor(handles[1].slot()), Some(handles[0].slot()));
        // 8 is the right child of 7, which is the left child of 9.
        assert_eq!(tree.successor(handles[9].slot()), Some(handles[7].slot()));
        assert_eq!(tree.successor(handles[7].slot()), None);
        assert_eq!(tree.predecessor(handles[6].slot()), Some(handles[0].slot()));
        assert_eq!(tree.predecessor(handles[5].slot()), None);
    }

    #[test]
    fn delete_covers_every_relink_case() {
        // Leaf.
        let (mut tree, handles) = build(&[5, 4, 2, 3, 1, 0, 6, 9, 7, 8]);
        assert_eq!(tree.delete(handles[5].slot()), (0, 0));
        tree.validate_invariants();

        // Only a left child (4 -> 2).
        assert_eq!(tree.delete(handles[1].slot()), (4, 40));
        tree.validate_invariants();
        assert_eq!(tree.node(handles[0].slot()).left(), Some(handles[2].slot()));

        // Only a right child (6 -> 9).
        assert_eq!(tree.delete(handles[6].slot()), (6, 60));
        tree.validate_invariants();
        assert_eq!(tree.node(handles[0].slot()).right(), Some(handles[7].slot()));

        // Two children, successor is the immediate right child (2 -> 3).
        assert_eq!(tree.delete(handles[2].slot()), (2, 20));
        tree.validate_invariants();
        assert_eq!(tree.node(handles[0].slot()).left(), Some(handles[3].slot()));
        assert_eq!(tree.node(handles[3].slot()).left(), Some(handles[4].slot()));

        // Two children, successor deeper in the right subtree (root 5 -> 7, 8 moves up to 9).
        assert_eq!(tree.delete(handles[0].slot()), (5, 50));
        tree.validate_invariants();
        assert_eq!(tree.root(), Some(handles[8].slot()));
        assert_eq!(tree.node(handles[7].slot()).left(), Some(handles[9].slot()));
        assert_eq!(tree.in_order_keys(), [&1, &3, &7, &8, &9]);
    }

    #[test]
    fn equal_keys_stay_in_insertion_order() {
        let (tree, handles) = build(&[2, 1, 2, 3, 2]);
        let mut order = Vec::new();
        let mut current = tree.first();
        while let Some(handle) = current {
            order.push(handle);
            current = tree.successor(handle);
        }
        let expected: Vec<_> = [1, 0, 2, 4, 3].iter().map(|&i| handles[i].slot()).collect();
        assert_eq!(order, expected);
        assert_eq!(tree.find(&2), Some(handles[0].slot()));
    }

    #[test]
    fn drain_preorder_visits_parents_first() {
        let (mut tree, _) = build(&[5, 4, 2, 3, 1, 0, 6, 9, 7, 8]);
        let mut keys = Vec::new();
        tree.drain_preorder(|key, _| keys.push(key));
        assert_eq!(keys, [5, 4, 2, 1, 0, 3, 6, 9, 7, 8]);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        tree.validate_invariants();
    }

    #[test]
    fn degenerate_tree_is_walked_without_recursion() {
        let keys: Vec<i32> = (0..5_000).collect();
        let mut tree = RawTree::new();
        let mut last = None;
        for &key in &keys {
            // Ascending keys: always attach to the right of the previous maximum.
            let handle = tree.insert(key, ()).unwrap();
            assert_eq!(tree.node(handle.slot()).parent(), last);
            last = Some(handle.slot());
        }
        let cloned = tree.clone();
        let mut drained = 0;
        tree.drain_preorder(|_, ()| drained += 1);
        assert_eq!(drained, keys.len());
        assert_eq!(cloned.len(), keys.len());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
        DeleteNth(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0i32..200).prop_map(Op::Insert),
            2 => (0i32..200).prop_map(Op::Remove),
            1 => any::<usize>().prop_map(Op::DeleteNth),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree: RawTree<i32, i32> = RawTree::new();
            let mut live: Vec<NodeHandle> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        live.push(tree.insert(key, key * 2).unwrap());
                    }
                    Op::Remove(key) => {
                        if let Some(handle) = tree.find(&key) {
                            let (k, v) = tree.delete(handle);
                            prop_assert_eq!((k, v), (key, key * 2));
                        }
                        live.retain(|&h| tree.resolve(h).is_some());
                    }
                    Op::DeleteNth(which) => {
                        if live.is_empty() {
                            continue;
                        }
                        let handle = live.swap_remove(which % live.len());
                        let slot = tree.resolve(handle).unwrap();
                        tree.delete(slot);
                        prop_assert_eq!(tree.resolve(handle), None);
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), live.len());
            }
        }

        #[test]
        fn successor_and_predecessor_are_inverse(keys in prop::collection::vec(-50i32..50, 1..200)) {
            let (tree, handles) = build(&keys);
            for handle in handles {
                let slot = handle.slot();
                if let Some(next) = tree.successor(slot) {
                    prop_assert_eq!(tree.predecessor(next), Some(slot));
                    prop_assert!(tree.node(next).key() >= tree.node(slot).key());
                }
                if let Some(prev) = tree.predecessor(slot) {
                    prop_assert_eq!(tree.successor(prev), Some(slot));
                }
            }
        }

        #[test]
        fn in_order_walk_is_sorted(keys in prop::collection::vec(-1_000_000i32..1_000_000, 0..300)) {
            let (tree, _) = build(&keys);
            let mut expected = keys.clone();
            expected.sort_unstable();
            let walked: Vec<i32> = tree.in_order_keys().into_iter().copied().collect();
            prop_assert_eq!(walked, expected);
        }
    }
}
