use core::borrow::Borrow;

use super::Tree;
use crate::raw::NodeHandle;

/// Handle-based access to individual nodes and their neighbours.
///
/// Every method taking a [`NodeHandle`] returns `None` for a handle that no longer names a node
/// of this tree (it was deleted, or the tree was cleared).
impl<K, V> Tree<K, V> {
    /// Returns `true` if `handle` names a node currently stored in this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let handle = tree.insert(1, ()).unwrap();
    /// assert!(tree.contains(handle));
    /// tree.delete(handle);
    /// assert!(!tree.contains(handle));
    /// ```
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.raw.resolve(handle).is_some()
    }

    /// Returns the key stored at `handle`.
    #[must_use]
    pub fn key(&self, handle: NodeHandle) -> Option<&K> {
        let handle = self.raw.resolve(handle)?;
        Some(self.raw.node(handle).key())
    }

    /// Returns the value stored at `handle`.
    #[must_use]
    pub fn value(&self, handle: NodeHandle) -> Option<&V> {
        let handle = self.raw.resolve(handle)?;
        Some(self.raw.node(handle).value())
    }

    /// Returns a mutable reference to the value stored at `handle`.
    ///
    /// Keys cannot be changed in place, since that could break the ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let handle = tree.insert("a", 1).unwrap();
    /// *tree.value_mut(handle).unwrap() += 10;
    /// assert_eq!(tree["a"], 11);
    /// ```
    pub fn value_mut(&mut self, handle: NodeHandle) -> Option<&mut V> {
        let handle = self.raw.resolve(handle)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns the key and value stored at `handle`.
    #[must_use]
    pub fn entry(&self, handle: NodeHandle) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.resolve(handle)?);
        Some((node.key(), node.value()))
    }

    /// Returns the handle of the root node, or `None` if the tree is empty.
    ///
    /// The root is the first node inserted, until it is deleted.
    #[must_use]
    pub fn root(&self) -> Option<NodeHandle> {
        self.raw.root().map(|root| self.raw.publish(root))
    }

    /// Returns the parent of `handle`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let handle = self.raw.resolve(handle)?;
        self.raw.node(handle).parent().map(|parent| self.raw.publish(parent))
    }

    /// Returns the left child of `handle`, holding a smaller key.
    #[must_use]
    pub fn left(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let handle = self.raw.resolve(handle)?;
        self.raw.node(handle).left().map(|left| self.raw.publish(left))
    }

    /// Returns the right child of `handle`, holding a key no smaller than its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.insert(5, ()).unwrap();
    /// let four = tree.insert(4, ()).unwrap();
    /// let six = tree.insert(6, ()).unwrap();
    ///
    /// assert_eq!(tree.root(), Some(root));
    /// assert_eq!(tree.left(root), Some(four));
    /// assert_eq!(tree.right(root), Some(six));
    /// assert_eq!(tree.parent(six), Some(root));
    /// assert_eq!(tree.parent(root), None);
    /// ```
    #[must_use]
    pub fn right(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let handle = self.raw.resolve(handle)?;
        self.raw.node(handle).right().map(|right| self.raw.publish(right))
    }

    /// Returns the node with the smallest key in the subtree rooted at `handle`.
    ///
    /// # Complexity
    ///
    /// O(h)
    #[must_use]
    pub fn subtree_minimum(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let handle = self.raw.resolve(handle)?;
        Some(self.raw.publish(self.raw.minimum(handle)))
    }

    /// Returns the node with the largest key in the subtree rooted at `handle`.
    ///
    /// # Complexity
    ///
    /// O(h)
    #[must_use]
    pub fn subtree_maximum(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let handle = self.raw.resolve(handle)?;
        Some(self.raw.publish(self.raw.maximum(handle)))
    }

    /// Returns the node that follows `handle` in key order, or `None` if `handle` is the
    /// maximum.
    ///
    /// Among equal keys, nodes follow each other in insertion order.
    ///
    /// # Complexity
    ///
    /// O(h) worst case; O(1) amortized over a full walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [5, 4, 2, 3, 1, 0, 6, 9, 7, 8] {
    ///     tree.insert(key, ()).unwrap();
    /// }
    ///
    /// let mut keys = Vec::new();
    /// let mut current = tree.minimum();
    /// while let Some(handle) = current {
    ///     keys.push(*tree.key(handle).unwrap());
    ///     current = tree.successor(handle);
    /// }
    /// assert_eq!(keys, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// ```
    #[must_use]
    pub fn successor(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let handle = self.raw.resolve(handle)?;
        self.raw.successor(handle).map(|next| self.raw.publish(next))
    }

    /// Returns the node that precedes `handle` in key order, or `None` if `handle` is the
    /// minimum.
    ///
    /// # Complexity
    ///
    /// O(h) worst case; O(1) amortized over a full walk.
    #[must_use]
    pub fn predecessor(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let handle = self.raw.resolve(handle)?;
        self.raw.predecessor(handle).map(|prev| self.raw.publish(prev))
    }

    /// Searches for `key` in the subtree rooted at `start` only.
    ///
    /// A node with the key elsewhere in the tree is not found.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(5, ()).unwrap();
    /// let four = tree.insert(4, ()).unwrap();
    /// let six = tree.insert(6, ()).unwrap();
    ///
    /// assert_eq!(tree.search_from(six, &6), Some(six));
    /// assert_eq!(tree.search_from(six, &4), None);
    /// assert_eq!(tree.search_from(four, &4), Some(four));
    /// ```
    pub fn search_from<Q>(&self, start: NodeHandle, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let start = self.raw.resolve(start)?;
        self.raw.search(start, key).map(|found| self.raw.publish(found))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn stale_handles_answer_none() {
        let mut tree = Tree::from([(2, 'b'), (1, 'a'), (3, 'c')]);
        let one = tree.search(&1).unwrap();
        let two = tree.search(&2).unwrap();
        assert_eq!(tree.delete(one), Some('a'));

        assert!(!tree.contains(one));
        assert_eq!(tree.key(one), None);
        assert_eq!(tree.value_mut(one), None);
        assert_eq!(tree.parent(one), None);
        assert_eq!(tree.successor(one), None);
        assert_eq!(tree.predecessor(one), None);
        assert_eq!(tree.subtree_minimum(one), None);
        assert_eq!(tree.search_from(one, &2), None);

        // A new node may reuse the slot, but not the handle.
        let zero = tree.insert(0, 'z').unwrap();
        assert_ne!(zero, one);
        assert_eq!(tree.entry(one), None);
        assert_eq!(tree.left(two), Some(zero));
    }

    #[test]
    fn subtree_extremes_stay_inside_subtree() {
        let tree: Tree<i32, ()> = [5, 4, 2, 3, 1, 0, 6, 9, 7, 8].into_iter().map(|k| (k, ())).collect();
        let nine = tree.search(&9).unwrap();
        let two = tree.search(&2).unwrap();
        assert_eq!(tree.key(tree.subtree_minimum(nine).unwrap()), Some(&7));
        assert_eq!(tree.key(tree.subtree_maximum(nine).unwrap()), Some(&9));
        assert_eq!(tree.key(tree.subtree_maximum(two).unwrap()), Some(&3));
        assert_eq!(tree.subtree_minimum(tree.root().unwrap()), tree.minimum());
    }
}
