use super::Tree;
use crate::error::InsertError;
use crate::raw::RawTree;

impl<K, V> Tree<K, V> {
    /// Creates an empty tree with room for at least `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let tree: Tree<i32, i32> = Tree::with_capacity(32);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Returns how many nodes the tree can hold without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let tree: Tree<i32, i32> = Tree::with_capacity(32);
    /// assert_eq!(tree.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves room for at least `additional` more nodes.
    ///
    /// After a successful call, the next `additional` insertions cannot fail.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::CapacityExceeded`] if the tree could never hold that many nodes,
    /// or [`InsertError::OutOfMemory`] if the allocator refuses. The tree is unchanged either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree: Tree<i32, i32> = Tree::new();
    /// tree.try_reserve(10).unwrap();
    /// assert!(tree.capacity() >= 10);
    /// assert!(tree.try_reserve(usize::MAX).is_err());
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), InsertError> {
        self.raw.try_reserve(additional)
    }
}
