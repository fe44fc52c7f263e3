use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use alloc::vec::Vec;

use crate::error::InsertError;
use crate::raw::{Handle, NodeHandle, RawTree};

mod capacity;
mod navigate;

/// An ordered map stored as an unbalanced [binary search tree] with parent links.
///
/// Keys must implement [`Ord`]. Unlike `BTreeMap`, a key may be stored more than once: an
/// equal key is inserted to the right of the existing ones, so equal keys iterate in the
/// order they were inserted and [`search`](Tree::search) finds the oldest of them.
///
/// Every node lives in a slot of an internal arena and is addressed by a [`NodeHandle`].
/// Handles are returned by [`insert`](Tree::insert) and by the lookup and traversal methods,
/// and are the way to step through the tree ([`successor`](Tree::successor),
/// [`predecessor`](Tree::predecessor)) or delete one particular node ([`delete`](Tree::delete)).
///
/// The tree never rebalances. Its height, and so the cost of every operation, depends on the
/// insertion order: O(log n) for random keys, O(n) for sorted keys. None of the operations
/// recurse, so even a list-shaped tree is safe to build, clone, walk and drop.
///
/// # Examples
///
/// ```
/// use linkwood::Tree;
///
/// let mut tree = Tree::new();
/// for key in [5, 6, 7, 8, 9, 4, 3, 2, 1, 0] {
///     tree.insert(key, key * 10).unwrap();
/// }
///
/// // Lookups return handles.
/// let five = tree.search(&5).unwrap();
/// assert_eq!(tree.value(five), Some(&50));
///
/// // Step through the tree in key order.
/// let six = tree.successor(five).unwrap();
/// assert_eq!(tree.key(six), Some(&6));
///
/// // Delete by handle or by key.
/// assert_eq!(tree.delete(six), Some(60));
/// assert_eq!(tree.remove(&0), Some(0));
/// assert_eq!(tree.remove(&0), None);
///
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, [1, 2, 3, 4, 5, 7, 8, 9]);
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
pub struct Tree<K, V> {
    raw: RawTree<K, V>,
}

/// An iterator over the entries of a `Tree`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`Tree`]. See its
/// documentation for more.
///
/// [`iter`]: Tree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the entries of a `Tree`, in key order.
///
/// Each step unlinks the current minimum (or maximum, from the back) and frees its node.
///
/// This `struct` is created by the [`into_iter`] method on [`Tree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    raw: RawTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
}

/// An iterator over the keys of a `Tree`.
///
/// This `struct` is created by the [`keys`] method on [`Tree`].
///
/// [`keys`]: Tree::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `Tree`.
///
/// This `struct` is created by the [`values`] method on [`Tree`].
///
/// [`values`]: Tree::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Tree<K, V> {
    /// Makes a new, empty `Tree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// // entries can now be inserted into the empty tree
    /// tree.insert(1, "a").unwrap();
    /// ```
    #[must_use]
    pub const fn new() -> Tree<K, V> {
        Tree { raw: RawTree::new() }
    }

    /// Removes every entry. Handles issued before the call become invalid.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let one = tree.insert(1, "a").unwrap();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(!tree.contains(one));
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of entries in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1, "a").unwrap();
    /// tree.insert(1, "b").unwrap();
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Inserts a key-value pair and returns the handle of the new node.
    ///
    /// An existing entry with an equal key is left alone; the new node goes to its right, so
    /// it comes after it in key order.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError`] if storage for the node cannot be obtained. The tree is not
    /// modified in that case.
    ///
    /// # Complexity
    ///
    /// O(h), where h is the height of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let first = tree.insert(37, "a").unwrap();
    /// let second = tree.insert(37, "b").unwrap();
    ///
    /// assert_eq!(tree.search(&37), Some(first));
    /// assert_eq!(tree.successor(first), Some(second));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<NodeHandle, InsertError>
    where
        K: Ord,
    {
        self.raw
            .insert(key, value)
            .inspect_err(|error| tracing::warn!(%error, len = self.raw.len(), "node allocation failed"))
    }

    /// Returns the handle of the node with the given key, or `None` if no node has it.
    ///
    /// With duplicate keys, the first one inserted is found.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let handle = tree.insert(1, "a").unwrap();
    /// assert_eq!(tree.search(&1), Some(handle));
    /// assert_eq!(tree.search(&2), None);
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|handle| self.raw.publish(handle))
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, "a").unwrap();
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|handle| self.raw.node(handle).value())
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let node = self.raw.node(self.raw.find(key)?);
        Some((node.key(), node.value()))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, "a").unwrap();
    /// if let Some(x) = tree.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(tree[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.find(key)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns `true` if the tree contains a node with the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }

    /// Returns the handle of the node with the smallest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.minimum(), None);
    /// tree.insert(2, "b").unwrap();
    /// let one = tree.insert(1, "a").unwrap();
    /// assert_eq!(tree.minimum(), Some(one));
    /// ```
    #[must_use]
    pub fn minimum(&self) -> Option<NodeHandle> {
        self.raw.first().map(|handle| self.raw.publish(handle))
    }

    /// Returns the handle of the node with the largest key, or `None` if the tree is empty.
    ///
    /// With duplicate largest keys, this is the most recently inserted one.
    #[must_use]
    pub fn maximum(&self) -> Option<NodeHandle> {
        self.raw.last().map(|handle| self.raw.publish(handle))
    }

    /// Returns the first key-value pair in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let tree = Tree::from([(2, "b"), (1, "a")]);
    /// assert_eq!(tree.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.first()?);
        Some((node.key(), node.value()))
    }

    /// Returns the last key-value pair in key order.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((node.key(), node.value()))
    }

    /// Removes and returns the first entry in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::from([(1, "a"), (2, "b")]);
    /// assert_eq!(tree.pop_first(), Some((1, "a")));
    /// assert_eq!(tree.pop_first(), Some((2, "b")));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.raw.first()?;
        Some(self.raw.delete(first))
    }

    /// Removes and returns the last entry in key order.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.raw.last()?;
        Some(self.raw.delete(last))
    }

    /// Deletes the node behind `handle` and returns its value.
    ///
    /// The handle, and every copy of it, is invalid afterwards. Returns `None` (and does
    /// nothing) if the handle is already invalid.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let handle = tree.insert(1, "a").unwrap();
    /// assert_eq!(tree.delete(handle), Some("a"));
    /// assert_eq!(tree.delete(handle), None);
    /// ```
    pub fn delete(&mut self, handle: NodeHandle) -> Option<V> {
        let handle = self.raw.resolve(handle)?;
        Some(self.raw.delete(handle).1)
    }

    /// Removes the node [`search`](Tree::search) would find for `key`, returning its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, "a").unwrap();
    /// assert_eq!(tree.remove(&1), Some("a"));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the node [`search`](Tree::search) would find for `key`, returning the stored
    /// key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.find(key)?;
        Some(self.raw.delete(handle))
    }

    /// Returns a snapshot of every entry, in key order.
    ///
    /// The result owns clones of the keys and values, so later changes to the tree do not
    /// affect it. Use [`iter`](Tree::iter) to walk the tree without copying.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut tree = Tree::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    /// let snapshot = tree.walk();
    /// tree.clear();
    /// assert_eq!(snapshot, [(1, 'a'), (2, 'b'), (3, 'c')]);
    /// ```
    #[must_use]
    pub fn walk(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }

    /// Moves the whole tree out, leaving `self` empty.
    ///
    /// Only the storage moves: handles issued by `self` address the same entries in the
    /// returned tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut source = Tree::new();
    /// let handle = source.insert(1, "a").unwrap();
    ///
    /// let moved = source.take();
    /// assert!(source.is_empty());
    /// assert_eq!(moved.value(handle), Some(&"a"));
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        tracing::debug!(len = self.len(), "moving tree storage");
        core::mem::take(self)
    }

    /// Moves every entry of `other` into `self`, leaving `other` empty.
    ///
    /// If `self` is empty, `other`'s storage is moved over and handles issued by `other` now
    /// address `self`. Otherwise each entry of `other` is re-inserted into `self` (parents
    /// before children) and `other`'s handles become invalid. Entries of `other` whose keys
    /// equal keys already in `self` come after them in key order.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError`] if `self` cannot make room for all of `other`'s entries. Nothing
    /// is moved in that case.
    ///
    /// # Complexity
    ///
    /// O(1) if `self` is empty, otherwise O(m·h) for m entries in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let mut a = Tree::from([(1, "a"), (3, "c")]);
    /// let mut b = Tree::from([(2, "b"), (4, "d")]);
    ///
    /// a.append(&mut b).unwrap();
    /// assert!(b.is_empty());
    /// assert_eq!(a.walk(), [(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
    /// ```
    pub fn append(&mut self, other: &mut Self) -> Result<(), InsertError>
    where
        K: Ord,
    {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            tracing::debug!(len = other.len(), "append: moving tree storage");
            core::mem::swap(&mut self.raw, &mut other.raw);
            return Ok(());
        }

        self.raw.try_reserve(other.len())?;
        tracing::debug!(len = other.len(), into = self.len(), "append: rebuilding entries");
        let raw = &mut self.raw;
        other.raw.drain_preorder(|key, value| {
            raw.insert(key, value).expect("`Tree::append()` - reserved storage ran out!");
        });
        Ok(())
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let tree = Tree::from([(3, "c"), (2, "b"), (1, "a")]);
    ///
    /// let (first_key, first_value) = tree.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let tree = Tree::from([(2, "b"), (1, "a")]);
    /// let values: Vec<&str> = tree.values().copied().collect();
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: Clone, V: Clone> Clone for Tree<K, V> {
    /// Copies the tree node for node. The clone has the same shape, and handles issued by
    /// `self` address the corresponding entries of the clone.
    fn clone(&self) -> Self {
        Tree { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Tree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for Tree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Tree::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    /// Inserts every pair; duplicate keys are kept.
    ///
    /// # Panics
    ///
    /// Panics if a node cannot be allocated. Use [`Tree::insert`] to handle that case.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if let Err(error) = self.insert(key, value) {
                panic!("`Tree::extend()` - {error}");
            }
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for Tree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the tree, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwood::Tree;
    ///
    /// let tree = Tree::from([(2, "b"), (1, "a")]);
    /// let mut iter = tree.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// assert_eq!(iter.next(), None);
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            front: self.raw.first(),
            back: self.raw.last(),
            raw: self.raw,
        }
    }
}

impl<K, Q, V> Index<&Q> for Tree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value of the node [`search`](Tree::search) finds.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the tree.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for Tree<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.front?;
        self.front = tree.successor(handle);
        self.remaining -= 1;

        let node = tree.node(handle);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.back?;
        self.back = tree.predecessor(handle);
        self.remaining -= 1;

        let node = tree.node(handle);
        Some((node.key(), node.value()))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.raw.is_empty() {
            return None;
        }
        // The minimum has no left child, so unlinking it never disturbs its successor.
        let handle = self.front?;
        self.front = self.raw.successor(handle);
        Some(self.raw.delete(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.raw.is_empty() {
            return None;
        }
        let handle = self.back?;
        self.back = self.raw.predecessor(handle);
        Some(self.raw.delete(handle))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.raw.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("len", &self.raw.len()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn iter_meets_in_the_middle() {
        let tree = Tree::from([(2, 'b'), (1, 'a'), (3, 'c')]);
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some((&1, &'a')));
        assert_eq!(iter.next_back(), Some((&3, &'c')));
        assert_eq!(iter.next_back(), Some((&2, &'b')));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn into_iter_from_both_ends_frees_every_node() {
        let tree: Tree<i32, i32> = [5, 4, 2, 3, 1, 0, 6, 9, 7, 8].into_iter().map(|k| (k, k)).collect();
        let mut iter = tree.into_iter();
        let mut front = Vec::new();
        let mut back = Vec::new();
        while let Some((k, _)) = iter.next() {
            front.push(k);
            if let Some((k, _)) = iter.next_back() {
                back.push(k);
            }
            iter.raw.validate_invariants();
        }
        assert_eq!(front, [0, 1, 2, 3, 4]);
        assert_eq!(back, [9, 8, 7, 6, 5]);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn append_into_non_empty_keeps_tree_valid() {
        let mut a: Tree<i32, ()> = [4, 2, 6].into_iter().map(|k| (k, ())).collect();
        let mut b: Tree<i32, ()> = [5, 4, 2, 3, 1, 0, 6, 9, 7, 8].into_iter().map(|k| (k, ())).collect();
        a.append(&mut b).unwrap();
        a.raw.validate_invariants();
        b.raw.validate_invariants();
        assert_eq!(a.len(), 13);
        assert_eq!(a.keys().copied().collect::<Vec<_>>(), [0, 1, 2, 2, 3, 4, 4, 5, 6, 6, 7, 8, 9]);
    }
}
