use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of an arena slot. Used for the links between nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((index + 1) as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// An opaque reference to one node of a [`Tree`](crate::Tree).
///
/// Handles are returned by [`Tree::insert`](crate::Tree::insert), [`Tree::search`](crate::Tree::search)
/// and the traversal methods. A handle stays valid until its node is deleted, the tree is cleared,
/// or the tree's contents are moved elsewhere. Every slot carries a generation counter, so a stale
/// handle is detected and treated as "not found" even after its slot has been reused.
///
/// # Examples
///
/// ```
/// use linkwood::Tree;
///
/// let mut tree = Tree::new();
/// let one = tree.insert(1, "one").unwrap();
/// let two = tree.insert(2, "two").unwrap();
///
/// assert_eq!(tree.successor(one), Some(two));
/// assert_eq!(tree.delete(one), Some("one"));
/// assert!(!tree.contains(one));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle {
    slot: Handle,
    generation: u32,
}

impl NodeHandle {
    #[inline]
    pub(crate) const fn new(slot: Handle, generation: u32) -> Self {
        Self { slot, generation }
    }

    #[inline]
    pub(crate) const fn slot(self) -> Handle {
        self.slot
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}
