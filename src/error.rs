use alloc::collections::TryReserveError;

/// The error returned when [`Tree::insert`](crate::Tree::insert) cannot allocate a node.
///
/// A failed insertion leaves the tree exactly as it was; the rejected key and value are dropped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    /// Every node handle is in use.
    #[error("tree is at maximum capacity ({max} nodes)")]
    CapacityExceeded {
        /// The largest number of nodes a tree can hold.
        max: usize,
    },

    /// The allocator could not provide storage for another node.
    #[error("failed to reserve storage for a new node")]
    OutOfMemory(#[from] TryReserveError),
}
