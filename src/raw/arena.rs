use alloc::vec::Vec;

use super::handle::{Handle, NodeHandle};
use crate::error::InsertError;

#[derive(Clone)]
struct Slot<T> {
    // Bumped every time the slot is vacated. A slot that reaches `u32::MAX` is retired.
    generation: u32,
    element: Option<T>,
}

pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
    len: usize,
}

impl<T: Clone> Clone for Arena<T> {
    fn clone(&self) -> Self {
        // Same free-list headroom as the original, so `take()` on the clone never allocates.
        let mut free = Vec::with_capacity(self.slots.len());
        free.extend_from_slice(&self.free);
        Self {
            slots: self.slots.clone(),
            free,
            len: self.len,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `element` in a vacant slot, growing the slot vector if none is free.
    ///
    /// Storage is reserved before anything is written, so on error the arena is unchanged
    /// and `element` is dropped.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<NodeHandle, InsertError> {
        if let Some(h) = self.free.pop() {
            let slot = &mut self.slots[h.to_index()];
            debug_assert!(slot.element.is_none(), "`Arena::try_alloc()` - free slot is occupied!");
            slot.element = Some(element);
            self.len += 1;
            return Ok(NodeHandle::new(h, slot.generation));
        }

        self.try_reserve(1)?;
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        self.len += 1;
        Ok(NodeHandle::new(Handle::from_index(self.slots.len() - 1), 0))
    }

    /// Makes sure `additional` more elements can be stored without allocating.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), InsertError> {
        // Free slots are reused first; only the rest need new slots.
        let grow = additional.saturating_sub(self.free.len());
        let required = self
            .slots
            .len()
            .checked_add(grow)
            .filter(|&required| required <= Handle::MAX)
            .ok_or(InsertError::CapacityExceeded { max: Handle::MAX })?;
        self.slots.try_reserve(grow)?;
        // Keep room for every slot on the free list so `take()` never allocates.
        self.free.try_reserve(required.saturating_sub(self.free.len()))?;
        Ok(())
    }

    /// Maps a public handle to its slot if the slot is occupied by the same generation.
    #[inline]
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Option<Handle> {
        let slot = self.slots.get(handle.slot().to_index())?;
        (slot.generation == handle.generation() && slot.element.is_some()).then_some(handle.slot())
    }

    /// Builds the public handle for an occupied slot.
    #[inline]
    pub(crate) fn publish(&self, handle: Handle) -> NodeHandle {
        NodeHandle::new(handle, self.slots[handle.to_index()].generation)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation += 1;
        if slot.generation < u32::MAX {
            self.free.push(handle);
        }
        self.len -= 1;
        element
    }

    /// Drops every element. All previously issued handles become stale; the slots are kept.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        // Reverse order so the lowest slots are handed out first again.
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.element.take().is_some() {
                slot.generation += 1;
            }
            if slot.generation < u32::MAX {
                self.free.push(Handle::from_index(index));
            }
        }
        self.len = 0;
    }
}
