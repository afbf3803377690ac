//! Node storage addressed by stable slot indexes.
//!
//! Each list owns exactly one `Arena`, and every node of the list lives in one of its slots.  Links
//! between nodes are slot indexes, not references, so neither a back link nor a closed cycle ever
//! creates a second owner of a node.
//!
//! Released slots are threaded onto a free chain and reused by later allocations; the indexes of
//! live nodes do not shift.

use std::mem;
use std::ops::{Index, IndexMut};

use snafu::prelude::*;

use crate::error::{AllocationSnafu, Error};

#[derive(Clone, Debug)]
pub(crate) struct Arena<N> {
    slots: Vec<Slot<N>>,
    len: usize,
    free: Option<usize>,

    // Makes every allocation that needs a new slot fail.
    #[cfg(test)]
    exhausted: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum Slot<N> {
    Used(N),
    // Points to the next free slot.
    Free(Option<usize>),
}

impl<N> Arena<N> {
    pub(crate) fn new() -> Self {
        Self::from_slots(Vec::new())
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::from_slots(Vec::with_capacity(capacity))
    }

    /// Same as `with_capacity`, except that it returns an error rather than panics or aborts when
    /// the slots cannot be reserved.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity).context(AllocationSnafu)?;
        Ok(Self::from_slots(slots))
    }

    fn from_slots(slots: Vec<Slot<N>>) -> Self {
        Self {
            slots,
            len: 0,
            free: None,
            #[cfg(test)]
            exhausted: false,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_used(&self, i: usize) -> bool {
        matches!(self.slots.get(i), Some(Slot::Used(_)))
    }

    /// Stores `node` and returns its slot index.
    ///
    /// The arena is left unchanged when it cannot reserve memory for the node.
    pub(crate) fn alloc(&mut self, node: N) -> Result<usize, Error> {
        let i = match self.free {
            Some(free) => {
                self.free = self.slots[free].next_free();
                self.slots[free] = Slot::Used(node);
                free
            }
            None => {
                self.reserve()?;
                self.slots.push(Slot::Used(node));
                self.slots.len() - 1
            }
        };
        self.len += 1;
        Ok(i)
    }

    /// Removes the node at `i` and returns it.
    ///
    /// Releasing the last live node resets the arena (keeping its capacity).
    pub(crate) fn release(&mut self, i: usize) -> N {
        assert!(self.is_used(i), "release free slot: {i}");
        let Slot::Used(node) = mem::replace(&mut self.slots[i], Slot::Free(self.free)) else {
            std::unreachable!()
        };
        self.free = Some(i);
        self.len -= 1;
        if self.len == 0 {
            self.clear();
        }
        node
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
        self.free = None;
    }

    fn reserve(&mut self) -> Result<(), Error> {
        #[cfg(test)]
        if self.exhausted {
            // No `Vec` can hold `usize::MAX` slots, which produces a genuine `TryReserveError`.
            Vec::<Slot<N>>::new()
                .try_reserve(usize::MAX)
                .context(AllocationSnafu)?;
        }
        self.slots.try_reserve(1).context(AllocationSnafu)
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<usize> for Arena<N> {
    type Output = N;

    fn index(&self, i: usize) -> &Self::Output {
        match &self.slots[i] {
            Slot::Used(node) => node,
            Slot::Free(_) => std::panic!("access free slot: {i}"),
        }
    }
}

impl<N> IndexMut<usize> for Arena<N> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        match &mut self.slots[i] {
            Slot::Used(node) => node,
            Slot::Free(_) => std::panic!("access free slot: {i}"),
        }
    }
}

impl<N> Slot<N> {
    fn next_free(&self) -> Option<usize> {
        match self {
            Self::Used(_) => std::unreachable!(),
            Self::Free(next) => *next,
        }
    }
}
