//! Singly linked list.
//!
//! Each node links only to its successor, and the list holds only the head.  Appending, therefore,
//! has to walk the entire list to find the tail.

use std::fmt::{self, Debug, Display};
use std::iter;

use snafu::prelude::*;

use crate::arena::Arena;
use crate::error::{EmptySnafu, Error, NotFoundSnafu};

#[derive(Clone)]
pub struct SinglyList {
    nodes: Arena<Node>,
    head: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
struct Node {
    value: i32,
    next: Option<usize>,
}

impl SinglyList {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            head: None,
        }
    }

    /// Same as `with_capacity`, except that it returns [`Error::Allocation`] rather than panics
    /// or aborts when the node slots cannot be reserved.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(Self {
            nodes: Arena::try_with_capacity(capacity)?,
            head: None,
        })
    }
}

impl Default for SinglyList {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TryFrom<[i32; N]> for SinglyList {
    type Error = Error;

    fn try_from(values: [i32; N]) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl TryFrom<&[i32]> for SinglyList {
    type Error = Error;

    fn try_from(values: &[i32]) -> Result<Self, Self::Error> {
        let mut list = Self::try_with_capacity(values.len())?;
        // Keep a tail cursor so that building the list is not quadratic.
        let mut tail = None;
        for &value in values {
            let new = list.nodes.alloc(Node { value, next: None })?;
            list.link(tail, Some(new));
            tail = Some(new);
        }
        list.debug_assert_invariants();
        Ok(list)
    }
}

impl Debug for SinglyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Display for SinglyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{value} -> ")?;
        }
        f.write_str("NULL")
    }
}

impl PartialEq for SinglyList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for SinglyList {}

impl SinglyList {
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over the values from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.cursors().map(move |this| self.nodes[this].value)
    }

    pub fn front(&self) -> Option<i32> {
        self.head.map(|head| self.nodes[head].value)
    }

    pub fn back(&self) -> Option<i32> {
        self.tail().map(|tail| self.nodes[tail].value)
    }

    pub fn contains(&self, value: i32) -> bool {
        self.find(value).is_some()
    }

    /// Returns the 1-based position of the first node holding `value`.
    pub fn search(&self, value: i32) -> Result<usize, Error> {
        match self.iter().position(|v| v == value) {
            Some(i) => {
                tracing::debug!(value, position = i + 1, "search: found");
                Ok(i + 1)
            }
            None => {
                tracing::debug!(value, "search: not found");
                NotFoundSnafu { value }.fail()
            }
        }
    }

    pub fn push_front(&mut self, value: i32) -> Result<(), Error> {
        let new = self.nodes.alloc(Node {
            value,
            next: self.head,
        })?;
        self.link(None, Some(new));
        tracing::debug!(value, "push front");
        self.debug_assert_invariants();
        Ok(())
    }

    pub fn push_back(&mut self, value: i32) -> Result<(), Error> {
        let tail = self.tail();
        let new = self.nodes.alloc(Node { value, next: None })?;
        self.link(tail, Some(new));
        tracing::debug!(value, was_empty = tail.is_none(), "push back");
        self.debug_assert_invariants();
        Ok(())
    }

    /// Inserts `value` right after the first node holding `after`.
    pub fn insert_after(&mut self, after: i32, value: i32) -> Result<(), Error> {
        let Some(this) = self.find(after) else {
            tracing::debug!(after, value, "insert after: not found");
            return NotFoundSnafu { value: after }.fail();
        };
        let new = self.nodes.alloc(Node {
            value,
            next: self.nodes[this].next,
        })?;
        self.link(Some(this), Some(new));
        tracing::debug!(after, value, "insert after");
        self.debug_assert_invariants();
        Ok(())
    }

    /// Removes the first node holding `value`.
    pub fn remove(&mut self, value: i32) -> Result<(), Error> {
        let head = self.head.context(EmptySnafu)?;

        if self.nodes[head].value == value {
            self.link(None, self.nodes[head].next);
            self.nodes.release(head);
            tracing::debug!(value, "remove: head");
            self.debug_assert_invariants();
            return Ok(());
        }

        let mut prev = head;
        loop {
            let Some(this) = self.nodes[prev].next else {
                tracing::debug!(value, "remove: not found");
                return NotFoundSnafu { value }.fail();
            };
            if self.nodes[this].value == value {
                self.link(Some(prev), self.nodes[this].next);
                self.nodes.release(this);
                tracing::debug!(value, "remove");
                self.debug_assert_invariants();
                return Ok(());
            }
            prev = this;
        }
    }

    /// Releases every node and returns the number of released nodes.
    pub fn clear(&mut self) -> usize {
        let mut n = 0;
        while let Some(head) = self.head {
            self.head = self.nodes.release(head).next;
            n += 1;
        }
        assert!(self.nodes.is_empty());
        tracing::debug!(n, "clear");
        n
    }

    //
    // Helpers
    //

    fn cursors(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = self.head;
        iter::from_fn(move || {
            let this = cursor?;
            cursor = self.nodes[this].next;
            Some(this)
        })
    }

    fn find(&self, value: i32) -> Option<usize> {
        self.cursors().find(|&this| self.nodes[this].value == value)
    }

    fn tail(&self) -> Option<usize> {
        self.cursors().last()
    }

    /// Makes `next` the successor of `prev`, where `None` as `prev` denotes the head.
    fn link(&mut self, prev: Option<usize>, next: Option<usize>) {
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
    }

    fn debug_assert_invariants(&self) {
        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
    }

    fn assert_invariants(&self) {
        assert_eq!(self.head.is_none(), self.nodes.is_empty());
        // Bound the walk so that a cycle fails the assertion instead of hanging.
        let mut n = 0;
        let mut cursor = self.head;
        while let Some(this) = cursor {
            assert!(n < self.nodes.len(), "cycle or leaked node");
            cursor = self.nodes[this].next;
            n += 1;
        }
        assert_eq!(n, self.nodes.len());
    }
}
