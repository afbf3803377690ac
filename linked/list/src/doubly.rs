//! Doubly linked list.
//!
//! Every node links to both its neighbors.  The backward link is only a navigation aid; a node is
//! owned by the arena slot it lives in, never by its neighbors.  All adjacency changes go through
//! `link`, which rewires both directions at once.

use std::fmt::{self, Debug, Display};
use std::iter;

use snafu::prelude::*;

use crate::arena::Arena;
use crate::error::{EmptySnafu, Error, NotFoundSnafu};

#[derive(Clone)]
pub struct DoublyList {
    nodes: Arena<Node>,
    head: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
struct Node {
    value: i32,
    prev: Option<usize>,
    next: Option<usize>,
}

impl DoublyList {
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

impl Default for DoublyList {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TryFrom<[i32; N]> for DoublyList {
    type Error = Error;

    fn try_from(values: [i32; N]) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl TryFrom<&[i32]> for DoublyList {
    type Error = Error;

    fn try_from(values: &[i32]) -> Result<Self, Self::Error> {
        let mut list = Self::try_with_capacity(values.len())?;
        let mut tail = None;
        for &value in values {
            let new = list.nodes.alloc(Node::new(value))?;
            list.link(tail, Some(new));
            tail = Some(new);
        }
        list.debug_assert_invariants();
        Ok(list)
    }
}

impl Debug for DoublyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Display for DoublyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{value} <-> ")?;
        }
        f.write_str("NULL")
    }
}

impl PartialEq for DoublyList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for DoublyList {}

impl DoublyList {
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
        self.walk(self.head, |node| node.next)
            .map(move |this| self.nodes[this].value)
    }

    /// Iterates over the values from tail to head.
    ///
    /// NOTE: The list does not keep a tail link, so this first walks forward to the tail.
    pub fn iter_back(&self) -> impl Iterator<Item = i32> + '_ {
        self.walk(self.tail(), |node| node.prev)
            .map(move |this| self.nodes[this].value)
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
        let new = self.nodes.alloc(Node::new(value))?;
        self.link(Some(new), self.head);
        self.link(None, Some(new));
        tracing::debug!(value, "push front");
        self.debug_assert_invariants();
        Ok(())
    }

    pub fn push_back(&mut self, value: i32) -> Result<(), Error> {
        let tail = self.tail();
        let new = self.nodes.alloc(Node::new(value))?;
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
        let new = self.nodes.alloc(Node::new(value))?;
        self.link(Some(new), self.nodes[this].next);
        self.link(Some(this), Some(new));
        tracing::debug!(after, value, "insert after");
        self.debug_assert_invariants();
        Ok(())
    }

    pub fn pop_front(&mut self) -> Result<i32, Error> {
        let head = self.head.context(EmptySnafu)?;
        let value = self.unlink(head);
        tracing::debug!(value, "pop front");
        self.debug_assert_invariants();
        Ok(value)
    }

    pub fn pop_back(&mut self) -> Result<i32, Error> {
        let tail = self.tail().context(EmptySnafu)?;
        let value = self.unlink(tail);
        tracing::debug!(value, "pop back");
        self.debug_assert_invariants();
        Ok(value)
    }

    /// Removes the first node holding `value`.
    pub fn remove(&mut self, value: i32) -> Result<(), Error> {
        ensure!(!self.is_empty(), EmptySnafu);
        let Some(this) = self.find(value) else {
            tracing::debug!(value, "remove: not found");
            return NotFoundSnafu { value }.fail();
        };
        self.unlink(this);
        tracing::debug!(value, "remove");
        self.debug_assert_invariants();
        Ok(())
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

    fn walk<F>(&self, start: Option<usize>, step: F) -> impl Iterator<Item = usize> + '_
    where
        F: Fn(&Node) -> Option<usize> + 'static,
    {
        let mut cursor = start;
        iter::from_fn(move || {
            let this = cursor?;
            cursor = step(&self.nodes[this]);
            Some(this)
        })
    }

    fn find(&self, value: i32) -> Option<usize> {
        self.walk(self.head, |node| node.next)
            .find(|&this| self.nodes[this].value == value)
    }

    fn tail(&self) -> Option<usize> {
        self.walk(self.head, |node| node.next).last()
    }

    /// Makes `prev` and `next` adjacent, where `None` as `prev` denotes the head, and `None` as
    /// `next` denotes the end of the list.
    fn link(&mut self, prev: Option<usize>, next: Option<usize>) {
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        if let Some(next) = next {
            self.nodes[next].prev = prev;
        }
    }

    /// Detaches the node from its neighbors and releases it.
    fn unlink(&mut self, this: usize) -> i32 {
        let Node { prev, next, .. } = self.nodes[this];
        self.link(prev, next);
        self.nodes.release(this).value
    }

    fn debug_assert_invariants(&self) {
        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
    }

    fn assert_invariants(&self) {
        assert_eq!(self.head.is_none(), self.nodes.is_empty());
        if let Some(head) = self.head {
            assert_eq!(self.nodes[head].prev, None);
        }

        let mut n = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(this) = cursor {
            assert!(n < self.nodes.len(), "cycle or leaked node");
            assert_eq!(self.nodes[this].prev, prev);
            prev = cursor;
            cursor = self.nodes[this].next;
            n += 1;
        }
        assert_eq!(n, self.nodes.len());
    }
}

impl Node {
    fn new(value: i32) -> Self {
        Self {
            value,
            prev: None,
            next: None,
        }
    }
}
