//! Circular singly linked list.
//!
//! The last node links back to the head, so no link is ever empty while the list is not.  Every
//! walk stops when it returns to the head, and checks that condition after advancing (the cursor
//! equals the head both before the first step and after a full revolution).
//!
//! The list holds only the head.  Finding the last node, which most mutations need for rewiring
//! the closure, takes a full revolution.

use std::fmt::{self, Debug, Display};
use std::iter;

use snafu::prelude::*;

use crate::arena::Arena;
use crate::error::{EmptySnafu, Error, NotFoundSnafu};

#[derive(Clone)]
pub struct CircularList {
    nodes: Arena<Node>,
    head: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
struct Node {
    value: i32,
    next: usize,
}

impl CircularList {
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

impl Default for CircularList {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TryFrom<[i32; N]> for CircularList {
    type Error = Error;

    fn try_from(values: [i32; N]) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl TryFrom<&[i32]> for CircularList {
    type Error = Error;

    fn try_from(values: &[i32]) -> Result<Self, Self::Error> {
        let mut list = Self::try_with_capacity(values.len())?;
        let mut last = None;
        for &value in values {
            let new = list.nodes.alloc(Node::new(value))?;
            match last {
                Some(last) => list.insert_next(last, new),
                None => {
                    list.link(new, new);
                    list.head = Some(new);
                }
            }
            last = Some(new);
        }
        list.debug_assert_invariants();
        Ok(list)
    }
}

impl Debug for CircularList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Display for CircularList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }
        for value in self.iter() {
            write!(f, "{value} -> ")?;
        }
        f.write_str("(head)")
    }
}

impl PartialEq for CircularList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for CircularList {}

impl CircularList {
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over the values for exactly one revolution, starting from the head.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.cursors().map(move |this| self.nodes[this].value)
    }

    /// Follows the links endlessly, starting from the head.
    ///
    /// The iterator is empty when the list is empty, and infinite otherwise.
    pub fn cycle(&self) -> impl Iterator<Item = i32> + '_ {
        let mut cursor = self.head;
        iter::from_fn(move || {
            let this = cursor?;
            cursor = Some(self.nodes[this].next);
            Some(self.nodes[this].value)
        })
    }

    pub fn front(&self) -> Option<i32> {
        self.head.map(|head| self.nodes[head].value)
    }

    pub fn back(&self) -> Option<i32> {
        self.last().map(|last| self.nodes[last].value)
    }

    pub fn contains(&self, value: i32) -> bool {
        self.iter().any(|v| v == value)
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
        let last = self.last();
        let new = self.nodes.alloc(Node::new(value))?;
        match last {
            Some(last) => self.insert_next(last, new),
            None => self.link(new, new),
        }
        self.head = Some(new);
        tracing::debug!(value, "push front");
        self.debug_assert_invariants();
        Ok(())
    }

    pub fn push_back(&mut self, value: i32) -> Result<(), Error> {
        let last = self.last();
        let new = self.nodes.alloc(Node::new(value))?;
        match last {
            Some(last) => self.insert_next(last, new),
            None => {
                self.link(new, new);
                self.head = Some(new);
            }
        }
        tracing::debug!(value, was_empty = last.is_none(), "push back");
        self.debug_assert_invariants();
        Ok(())
    }

    /// Inserts `value` right after the first node holding `after`.
    pub fn insert_after(&mut self, after: i32, value: i32) -> Result<(), Error> {
        let Some(this) = self.cursors().find(|&this| self.nodes[this].value == after) else {
            tracing::debug!(after, value, "insert after: not found");
            return NotFoundSnafu { value: after }.fail();
        };
        let new = self.nodes.alloc(Node::new(value))?;
        self.insert_next(this, new);
        tracing::debug!(after, value, "insert after");
        self.debug_assert_invariants();
        Ok(())
    }

    pub fn pop_front(&mut self) -> Result<i32, Error> {
        let head = self.head.context(EmptySnafu)?;
        let value = self.unlink(self.prev(head), head);
        tracing::debug!(value, "pop front");
        self.debug_assert_invariants();
        Ok(value)
    }

    pub fn pop_back(&mut self) -> Result<i32, Error> {
        let head = self.head.context(EmptySnafu)?;
        let last = self.prev(head);
        let value = self.unlink(self.prev(last), last);
        tracing::debug!(value, "pop back");
        self.debug_assert_invariants();
        Ok(value)
    }

    /// Removes the first node holding `value`.
    pub fn remove(&mut self, value: i32) -> Result<(), Error> {
        let head = self.head.context(EmptySnafu)?;

        // Start from the last node so that removing the head can rewire the closure.
        let mut prev = self.prev(head);
        let mut this = head;
        while self.nodes[this].value != value {
            prev = this;
            this = self.nodes[this].next;
            if this == head {
                tracing::debug!(value, "remove: not found");
                return NotFoundSnafu { value }.fail();
            }
        }

        self.unlink(prev, this);
        tracing::debug!(value, "remove");
        self.debug_assert_invariants();
        Ok(())
    }

    /// Releases every node and returns the number of released nodes.
    pub fn clear(&mut self) -> usize {
        let mut n = 0;
        // The head is the stop marker; it is captured before any node is released.
        if let Some(head) = self.head.take() {
            let mut this = head;
            loop {
                this = self.nodes.release(this).next;
                n += 1;
                if this == head {
                    break;
                }
            }
        }
        assert!(self.nodes.is_empty());
        tracing::debug!(n, "clear");
        n
    }

    //
    // Helpers
    //

    fn cursors(&self) -> impl Iterator<Item = usize> + '_ {
        let head = self.head;
        let mut cursor = self.head;
        iter::from_fn(move || {
            let this = cursor?;
            let next = self.nodes[this].next;
            cursor = (Some(next) != head).then_some(next);
            Some(this)
        })
    }

    fn last(&self) -> Option<usize> {
        self.head.map(|head| self.prev(head))
    }

    /// Walks the ring to find the node linking to `this`.
    fn prev(&self, this: usize) -> usize {
        let mut prev = this;
        while self.nodes[prev].next != this {
            prev = self.nodes[prev].next;
        }
        prev
    }

    fn link(&mut self, this: usize, next: usize) {
        self.nodes[this].next = next;
    }

    fn insert_next(&mut self, this: usize, new: usize) {
        self.link(new, self.nodes[this].next);
        self.link(this, new);
    }

    /// Detaches `this`, whose predecessor is `prev`, and releases it.
    fn unlink(&mut self, prev: usize, this: usize) -> i32 {
        if prev == this {
            // `this` is the sole node.
            self.head = None;
        } else {
            let next = self.nodes[this].next;
            self.link(prev, next);
            if self.head == Some(this) {
                self.head = Some(next);
            }
        }
        self.nodes.release(this).value
    }

    fn debug_assert_invariants(&self) {
        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
    }

    fn assert_invariants(&self) {
        assert_eq!(self.head.is_none(), self.nodes.is_empty());
        let Some(head) = self.head else {
            return;
        };
        // A walk that first returns to the head after exactly `len` steps visits `len` distinct
        // nodes, which are then all the nodes in the arena.
        let mut this = head;
        for _ in 1..self.nodes.len() {
            this = self.nodes[this].next;
            assert_ne!(this, head, "ring shorter than len");
        }
        assert_eq!(self.nodes[this].next, head, "ring not closed");
    }
}

impl Node {
    fn new(value: i32) -> Self {
        Self {
            value,
            // Set when the node is linked into the ring.
            next: usize::MAX,
        }
    }
}

#[cfg(test)]
mod test_harness {
    use super::*;

    impl CircularList {
        pub fn assert_list(&self, expect: &[i32]) {
            self.assert_invariants();
            assert_eq!(self.is_empty(), expect.is_empty());
            assert_eq!(self.len(), expect.len());
            assert_eq!(self.iter().collect::<Vec<_>>(), expect);

            assert_eq!(self.front(), expect.first().copied());
            assert_eq!(self.back(), expect.last().copied());

            // After one revolution, the walk continues from the head again.
            let n = expect.len();
            assert!(self.cycle().take(n * 2).eq(expect.iter().chain(expect).copied()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: i32, next: usize) -> Node {
        Node { value, next }
    }

    #[test]
    fn new() {
        let list1 = CircularList::new();
        list1.assert_list(&[]);
        assert_eq!(list1.capacity(), 0);

        let list2 = CircularList::with_capacity(4);
        list2.assert_list(&[]);
        assert_eq!(list2.capacity(), 4);

        assert_eq!(list1, list2);

        CircularList::default().assert_list(&[]);

        CircularList::try_from([100]).unwrap().assert_list(&[100]);
        CircularList::try_from([100, 101])
            .unwrap()
            .assert_list(&[100, 101]);
        CircularList::try_from([100, 101, 102])
            .unwrap()
            .assert_list(&[100, 101, 102]);
    }

    #[test]
    fn format() {
        let list = CircularList::try_from([5, 10, 20, 30]).unwrap();
        assert_eq!(list.to_string(), "5 -> 10 -> 20 -> 30 -> (head)");
        assert_eq!(format!("{list:?}"), "[5, 10, 20, 30]");

        assert_eq!(CircularList::new().to_string(), "(empty)");
    }

    #[test]
    fn cycle() {
        assert_eq!(CircularList::new().cycle().next(), None);

        let list = CircularList::try_from([100]).unwrap();
        assert_eq!(list.cycle().take(3).collect::<Vec<_>>(), [100, 100, 100]);

        let list = CircularList::try_from([100, 101, 102]).unwrap();
        assert_eq!(
            list.cycle().take(7).collect::<Vec<_>>(),
            [100, 101, 102, 100, 101, 102, 100],
        );
    }

    #[test]
    fn try_with_capacity() {
        let list = CircularList::try_with_capacity(4).unwrap();
        list.assert_list(&[]);
        assert!(list.capacity() >= 4);

        assert!(matches!(
            CircularList::try_with_capacity(usize::MAX),
            Err(Error::Allocation { .. }),
        ));
    }

    #[test]
    fn alloc_exhausted() {
        let mut list = CircularList::new();
        list.nodes.set_exhausted(true);
        assert!(matches!(list.push_front(1), Err(Error::Allocation { .. })));
        list.assert_list(&[]);
        assert!(matches!(list.push_back(1), Err(Error::Allocation { .. })));
        list.assert_list(&[]);

        let mut list = CircularList::try_from([100, 101]).unwrap();
        list.nodes.set_exhausted(true);
        assert!(matches!(list.push_front(1), Err(Error::Allocation { .. })));
        list.assert_list(&[100, 101]);
        assert!(matches!(list.push_back(1), Err(Error::Allocation { .. })));
        list.assert_list(&[100, 101]);
        assert!(matches!(
            list.insert_after(100, 1),
            Err(Error::Allocation { .. }),
        ));
        list.assert_list(&[100, 101]);
        // The target is looked up before the node is allocated.
        assert_eq!(list.insert_after(99, 1), Err(Error::NotFound { value: 99 }));
        list.assert_list(&[100, 101]);

        // A released slot is reused without reserving memory.
        assert_eq!(list.remove(100), Ok(()));
        assert_eq!(list.push_back(102), Ok(()));
        list.assert_list(&[101, 102]);
        assert!(matches!(list.push_front(1), Err(Error::Allocation { .. })));
        list.assert_list(&[101, 102]);

        list.nodes.set_exhausted(false);
        assert_eq!(list.push_front(100), Ok(()));
        list.assert_list(&[100, 101, 102]);
    }

    #[test]
    fn push_front() {
        let mut list = CircularList::new();
        assert_eq!(list.push_front(100), Ok(()));
        list.assert_list(&[100]);
        list.nodes.assert_slots(&[Some(&n(100, 0))]);

        assert_eq!(list.push_front(101), Ok(()));
        list.assert_list(&[101, 100]);
        assert_eq!(list.push_front(102), Ok(()));
        list.assert_list(&[102, 101, 100]);
        list.nodes
            .assert_slots(&[Some(&n(100, 2)), Some(&n(101, 0)), Some(&n(102, 1))]);
    }

    #[test]
    fn push_back() {
        let mut list = CircularList::new();
        assert_eq!(list.push_back(100), Ok(()));
        list.assert_list(&[100]);
        assert_eq!(list.push_back(101), Ok(()));
        list.assert_list(&[100, 101]);
        assert_eq!(list.push_back(102), Ok(()));
        list.assert_list(&[100, 101, 102]);
        list.nodes
            .assert_slots(&[Some(&n(100, 1)), Some(&n(101, 2)), Some(&n(102, 0))]);
    }

    #[test]
    fn insert_after() {
        let mut list = CircularList::new();
        assert_eq!(
            list.insert_after(100, 1),
            Err(Error::NotFound { value: 100 }),
        );
        list.assert_list(&[]);

        let mut list = CircularList::try_from([100]).unwrap();
        assert_eq!(list.insert_after(100, 1), Ok(()));
        list.assert_list(&[100, 1]);

        let mut list = CircularList::try_from([100, 101, 100]).unwrap();
        assert_eq!(list.insert_after(100, 1), Ok(()));
        list.assert_list(&[100, 1, 101, 100]);
        assert_eq!(list.insert_after(101, 2), Ok(()));
        list.assert_list(&[100, 1, 101, 2, 100]);
        assert_eq!(
            list.insert_after(999, 3),
            Err(Error::NotFound { value: 999 }),
        );
        list.assert_list(&[100, 1, 101, 2, 100]);
    }

    #[test]
    fn pop_front() {
        let mut list = CircularList::new();
        assert_eq!(list.pop_front(), Err(Error::Empty));

        let mut list = CircularList::try_from([100, 101, 102]).unwrap();
        assert_eq!(list.pop_front(), Ok(100));
        list.assert_list(&[101, 102]);
        assert_eq!(list.pop_front(), Ok(101));
        list.assert_list(&[102]);
        assert_eq!(list.pop_front(), Ok(102));
        list.assert_list(&[]);
        assert_eq!(list.pop_front(), Err(Error::Empty));
    }

    #[test]
    fn pop_back() {
        let mut list = CircularList::new();
        assert_eq!(list.pop_back(), Err(Error::Empty));

        let mut list = CircularList::try_from([100, 101, 102]).unwrap();
        assert_eq!(list.pop_back(), Ok(102));
        list.assert_list(&[100, 101]);
        assert_eq!(list.pop_back(), Ok(101));
        list.assert_list(&[100]);
        assert_eq!(list.pop_back(), Ok(100));
        list.assert_list(&[]);
        assert_eq!(list.pop_back(), Err(Error::Empty));
    }

    #[test]
    fn remove() {
        let mut list = CircularList::new();
        assert_eq!(list.remove(100), Err(Error::Empty));

        // Sole node.
        let mut list = CircularList::try_from([100]).unwrap();
        assert_eq!(list.remove(101), Err(Error::NotFound { value: 101 }));
        list.assert_list(&[100]);
        assert_eq!(list.remove(100), Ok(()));
        list.assert_list(&[]);

        let mut list = CircularList::try_from([100, 101, 102, 101, 103]).unwrap();
        assert_eq!(list.remove(999), Err(Error::NotFound { value: 999 }));
        list.assert_list(&[100, 101, 102, 101, 103]);
        // Head.
        assert_eq!(list.remove(100), Ok(()));
        list.assert_list(&[101, 102, 101, 103]);
        // Head again, and not the second match.
        assert_eq!(list.remove(101), Ok(()));
        list.assert_list(&[102, 101, 103]);
        // Last.
        assert_eq!(list.remove(103), Ok(()));
        list.assert_list(&[102, 101]);
        // Interior, which is also the last.
        assert_eq!(list.remove(101), Ok(()));
        list.assert_list(&[102]);
    }

    #[test]
    fn search() {
        assert_eq!(
            CircularList::new().search(100),
            Err(Error::NotFound { value: 100 }),
        );

        let list = CircularList::try_from([100, 101, 100]).unwrap();
        assert_eq!(list.search(100), Ok(1));
        assert_eq!(list.search(101), Ok(2));
        assert_eq!(list.search(102), Err(Error::NotFound { value: 102 }));
        assert_eq!(list.contains(101), true);
        assert_eq!(list.contains(102), false);
    }

    #[test]
    fn clear() {
        let mut list = CircularList::try_from([100, 101, 102]).unwrap();
        list.pop_front().unwrap();
        assert_eq!(list.clear(), 2);
        list.assert_list(&[]);

        assert_eq!(list.clear(), 0);
        list.assert_list(&[]);

        let mut list = CircularList::try_from([100]).unwrap();
        assert_eq!(list.clear(), 1);
        list.assert_list(&[]);
    }

    #[test]
    fn reuse_slot() {
        let mut list = CircularList::try_from([100, 101, 102]).unwrap();
        list.remove(101).unwrap();
        list.nodes.assert_slots(&[Some(&n(100, 2)), None, Some(&n(102, 0))]);

        list.push_back(103).unwrap();
        list.nodes
            .assert_slots(&[Some(&n(100, 2)), Some(&n(103, 0)), Some(&n(102, 1))]);
        list.assert_list(&[100, 102, 103]);
    }

    #[test]
    fn scenario() {
        let mut list = CircularList::new();
        list.push_front(10).unwrap();
        list.push_front(5).unwrap();
        list.push_back(20).unwrap();
        list.push_back(30).unwrap();
        list.assert_list(&[5, 10, 20, 30]);
        assert_eq!(
            list.cycle().take(5).collect::<Vec<_>>(),
            [5, 10, 20, 30, 5],
        );

        assert_eq!(list.pop_back(), Ok(30));
        list.assert_list(&[5, 10, 20]);
        assert_eq!(list.remove(100), Err(Error::NotFound { value: 100 }));
        list.assert_list(&[5, 10, 20]);

        assert_eq!(list.pop_front(), Ok(5));
        list.assert_list(&[10, 20]);
        assert_eq!(list.remove(20), Ok(()));
        list.assert_list(&[10]);
        assert_eq!(list.search(10), Ok(1));
        assert_eq!(list.search(100), Err(Error::NotFound { value: 100 }));

        assert_eq!(list.clear(), 1);
    }
}
