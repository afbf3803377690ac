use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

use linked_list::{CircularList, DoublyList, Error, SinglyList};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum Topology {
    Singly,
    Doubly,
    Circular,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Operation {
    PushFront(i32),
    PushBack(i32),
    InsertAfter(i32, i32),
    PopFront,
    PopBack,
    Remove(i32),
    Search(i32),
    Display,
    DisplayBack,
    Clear,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    PushFront(i32),
    PushBack { value: i32, was_empty: bool },
    InsertAfter(i32, i32),
    PopFront(i32, Removed),
    PopBack(i32, Removed),
    Remove(i32, Removed),
    Search(i32, usize),
    Display(String),
    Clear(usize),
    Unsupported(Topology, Operation),
}

/// Which node a deletion removed, as far as the outcome message distinguishes it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Removed {
    Node,
    Head,
    Only,
}

#[derive(Clone, Debug)]
pub(crate) enum AnyList {
    Singly(SinglyList),
    Doubly(DoublyList),
    Circular(CircularList),
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Singly => "singly linked list",
            Self::Doubly => "doubly linked list",
            Self::Circular => "circular linked list",
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushFront(value) => write!(f, "push_front {value}"),
            Self::PushBack(value) => write!(f, "push_back {value}"),
            Self::InsertAfter(after, value) => write!(f, "insert_after {after} {value}"),
            Self::PopFront => f.write_str("pop_front"),
            Self::PopBack => f.write_str("pop_back"),
            Self::Remove(value) => write!(f, "remove {value}"),
            Self::Search(value) => write!(f, "search {value}"),
            Self::Display => f.write_str("display"),
            Self::DisplayBack => f.write_str("display_back"),
            Self::Clear => f.write_str("clear"),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushFront(value) => write!(f, "Inserted {value} at the beginning."),
            Self::PushBack {
                value,
                was_empty: false,
            } => write!(f, "Inserted {value} at the end."),
            Self::PushBack {
                value,
                was_empty: true,
            } => write!(f, "Inserted {value} at the end (list was empty)."),
            Self::InsertAfter(after, value) => write!(f, "Inserted {value} after {after}."),
            Self::PopFront(value, Removed::Only) | Self::PopBack(value, Removed::Only) => {
                write!(f, "Deleted {value} (only node).")
            }
            Self::PopFront(value, _) => write!(f, "Deleted {value} from the beginning."),
            Self::PopBack(value, _) => write!(f, "Deleted {value} from the end."),
            Self::Remove(value, Removed::Node) => write!(f, "Deleted node with value {value}."),
            Self::Remove(value, Removed::Head) => {
                write!(f, "Deleted node with value {value} (was head node).")
            }
            Self::Remove(value, Removed::Only) => {
                write!(f, "Deleted node with value {value} (only node).")
            }
            Self::Search(value, position) => {
                write!(f, "Value {value} found at position {position}.")
            }
            Self::Display(line) => f.write_str(line),
            Self::Clear(1) => f.write_str("Released 1 node."),
            Self::Clear(n) => write!(f, "Released {n} nodes."),
            Self::Unsupported(topology, operation) => {
                write!(f, "Unsupported by {topology}: {operation}.")
            }
        }
    }
}

impl AnyList {
    pub(crate) fn new(topology: Topology, capacity: usize) -> Result<Self, Error> {
        Ok(match topology {
            Topology::Singly => Self::Singly(SinglyList::try_with_capacity(capacity)?),
            Topology::Doubly => Self::Doubly(DoublyList::try_with_capacity(capacity)?),
            Topology::Circular => Self::Circular(CircularList::try_with_capacity(capacity)?),
        })
    }

    pub(crate) fn topology(&self) -> Topology {
        match self {
            Self::Singly(_) => Topology::Singly,
            Self::Doubly(_) => Topology::Doubly,
            Self::Circular(_) => Topology::Circular,
        }
    }

    pub(crate) fn apply(&mut self, operation: Operation) -> Result<Outcome, Error> {
        tracing::trace!(topology = ?self.topology(), %operation, "apply");
        Ok(match (self, operation) {
            (Self::Singly(list), Operation::PushFront(value)) => {
                list.push_front(value)?;
                Outcome::PushFront(value)
            }
            (Self::Doubly(list), Operation::PushFront(value)) => {
                list.push_front(value)?;
                Outcome::PushFront(value)
            }
            (Self::Circular(list), Operation::PushFront(value)) => {
                list.push_front(value)?;
                Outcome::PushFront(value)
            }

            (Self::Singly(list), Operation::PushBack(value)) => {
                let was_empty = list.is_empty();
                list.push_back(value)?;
                Outcome::PushBack { value, was_empty }
            }
            (Self::Doubly(list), Operation::PushBack(value)) => {
                let was_empty = list.is_empty();
                list.push_back(value)?;
                Outcome::PushBack { value, was_empty }
            }
            (Self::Circular(list), Operation::PushBack(value)) => {
                let was_empty = list.is_empty();
                list.push_back(value)?;
                Outcome::PushBack { value, was_empty }
            }

            (Self::Singly(list), Operation::InsertAfter(after, value)) => {
                list.insert_after(after, value)?;
                Outcome::InsertAfter(after, value)
            }
            (Self::Doubly(list), Operation::InsertAfter(after, value)) => {
                list.insert_after(after, value)?;
                Outcome::InsertAfter(after, value)
            }
            (Self::Circular(list), Operation::InsertAfter(after, value)) => {
                list.insert_after(after, value)?;
                Outcome::InsertAfter(after, value)
            }

            (Self::Doubly(list), Operation::PopFront) => {
                Outcome::PopFront(list.pop_front()?, Removed::Node)
            }
            (Self::Circular(list), Operation::PopFront) => {
                let removed = if list.len() == 1 { Removed::Only } else { Removed::Node };
                Outcome::PopFront(list.pop_front()?, removed)
            }
            (Self::Doubly(list), Operation::PopBack) => {
                Outcome::PopBack(list.pop_back()?, Removed::Node)
            }
            (Self::Circular(list), Operation::PopBack) => {
                let removed = if list.len() == 1 { Removed::Only } else { Removed::Node };
                Outcome::PopBack(list.pop_back()?, removed)
            }

            (Self::Singly(list), Operation::Remove(value)) => {
                let removed = if list.front() == Some(value) {
                    Removed::Head
                } else {
                    Removed::Node
                };
                list.remove(value)?;
                Outcome::Remove(value, removed)
            }
            (Self::Doubly(list), Operation::Remove(value)) => {
                list.remove(value)?;
                Outcome::Remove(value, Removed::Node)
            }
            (Self::Circular(list), Operation::Remove(value)) => {
                let removed = match (list.front() == Some(value), list.len()) {
                    (true, 1) => Removed::Only,
                    (true, _) => Removed::Head,
                    (false, _) => Removed::Node,
                };
                list.remove(value)?;
                Outcome::Remove(value, removed)
            }

            (Self::Singly(list), Operation::Search(value)) => {
                Outcome::Search(value, list.search(value)?)
            }
            (Self::Doubly(list), Operation::Search(value)) => {
                Outcome::Search(value, list.search(value)?)
            }
            (Self::Circular(list), Operation::Search(value)) => {
                Outcome::Search(value, list.search(value)?)
            }

            (Self::Singly(list), Operation::Display) if list.is_empty() => {
                Outcome::Display("The list is empty.".to_string())
            }
            (Self::Doubly(list), Operation::Display | Operation::DisplayBack)
                if list.is_empty() =>
            {
                Outcome::Display("List is empty.".to_string())
            }
            (Self::Circular(list), Operation::Display) if list.is_empty() => {
                Outcome::Display("List is empty.".to_string())
            }
            (Self::Singly(list), Operation::Display) => {
                Outcome::Display(format!("Linked List: {list}"))
            }
            (Self::Doubly(list), Operation::Display) => {
                Outcome::Display(format!("Forward: {list}"))
            }
            (Self::Circular(list), Operation::Display) => {
                Outcome::Display(format!("Circular List: {list}"))
            }
            (Self::Doubly(list), Operation::DisplayBack) => {
                let mut line = String::from("Backward: ");
                for value in list.iter_back() {
                    line.push_str(&format!("{value} <-> "));
                }
                line.push_str("NULL");
                Outcome::Display(line)
            }

            (Self::Singly(list), Operation::Clear) => Outcome::Clear(list.clear()),
            (Self::Doubly(list), Operation::Clear) => Outcome::Clear(list.clear()),
            (Self::Circular(list), Operation::Clear) => Outcome::Clear(list.clear()),

            (this, operation) => {
                let topology = this.topology();
                tracing::warn!(?topology, %operation, "unsupported operation");
                Outcome::Unsupported(topology, operation)
            }
        })
    }

    /// Formats a recoverable error of `operation` the way the outcomes are formatted.
    ///
    /// A failed operation leaves the list unchanged, so the wording may depend on the list state.
    pub(crate) fn describe(&self, operation: Operation, error: &Error) -> String {
        match (self, operation, error) {
            (Self::Circular(list), Operation::Remove(_) | Operation::Search(_), _)
                if list.is_empty() =>
            {
                "List is empty.".to_string()
            }
            (_, Operation::Remove(value), Error::Empty) => {
                format!("Value {value} not found in the list.")
            }
            (_, _, Error::Empty) => "List is empty. Nothing to delete.".to_string(),
            (_, _, Error::NotFound { value }) => format!("Value {value} not found in the list."),
            (_, _, Error::Allocation { .. }) => error.to_string(),
        }
    }
}
