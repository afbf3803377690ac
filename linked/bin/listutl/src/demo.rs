use crate::list::Operation::*;
use crate::list::{Operation, Topology};

/// Returns the demonstration scenario of each topology.
///
/// The list is dropped at the end of the scenario, which releases its nodes silently.
pub(crate) fn scenario(topology: Topology) -> Vec<Operation> {
    let mut operations = vec![PushFront(10), PushFront(5), PushBack(20), PushBack(30), Display];
    match topology {
        Topology::Singly => operations.extend([
            InsertAfter(10, 15),
            Display,
            Remove(5),
            Display,
            Remove(20),
            Display,
            Search(15),
            Search(100),
        ]),
        Topology::Doubly | Topology::Circular => {
            if topology == Topology::Doubly {
                operations.push(DisplayBack);
            }
            operations.extend([
                PopFront,
                Display,
                PopBack,
                Display,
                Remove(20),
                Display,
                Remove(100),
                Search(10),
                Search(100),
            ]);
        }
    }
    operations
}
