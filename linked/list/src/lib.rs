//! Linked lists of `i32` values in three topologies.
//!
//! * [`SinglyList`]: Each node links to its successor; the last node links to nothing.
//! * [`DoublyList`]: Each node links to both neighbors.
//! * [`CircularList`]: Each node links to its successor; the last node links back to the head.
//!
//! Deletion and search on an empty list, or of an absent value, are no-ops that return
//! [`Error::Empty`] or [`Error::NotFound`].  Insertion fails only when a node cannot be allocated,
//! in which case the list is left unchanged.
//!
//! ```
//! use linked_list::{Error, SinglyList};
//!
//! let mut list = SinglyList::new();
//! list.push_front(10)?;
//! list.push_front(5)?;
//! list.push_back(20)?;
//! list.insert_after(10, 15)?;
//! assert_eq!(list.iter().collect::<Vec<_>>(), [5, 10, 15, 20]);
//! assert_eq!(list.search(15), Ok(3));
//! assert_eq!(list.remove(100), Err(Error::NotFound { value: 100 }));
//! # Ok::<(), Error>(())
//! ```

mod arena;
mod circular;
mod doubly;
mod error;
mod singly;

//
// Implementer's Notes:
//
// * Nodes live in a per-list arena and link to each other by slot index.  This sidesteps the
//   ownership problems of back links (doubly) and cycles (circular) without `unsafe` or `Rc`.
//
// * The lists deliberately keep only the head, not the tail.  Operations on the tail walk the
//   list, and we do not cache the tail.
//
// * After every mutation, debug builds walk the entire list and assert its link invariants.  This
//   makes every mutation `O(N)` in debug builds.
//
// * On duplicate values, `insert_after`, `remove`, and `search` act on the first match.
//

pub use crate::circular::CircularList;
pub use crate::doubly::DoublyList;
pub use crate::error::Error;
pub use crate::singly::SinglyList;
