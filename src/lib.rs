#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Blockdeque provides a sequence container with `O(√n)` random access and
//! `O(√n)` amortized insertion and removal at any position.
//!
//! The [`Deque`][deque-struct] keeps its elements in a linked list of blocks,
//! each block a linked list of about `√n` elements. Reaching the `i`-th
//! element skips whole blocks first and then walks inside one block. Blocks
//! are split when they grow too large, merged with a neighbor when they shrink,
//! and the whole structure is periodically rebuilt around a fresh target
//! length.
//!
//! [deque-struct]: ./struct.Deque.html
//!
//! # Example
//!
//! ```rust
//! use blockdeque::{Deque, Error};
//!
//! let mut deque = Deque::new();
//! deque.push_back(2);
//! deque.push_back(3);
//! deque.push_front(1);
//! assert_eq!(deque.at(1), Ok(&2));
//!
//! // Insert in the middle through a position.
//! let pos = deque.position(2)?;
//! let pos = deque.insert(pos, 10)?;
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [1, 2, 10, 3]);
//!
//! // Erasing returns the position of the next element.
//! let pos = deque.erase(pos)?;
//! assert_eq!(deque.get(pos), Ok(&3));
//!
//! deque.clear();
//! assert_eq!(deque.pop_front(), Err(Error::EmptyContainer));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Positions
//!
//! Positions play the role of iterators in the C++ sense. A
//! [`Position`][position-struct] is a small `Copy` handle that the deque
//! checks on every use: a position issued by another deque, or issued before
//! the latest insertion or removal, is rejected with
//! [`Error::InvalidIterator`][invalid-iterator] instead of touching freed
//! memory. Mutating calls that take a position return a fresh one.
//!
//! [position-struct]: ./struct.Position.html
//! [invalid-iterator]: ./enum.Error.html#variant.InvalidIterator
//!
//! # Configuration
//!
//! [`DequeBuilder`][builder-struct] sets the initial target block length and
//! its floor (both 200 by default).
//!
//! [builder-struct]: ./struct.DequeBuilder.html
//!
//! # Crate Features
//!
//! - `logging`: emits `debug` records on every rebuild and `trace` records on
//!   every block split, merge and redistribution through the [`log`][log-crate]
//!   crate.
//!
//! [log-crate]: https://crates.io/crates/log

pub(crate) mod common;
pub(crate) mod deque;

pub use common::error::Error;
pub use deque::{Deque, DequeBuilder, IntoIter, Iter, IterMut, Position};
