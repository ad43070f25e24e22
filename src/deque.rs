//! The block-decomposed deque and its positions.

mod builder;
mod container;
mod iter;
mod position;
mod rebalance;

use std::ptr::NonNull;

use crate::common::list::{BlockList, Link, ListNode};

pub use builder::DequeBuilder;
pub use container::Deque;
pub use iter::{IntoIter, Iter, IterMut};
pub use position::Position;

/// One run of consecutive elements. The unit that split, merge and reconstruct
/// operate on.
#[derive(Clone)]
pub(crate) struct Block<T> {
    pub(crate) elements: BlockList<T>,
}

impl<T> Block<T> {
    pub(crate) fn new(elements: BlockList<T>) -> Self {
        Self { elements }
    }
}

// A block node in the top-level list.
pub(crate) type BlockPtr<T> = NonNull<ListNode<Block<T>>>;

/// A raw location: a block of the top-level list and a position inside that
/// block's elements. Only meaningful while the structure it was taken from is
/// unchanged.
pub(crate) struct Cursor<T> {
    pub(crate) block: BlockPtr<T>,
    pub(crate) node: Link<T>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(block: BlockPtr<T>, node: Link<T>) -> Self {
        Self { block, node }
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.block == other.block && self.node == other.node
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> std::fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("block", &self.block)
            .field("node", &self.node)
            .finish()
    }
}
