//! Keeping the blocks near the target length.
//!
//! Every mutation of a `Deque` runs through one of two fixed pipelines:
//!
//! - insert: `split_if_needed` -> `reconstruct_if_needed`
//! - erase: `merge_if_needed` -> `reconstruct_if_needed`
//!
//! Each step takes the cursor of the element the caller cares about and returns
//! a cursor to the same logical element in the updated structure. Element nodes
//! never move between allocations; only the block that owns them may change.
//!
//! Between public calls, every block except the last holds between
//! `ceil(length / 2)` and `length` elements, and no block is empty unless the
//! deque is.

use super::{Block, BlockPtr, Cursor, Deque};
use crate::common::{self, list::BlockList};

impl<T> Deque<T> {
    /// Splits the block of `cursor` in half if it has grown past the target
    /// length.
    pub(super) fn split_if_needed(&mut self, cursor: Cursor<T>) -> Cursor<T> {
        let block = cursor.block;
        let size = self.elements(block).len();
        if size <= self.block_length {
            return cursor;
        }

        let offset = self.offset_in_block(cursor);
        let (front, back) = self.elements_mut(block).split(size / 2);
        let front_len = front.len();
        *self.elements_mut(block) = front;
        let new_block = self.insert_block_after(block, back);

        #[cfg(feature = "logging")]
        log::trace!(
            "Split a block of {size} elements into {front_len} and {}",
            size - front_len
        );

        if offset < front_len {
            cursor
        } else {
            Cursor::new(new_block, cursor.node)
        }
    }

    /// Called after an element was removed from `block`. Joins `block` with its
    /// next or previous neighbor when the two fit in one block. Otherwise, if
    /// `block` has dropped below half the target length and is not the last
    /// block, spreads its elements evenly with the next block.
    pub(super) fn merge_if_needed(&mut self, block: BlockPtr<T>, cursor: Cursor<T>) -> Cursor<T> {
        let size = self.elements(block).len();
        let next = self.next_block(block);

        if let Some(next) = next {
            if size + self.elements(next).len() <= self.block_length {
                return self.merge_blocks(block, next, cursor);
            }
        }
        if let Some(prev) = self.prev_block(block) {
            if self.elements(prev).len() + size <= self.block_length {
                return self.merge_blocks(prev, block, cursor);
            }
        }
        match next {
            Some(next) if size * 2 < self.block_length => self.redistribute(block, next, cursor),
            _ => cursor,
        }
    }

    /// Rebuilds every block once more than `min(len, length²)` mutations have
    /// happened since the last rebuild. The target length becomes
    /// `max(min_block_length, ceil(sqrt(len)))`.
    pub(super) fn reconstruct_if_needed(&mut self, cursor: Cursor<T>) -> Cursor<T> {
        self.ops_since_rebuild += 1;
        let threshold = self
            .len
            .min(self.block_length.saturating_mul(self.block_length));
        if self.ops_since_rebuild <= threshold {
            return cursor;
        }
        self.reconstruct(cursor)
    }

    fn reconstruct(&mut self, cursor: Cursor<T>) -> Cursor<T> {
        let index = self.index_of_cursor(cursor);

        #[cfg(feature = "logging")]
        let (old_length, old_count) = (self.block_length, self.blocks.len());

        self.block_length = common::target_block_length(self.len, self.min_block_length);

        // Flatten. Each append is O(1).
        let mut flat = BlockList::new();
        while let Ok(mut block) = self.blocks.pop_front() {
            flat.append(&mut block.elements);
        }

        // Rechunk into blocks of exactly `block_length`, the last one taking the
        // remainder.
        while flat.len() > self.block_length {
            let (piece, rest) = flat.split(self.block_length);
            self.blocks.push_back(Block::new(piece));
            flat = rest;
        }
        self.blocks.push_back(Block::new(flat));
        self.ops_since_rebuild = 0;

        #[cfg(feature = "logging")]
        log::debug!(
            "Rebuilt {} elements: block length {old_length} -> {}, blocks {old_count} -> {}",
            self.len,
            self.block_length,
            self.blocks.len()
        );

        self.cursor_at(index)
    }

    /// Moves every element of `second` to the back of `first` and drops the
    /// emptied `second` block.
    fn merge_blocks(
        &mut self,
        first: BlockPtr<T>,
        second: BlockPtr<T>,
        cursor: Cursor<T>,
    ) -> Cursor<T> {
        let mut moved = std::mem::take(self.elements_mut(second));
        self.elements_mut(first).append(&mut moved);
        self.remove_block(second);

        #[cfg(feature = "logging")]
        log::trace!(
            "Merged two blocks into one of {} elements",
            self.elements(first).len()
        );

        if cursor.block == second {
            Cursor::new(first, cursor.node)
        } else {
            cursor
        }
    }

    /// Spreads the elements of two adjacent blocks evenly over both.
    fn redistribute(
        &mut self,
        first: BlockPtr<T>,
        second: BlockPtr<T>,
        cursor: Cursor<T>,
    ) -> Cursor<T> {
        let offset = if cursor.block == first {
            Some(self.offset_in_block(cursor))
        } else if cursor.block == second {
            Some(self.elements(first).len() + self.offset_in_block(cursor))
        } else {
            None
        };

        let mut moved = std::mem::take(self.elements_mut(second));
        let combined = self.elements_mut(first);
        combined.append(&mut moved);
        let total = combined.len();
        let (front, back) = combined.split(total / 2);
        let front_len = front.len();
        *self.elements_mut(first) = front;
        *self.elements_mut(second) = back;

        #[cfg(feature = "logging")]
        log::trace!(
            "Redistributed {total} elements into blocks of {front_len} and {}",
            total - front_len
        );

        match offset {
            Some(offset) if offset < front_len => Cursor::new(first, cursor.node),
            Some(_) => Cursor::new(second, cursor.node),
            None => cursor,
        }
    }

    fn insert_block_after(&mut self, block: BlockPtr<T>, elements: BlockList<T>) -> BlockPtr<T> {
        let next = self.next_block(block);
        // SAFETY: `next` is `None` or a node of `self.blocks`.
        unsafe { self.blocks.insert_before(next, Block::new(elements)) }
    }

    fn remove_block(&mut self, block: BlockPtr<T>) {
        // SAFETY: `block` is a node of `self.blocks`. Erasing a node never fails.
        let _ = unsafe { self.blocks.erase(Some(block)) };
    }
}
