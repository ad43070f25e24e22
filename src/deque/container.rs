use super::{Block, BlockPtr, Cursor, DequeBuilder, Position};
use crate::common::{
    error::Error,
    list::{BlockList, ListNode},
    DEFAULT_MIN_BLOCK_LENGTH,
};

use std::{
    fmt,
    ops::{Index, IndexMut},
};
use uuid::Uuid;

/// A sequence container with `O(√n)` random access, insertion and removal.
///
/// `Deque` stores its elements in a doubly linked list of _blocks_, where every
/// block is itself a doubly linked list of elements. Blocks are kept near a
/// target length of about `√n`:
///
/// - A block that grows past the target length is split in two.
/// - After a removal, a block is merged with a neighbor when both fit in one
///   block, or evened out with its successor when it has shrunk below half the
///   target length.
/// - Every `min(len, length²)` mutations, the whole structure is rebuilt with a
///   freshly computed target length.
///
/// Reaching the `i`-th element walks at most `O(√n)` blocks and then `O(√n)`
/// elements inside one block, and inserting or removing at a known position is
/// `O(1)` plus the amortized rebalancing cost.
///
/// # Examples
///
/// ```rust
/// use blockdeque::Deque;
///
/// let mut deque = Deque::new();
/// for i in 1..=1000 {
///     deque.push_back(i);
/// }
/// assert_eq!(deque.len(), 1000);
/// assert_eq!(deque.at(500), Ok(&501));
///
/// // Insert before the element at index 10.
/// let pos = deque.position(10)?;
/// let pos = deque.insert(pos, 0)?;
/// assert_eq!(deque.get(pos), Ok(&0));
/// assert_eq!(deque.index_of(pos), Ok(10));
///
/// // Erase returns the position of the following element.
/// let pos = deque.erase(pos)?;
/// assert_eq!(deque.get(pos), Ok(&11));
/// # Ok::<(), blockdeque::Error>(())
/// ```
///
/// # Positions
///
/// A [`Position`][position-struct] names one element (or the end) of one
/// deque. It does not borrow the deque; instead every deque method taking a
/// position checks that the position was issued by the same deque and that
/// the deque has not been mutated since. Every successful mutating call
/// (`insert`, `erase`, `push_back`, `clear`, ...) invalidates all positions
/// issued before it. The calls that take a position return a fresh one that
/// refers to the same logical place.
///
/// ```rust
/// use blockdeque::{Deque, Error};
///
/// let mut deque: Deque<_> = (0..10).collect();
/// let begin = deque.begin();
/// deque.push_back(10);
/// assert_eq!(deque.get(begin), Err(Error::InvalidIterator));
/// assert_eq!(deque.get(deque.begin()), Ok(&0));
/// ```
///
/// [position-struct]: ./struct.Position.html
pub struct Deque<T> {
    id: Uuid,
    generation: u64,
    pub(super) blocks: BlockList<Block<T>>,
    pub(super) len: usize,
    /// The current target block length.
    pub(super) block_length: usize,
    initial_block_length: usize,
    pub(super) min_block_length: usize,
    pub(super) ops_since_rebuild: usize,
}

impl<T> Deque<T> {
    /// Constructs a new, empty `Deque` with the default configuration.
    pub fn new() -> Self {
        Self::with_everything(DEFAULT_MIN_BLOCK_LENGTH, DEFAULT_MIN_BLOCK_LENGTH)
    }

    /// Returns a [`DequeBuilder`][builder-struct], which can build a `Deque`
    /// with a custom block configuration.
    ///
    /// [builder-struct]: ./struct.DequeBuilder.html
    pub fn builder() -> DequeBuilder<T> {
        DequeBuilder::new()
    }

    pub(crate) fn with_everything(block_length: usize, min_block_length: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation: 0,
            blocks: Self::single_empty_block(),
            len: 0,
            block_length,
            initial_block_length: block_length,
            min_block_length,
            ops_since_rebuild: 0,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no element.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current target block length.
    pub fn block_length(&self) -> usize {
        self.block_length
    }

    /// Returns the number of blocks. Always at least one, even when empty.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the number of elements in each block, from front to back.
    pub fn block_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().map(|block| block.elements.len())
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Fails with `IndexOutOfBound` unless `index < len`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        self.ensure_index(index)?;
        let cursor = self.cursor_at(index);
        self.element(cursor)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// Fails with `IndexOutOfBound` unless `index < len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        self.ensure_index(index)?;
        let cursor = self.cursor_at(index);
        self.element_mut(cursor)
    }

    /// Returns the first element, or `EmptyContainer`.
    pub fn front(&self) -> Result<&T, Error> {
        let block = self.first_block();
        self.elements(block).front().ok_or(Error::EmptyContainer)
    }

    /// Returns the first element mutably, or `EmptyContainer`.
    pub fn front_mut(&mut self) -> Result<&mut T, Error> {
        let block = self.first_block();
        self.elements_mut(block)
            .front_mut()
            .ok_or(Error::EmptyContainer)
    }

    /// Returns the last element, or `EmptyContainer`.
    pub fn back(&self) -> Result<&T, Error> {
        let block = self.last_block();
        self.elements(block).back().ok_or(Error::EmptyContainer)
    }

    /// Returns the last element mutably, or `EmptyContainer`.
    pub fn back_mut(&mut self) -> Result<&mut T, Error> {
        let block = self.last_block();
        self.elements_mut(block)
            .back_mut()
            .ok_or(Error::EmptyContainer)
    }

    /// Returns the position of the first element. Equal to `end()` when the
    /// deque is empty.
    pub fn begin(&self) -> Position<T> {
        self.issue(self.begin_cursor())
    }

    /// Returns the position one past the last element.
    pub fn end(&self) -> Position<T> {
        self.issue(self.end_cursor())
    }

    /// Returns the position of the element at `index`. `index == len` yields
    /// `end()`.
    pub fn position(&self, index: usize) -> Result<Position<T>, Error> {
        if index > self.len {
            return Err(Error::IndexOutOfBound {
                index,
                len: self.len,
            });
        }
        Ok(self.issue(self.cursor_at(index)))
    }

    /// Returns a reference to the element at `pos`.
    pub fn get(&self, pos: Position<T>) -> Result<&T, Error> {
        let cursor = self.validate(&pos)?;
        self.element(cursor)
    }

    /// Returns a mutable reference to the element at `pos`. This does not
    /// invalidate any position.
    pub fn get_mut(&mut self, pos: Position<T>) -> Result<&mut T, Error> {
        let cursor = self.validate(&pos)?;
        self.element_mut(cursor)
    }

    /// Returns the index of the element at `pos` (`len` for `end()`).
    pub fn index_of(&self, pos: Position<T>) -> Result<usize, Error> {
        let cursor = self.validate(&pos)?;
        Ok(self.index_of_cursor(cursor))
    }

    /// Inserts `value` before `pos` and returns the position of the inserted
    /// value.
    ///
    /// Fails with `InvalidIterator` if `pos` was not issued by this deque or is
    /// stale.
    pub fn insert(&mut self, pos: Position<T>, value: T) -> Result<Position<T>, Error> {
        let cursor = self.validate(&pos)?;
        Ok(self.insert_at_cursor(cursor, value))
    }

    /// Inserts `value` so that it ends up at `index`. `index == len` appends.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<Position<T>, Error> {
        if index > self.len {
            return Err(Error::IndexOutOfBound {
                index,
                len: self.len,
            });
        }
        let cursor = self.cursor_at(index);
        Ok(self.insert_at_cursor(cursor, value))
    }

    /// Removes the element at `pos` and returns the position of the following
    /// element, which is `end()` if the last element was removed.
    ///
    /// Fails with `EmptyContainer` on an empty deque, and with
    /// `InvalidIterator` if `pos` is foreign, stale or the end position.
    pub fn erase(&mut self, pos: Position<T>) -> Result<Position<T>, Error> {
        self.remove(pos).map(|(_, next)| next)
    }

    /// Like [`erase`](#method.erase) but also hands back the removed value.
    pub fn remove(&mut self, pos: Position<T>) -> Result<(T, Position<T>), Error> {
        let cursor = self.validate(&pos)?;
        self.remove_at_cursor(cursor)
    }

    /// Removes and returns the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, Error> {
        self.ensure_index(index)?;
        let cursor = self.cursor_at(index);
        self.remove_at_cursor(cursor).map(|(value, _)| value)
    }

    /// Appends an element to the back.
    pub fn push_back(&mut self, value: T) {
        let cursor = self.end_cursor();
        self.insert_at_cursor(cursor, value);
    }

    /// Prepends an element to the front.
    pub fn push_front(&mut self, value: T) {
        let cursor = self.begin_cursor();
        self.insert_at_cursor(cursor, value);
    }

    /// Removes the last element and returns it, or `EmptyContainer`.
    pub fn pop_back(&mut self) -> Result<T, Error> {
        let block = self.last_block();
        let cursor = Cursor::new(block, self.elements(block).tail());
        self.remove_at_cursor(cursor).map(|(value, _)| value)
    }

    /// Removes the first element and returns it, or `EmptyContainer`.
    pub fn pop_front(&mut self) -> Result<T, Error> {
        let cursor = self.begin_cursor();
        self.remove_at_cursor(cursor).map(|(value, _)| value)
    }

    /// Removes all elements. The target block length is reset to the configured
    /// initial value.
    pub fn clear(&mut self) {
        self.blocks = Self::single_empty_block();
        self.len = 0;
        self.block_length = self.initial_block_length;
        self.ops_since_rebuild = 0;
        self.bump_generation();
    }
}

// Crate private methods shared with the sibling modules.
impl<T> Deque<T> {
    pub(super) fn first_block(&self) -> BlockPtr<T> {
        match self.blocks.head() {
            Some(block) => block,
            None => unreachable!("a deque always holds at least one block"),
        }
    }

    pub(super) fn last_block(&self) -> BlockPtr<T> {
        match self.blocks.tail() {
            Some(block) => block,
            None => unreachable!("a deque always holds at least one block"),
        }
    }

    pub(super) fn next_block(&self, block: BlockPtr<T>) -> Option<BlockPtr<T>> {
        // SAFETY: every `BlockPtr` handled by this deque is a node of `self.blocks`.
        unsafe { ListNode::next_node_ptr(block) }
    }

    pub(super) fn prev_block(&self, block: BlockPtr<T>) -> Option<BlockPtr<T>> {
        unsafe { ListNode::prev_node_ptr(block) }
    }

    pub(super) fn elements(&self, block: BlockPtr<T>) -> &BlockList<T> {
        unsafe { &(*block.as_ptr()).element.elements }
    }

    pub(super) fn elements_mut(&mut self, block: BlockPtr<T>) -> &mut BlockList<T> {
        unsafe { &mut (*block.as_ptr()).element.elements }
    }

    pub(super) fn begin_cursor(&self) -> Cursor<T> {
        let block = self.first_block();
        Cursor::new(block, self.elements(block).head())
    }

    pub(super) fn end_cursor(&self) -> Cursor<T> {
        Cursor::new(self.last_block(), None)
    }

    /// Moves the end-of-block position of any block but the last onto the first
    /// element of the next block, so that every element and the end of the
    /// deque have exactly one cursor.
    pub(super) fn normalize(&self, cursor: Cursor<T>) -> Cursor<T> {
        if cursor.node.is_none() {
            if let Some(next) = self.next_block(cursor.block) {
                return Cursor::new(next, self.elements(next).head());
            }
        }
        cursor
    }

    /// Walks the blocks to find the element at `index`. `index >= len` yields
    /// the end cursor.
    pub(super) fn cursor_at(&self, index: usize) -> Cursor<T> {
        let mut remaining = index;
        let mut block = self.blocks.head();
        while let Some(current) = block {
            let elements = self.elements(current);
            if remaining < elements.len() {
                return Cursor::new(current, elements.node_at(remaining));
            }
            remaining -= elements.len();
            block = self.next_block(current);
        }
        self.end_cursor()
    }

    /// The offset of `cursor` inside its own block, its block's length for an
    /// end-of-block cursor.
    pub(super) fn offset_in_block(&self, cursor: Cursor<T>) -> usize {
        let elements = self.elements(cursor.block);
        match cursor.node {
            None => elements.len(),
            Some(_) => match elements.offset_of(cursor.node) {
                Ok(offset) => offset,
                Err(_) => unreachable!("a cursor always points into its own block"),
            },
        }
    }

    pub(super) fn index_of_cursor(&self, cursor: Cursor<T>) -> usize {
        let mut index = 0;
        let mut block = self.blocks.head();
        while let Some(current) = block {
            if current == cursor.block {
                break;
            }
            index += self.elements(current).len();
            block = self.next_block(current);
        }
        index + self.offset_in_block(cursor)
    }

    pub(super) fn element(&self, cursor: Cursor<T>) -> Result<&T, Error> {
        let node = cursor.node.ok_or(Error::InvalidIterator)?;
        Ok(unsafe { &(*node.as_ptr()).element })
    }

    pub(super) fn element_mut(&mut self, cursor: Cursor<T>) -> Result<&mut T, Error> {
        let node = cursor.node.ok_or(Error::InvalidIterator)?;
        Ok(unsafe { &mut (*node.as_ptr()).element })
    }

    /// Checks that `pos` was issued by this deque since its last mutation and
    /// returns the cursor it holds.
    pub(super) fn validate(&self, pos: &Position<T>) -> Result<Cursor<T>, Error> {
        if pos.owner() != self.id || pos.generation() != self.generation {
            return Err(Error::InvalidIterator);
        }
        Ok(pos.cursor())
    }

    pub(super) fn issue(&self, cursor: Cursor<T>) -> Position<T> {
        Position::new(self.id, self.generation, cursor)
    }
}

// Private methods
impl<T> Deque<T> {
    fn single_empty_block() -> BlockList<Block<T>> {
        let mut blocks = BlockList::new();
        blocks.push_back(Block::new(BlockList::new()));
        blocks
    }

    fn ensure_index(&self, index: usize) -> Result<(), Error> {
        if index < self.len {
            Ok(())
        } else {
            Err(Error::IndexOutOfBound {
                index,
                len: self.len,
            })
        }
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Invalidates every outstanding position and issues `cursor` under the new
    /// generation.
    fn commit(&mut self, cursor: Cursor<T>) -> Position<T> {
        self.bump_generation();
        self.issue(cursor)
    }

    fn insert_at_cursor(&mut self, cursor: Cursor<T>, value: T) -> Position<T> {
        // SAFETY: `cursor` came from this deque's current structure.
        let node = unsafe {
            self.elements_mut(cursor.block)
                .insert_before(cursor.node, value)
        };
        self.len += 1;

        let cursor = self.split_if_needed(Cursor::new(cursor.block, Some(node)));
        let cursor = self.reconstruct_if_needed(cursor);
        self.commit(cursor)
    }

    fn remove_at_cursor(&mut self, cursor: Cursor<T>) -> Result<(T, Position<T>), Error> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }
        let block = cursor.block;
        let (value, next) = unsafe { self.elements_mut(block).erase(cursor.node)? };
        self.len -= 1;

        let cursor = self.normalize(Cursor::new(block, next));
        let cursor = self.merge_if_needed(block, cursor);
        let cursor = self.reconstruct_if_needed(cursor);
        Ok((value, self.commit(cursor)))
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    /// Deep-copies every block and element. The copy is a distinct container:
    /// positions of one are rejected by the other.
    fn clone(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation: 0,
            blocks: self.blocks.clone(),
            len: self.len,
            block_length: self.block_length,
            initial_block_length: self.initial_block_length,
            min_block_length: self.min_block_length,
            ops_since_rebuild: self.ops_since_rebuild,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Deque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`. Use [`at`](#method.at) for a checked access.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}
