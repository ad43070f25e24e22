use super::{Cursor, Deque};
use crate::common::error::Error;

use std::fmt;
use uuid::Uuid;

/// A position in a [`Deque`][deque-struct]: either an element or the end.
///
/// A `Position` is a plain `Copy` handle. It remembers which deque issued it
/// and in which state, and the deque refuses it with
/// [`Error::InvalidIterator`][invalid-iterator] once it no longer applies.
/// Stepping and arithmetic go through the deque:
///
/// | C++-style iterator | `Deque` method            |
/// |--------------------|---------------------------|
/// | `*it`              | `get(it)` / `get_mut(it)` |
/// | `++it`, `--it`     | `next(it)`, `prev(it)`    |
/// | `it + n`, `it - n` | `advance(it, n)`          |
/// | `a - b`            | `distance(a, b)`          |
///
/// ```rust
/// use blockdeque::Deque;
///
/// let deque: Deque<_> = (0..100).collect();
/// let a = deque.position(70)?;
/// let b = deque.advance(a, -50)?;
/// assert_eq!(deque.get(b), Ok(&20));
/// assert_eq!(deque.distance(a, b), Ok(50));
/// assert_eq!(deque.advance(b, 50), Ok(a));
/// # Ok::<(), blockdeque::Error>(())
/// ```
///
/// [deque-struct]: ./struct.Deque.html
/// [invalid-iterator]: ./enum.Error.html#variant.InvalidIterator
pub struct Position<T> {
    owner: Uuid,
    generation: u64,
    cursor: Cursor<T>,
}

impl<T> Position<T> {
    pub(crate) fn new(owner: Uuid, generation: u64, cursor: Cursor<T>) -> Self {
        Self {
            owner,
            generation,
            cursor,
        }
    }

    pub(crate) fn owner(&self) -> Uuid {
        self.owner
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cursor(&self) -> Cursor<T> {
        self.cursor
    }
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.generation == other.generation
            && self.cursor == other.cursor
    }
}

impl<T> Eq for Position<T> {}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("owner", &self.owner)
            .field("generation", &self.generation)
            .field("block", &self.cursor.block)
            .field("node", &self.cursor.node)
            .finish()
    }
}

impl<T> Deque<T> {
    /// Returns the position after `pos`. Stepping forward from the last element
    /// yields `end()`; stepping forward from `end()` fails with
    /// `InvalidIterator`.
    pub fn next(&self, pos: Position<T>) -> Result<Position<T>, Error> {
        let cursor = self.validate(&pos)?;
        // SAFETY: a validated cursor points into the current structure.
        let node = unsafe { self.elements(cursor.block).next_of(cursor.node)? };
        Ok(self.issue(self.normalize(Cursor::new(cursor.block, node))))
    }

    /// Returns the position before `pos`. Stepping backward from `begin()`
    /// fails with `InvalidIterator`.
    pub fn prev(&self, pos: Position<T>) -> Result<Position<T>, Error> {
        let cursor = self.validate(&pos)?;
        let elements = self.elements(cursor.block);

        if cursor.node == elements.head() {
            // First element of its block: cross over to the previous block.
            let block = self
                .prev_block(cursor.block)
                .ok_or(Error::InvalidIterator)?;
            let node = self.elements(block).tail();
            return Ok(self.issue(Cursor::new(block, node)));
        }

        let node = unsafe { elements.prev_of(cursor.node)? };
        Ok(self.issue(Cursor::new(cursor.block, node)))
    }

    /// Returns the position `n` elements after `pos` (before it if `n` is
    /// negative). The result must lie within `begin()..=end()`, otherwise this
    /// fails with `InvalidIterator`.
    pub fn advance(&self, pos: Position<T>, n: isize) -> Result<Position<T>, Error> {
        let cursor = self.validate(&pos)?;
        if n == 0 {
            return Ok(pos);
        }

        let index = self.index_of_cursor(cursor);
        let target = if n < 0 {
            index.checked_sub(n.unsigned_abs())
        } else {
            index.checked_add(n.unsigned_abs())
        };
        match target {
            Some(target) if target <= self.len => Ok(self.issue(self.cursor_at(target))),
            _ => Err(Error::InvalidIterator),
        }
    }

    /// Returns `a - b`: the number of steps from `b` forward to `a`, negative
    /// when `a` comes before `b`.
    pub fn distance(&self, a: Position<T>, b: Position<T>) -> Result<isize, Error> {
        let a = self.validate(&a)?;
        let b = self.validate(&b)?;

        if a.block == b.block {
            return Ok(self.offset_in_block(a) as isize - self.offset_in_block(b) as isize);
        }
        if let Some(span) = self.span_between(b, a) {
            return Ok(span as isize);
        }
        self.span_between(a, b)
            .map(|span| -(span as isize))
            .ok_or(Error::InvalidIterator)
    }

    /// Counts the elements from `from` up to `to`, walking forward block by
    /// block. `None` if `to.block` does not come after `from.block`.
    fn span_between(&self, from: Cursor<T>, to: Cursor<T>) -> Option<usize> {
        let mut span = self.elements(from.block).len() - self.offset_in_block(from);
        let mut block = self.next_block(from.block);
        while let Some(current) = block {
            if current == to.block {
                return Some(span + self.offset_in_block(to));
            }
            span += self.elements(current).len();
            block = self.next_block(current);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::{common::error::Error, deque::Deque};

    fn small_deque(len: usize) -> Deque<usize> {
        let mut deque = Deque::builder()
            .block_length(4)
            .min_block_length(4)
            .build();
        deque.extend(0..len);
        deque
    }

    #[test]
    fn forward_walk_reaches_end() {
        let deque = small_deque(23);
        assert!(deque.block_count() > 1);

        let mut pos = deque.begin();
        let mut seen = Vec::new();
        while pos != deque.end() {
            seen.push(*deque.get(pos).unwrap());
            pos = deque.next(pos).unwrap();
        }
        assert_eq!(seen, (0..23).collect::<Vec<_>>());

        // Past the end.
        assert_eq!(deque.next(pos), Err(Error::InvalidIterator));
        assert_eq!(deque.get(pos), Err(Error::InvalidIterator));
    }

    #[test]
    fn backward_walk_reaches_begin() {
        let deque = small_deque(23);

        let mut pos = deque.end();
        let mut seen = Vec::new();
        while pos != deque.begin() {
            pos = deque.prev(pos).unwrap();
            seen.push(*deque.get(pos).unwrap());
        }
        assert_eq!(seen, (0..23).rev().collect::<Vec<_>>());

        // Before the beginning.
        assert_eq!(deque.prev(pos), Err(Error::InvalidIterator));
    }

    #[test]
    fn empty_deque_cannot_step() {
        let deque = small_deque(0);
        assert_eq!(deque.next(deque.begin()), Err(Error::InvalidIterator));
        assert_eq!(deque.prev(deque.end()), Err(Error::InvalidIterator));
        assert_eq!(deque.advance(deque.begin(), 1), Err(Error::InvalidIterator));
        assert_eq!(deque.advance(deque.begin(), 0), Ok(deque.end()));
    }

    #[test]
    fn advance() {
        let deque = small_deque(30);
        let begin = deque.begin();
        for i in 0..30 {
            let pos = deque.advance(begin, i as isize).unwrap();
            assert_eq!(deque.get(pos), Ok(&i));
            assert_eq!(deque.index_of(pos), Ok(i));
        }
        assert_eq!(deque.advance(begin, 30), Ok(deque.end()));
        assert_eq!(deque.advance(begin, 31), Err(Error::InvalidIterator));
        assert_eq!(deque.advance(begin, -1), Err(Error::InvalidIterator));
        assert_eq!(deque.advance(deque.end(), -30), Ok(begin));
        assert_eq!(deque.advance(begin, isize::MIN), Err(Error::InvalidIterator));
    }

    #[test]
    fn distance() {
        let deque = small_deque(30);
        let positions: Vec<Position<usize>> =
            (0..=30).map(|i| deque.position(i).unwrap()).collect();

        for (i, &a) in positions.iter().enumerate() {
            for (j, &b) in positions.iter().enumerate() {
                let d = deque.distance(a, b).unwrap();
                assert_eq!(d, i as isize - j as isize);
                assert_eq!(deque.advance(b, d), Ok(a));
            }
        }
    }

    #[test]
    fn positions_from_another_deque_are_rejected() {
        let deque = small_deque(5);
        let other = small_deque(5);
        let foreign = other.begin();
        assert_eq!(deque.next(foreign), Err(Error::InvalidIterator));
        assert_eq!(deque.prev(foreign), Err(Error::InvalidIterator));
        assert_eq!(deque.advance(foreign, 1), Err(Error::InvalidIterator));
        assert_eq!(
            deque.distance(foreign, deque.begin()),
            Err(Error::InvalidIterator)
        );
        assert_eq!(deque.index_of(foreign), Err(Error::InvalidIterator));
    }
}
