use super::{Block, Deque};
use crate::common::list::{self, BlockList};

use std::iter::FlatMap;

type BlockIter<'a, T> = list::Iter<'a, Block<T>>;
type BlockIterMut<'a, T> = list::IterMut<'a, Block<T>>;

/// An iterator over the elements of a `Deque`, from front to back.
///
/// Created by [`Deque::iter`](./struct.Deque.html#method.iter).
pub struct Iter<'a, T> {
    inner: FlatMap<BlockIter<'a, T>, list::Iter<'a, T>, fn(&Block<T>) -> list::Iter<'_, T>>,
    remaining: usize,
}

// SAFETY: `Iter` only hands out shared references to elements.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.inner.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `Deque`, from front to back.
///
/// Created by [`Deque::iter_mut`](./struct.Deque.html#method.iter_mut).
pub struct IterMut<'a, T> {
    inner: FlatMap<
        BlockIterMut<'a, T>,
        list::IterMut<'a, T>,
        fn(&mut Block<T>) -> list::IterMut<'_, T>,
    >,
    remaining: usize,
}

// SAFETY: `IterMut` hands out unique references to distinct elements.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.inner.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `Deque`, from front to back.
///
/// Created by the `into_iter` method of `Deque` (provided by the
/// `IntoIterator` trait).
pub struct IntoIter<T> {
    inner: list::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Deque<T> {
    /// Returns a front-to-back iterator over the elements.
    ///
    /// ```rust
    /// use blockdeque::Deque;
    ///
    /// let deque: Deque<_> = (1..=5).collect();
    /// assert_eq!(deque.iter().rev().copied().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let elements: fn(&Block<T>) -> list::Iter<'_, T> = |block| block.elements.iter();
        Iter {
            inner: self.blocks.iter().flat_map(elements),
            remaining: self.len,
        }
    }

    /// Returns a front-to-back iterator that allows modifying each element.
    ///
    /// Modifying elements in place does not invalidate positions.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let elements: fn(&mut Block<T>) -> list::IterMut<'_, T> =
            |block| block.elements.iter_mut();
        IterMut {
            inner: self.blocks.iter_mut().flat_map(elements),
            remaining: self.len,
        }
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut blocks = self.blocks;
        let mut elements = BlockList::new();
        while let Ok(mut block) = blocks.pop_front() {
            elements.append(&mut block.elements);
        }
        IntoIter {
            inner: elements.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
