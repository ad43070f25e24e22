use super::Deque;
use crate::common::{builder_utils, DEFAULT_MIN_BLOCK_LENGTH};

use std::marker::PhantomData;

/// Builds a [`Deque`][deque-struct] with a custom block configuration.
///
/// [deque-struct]: ./struct.Deque.html
///
/// # Examples
///
/// ```rust
/// use blockdeque::DequeBuilder;
///
/// let mut deque = DequeBuilder::new()
///     // Start with blocks of 16 elements.
///     .block_length(16)
///     // Never let a rebuild pick a target below 8.
///     .min_block_length(8)
///     .build();
///
/// deque.extend(0..100);
/// assert_eq!(deque.block_length(), 16);
/// assert!(deque.block_sizes().all(|size| size <= 16));
/// ```
///
pub struct DequeBuilder<T> {
    block_length: Option<usize>,
    min_block_length: usize,
    deque_type: PhantomData<Deque<T>>,
}

impl<T> Default for DequeBuilder<T> {
    fn default() -> Self {
        Self {
            block_length: None,
            min_block_length: DEFAULT_MIN_BLOCK_LENGTH,
            deque_type: PhantomData,
        }
    }
}

impl<T> DequeBuilder<T> {
    /// Construct a new `DequeBuilder` with the default configuration: a target
    /// block length of 200 that never drops below 200.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a `Deque<T>`.
    ///
    /// # Panics
    ///
    /// Panics if either `block_length` or `min_block_length` is zero.
    pub fn build(self) -> Deque<T> {
        let block_length = self.block_length.unwrap_or(self.min_block_length);
        builder_utils::ensure_block_lengths_or_panic(block_length, self.min_block_length);
        Deque::with_everything(block_length, self.min_block_length)
    }

    /// Sets the target block length the deque starts with, and returns to after
    /// `clear`. Defaults to `min_block_length`.
    ///
    /// The first rebuild replaces it with `max(min_block_length, ceil(sqrt(len)))`.
    pub fn block_length(self, length: usize) -> Self {
        Self {
            block_length: Some(length),
            ..self
        }
    }

    /// Sets the lower bound of the target block length that rebuilds pick.
    pub fn min_block_length(self, length: usize) -> Self {
        Self {
            min_block_length: length,
            ..self
        }
    }
}
