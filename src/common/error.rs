/// The error type for the fallible operations of [`Deque`][deque-struct] and
/// its positions.
///
/// A failed operation never leaves a partial mutation behind: every check is done
/// before the container is touched.
///
/// [deque-struct]: ./struct.Deque.html
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The container holds no element.
    ///
    /// Returned by `front`, `back`, `pop_front`, `pop_back` and `erase` on an
    /// empty deque.
    #[error("the container is empty")]
    EmptyContainer,

    /// An index was not in `0..len`.
    #[error("index {index} is out of bound (len: {len})")]
    IndexOutOfBound {
        /// The requested index.
        index: usize,
        /// The number of elements at the time of the call.
        len: usize,
    },

    /// The position cannot be used for the requested operation.
    ///
    /// This covers positions issued by another deque, positions issued before
    /// the last mutation of this deque, dereferencing the end position, and
    /// stepping past either boundary.
    #[error("the iterator is invalid for this operation")]
    InvalidIterator,
}
