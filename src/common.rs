pub(crate) mod builder_utils;
pub(crate) mod error;
pub(crate) mod list;

#[cfg(test)]
pub(crate) mod test_utils;

/// The floor of the target block length. `reconstruct` never picks a smaller
/// target than this unless the deque was configured with a lower floor.
pub(crate) const DEFAULT_MIN_BLOCK_LENGTH: usize = 200;

/// The target block length `reconstruct` picks for a deque holding `len`
/// elements: `ceil(sqrt(len))`, but never below `min_block_length`.
pub(crate) fn target_block_length(len: usize, min_block_length: usize) -> usize {
    let mut root = (len as f64).sqrt() as usize;
    // Correct the float estimate so that `root` is the exact ceiling.
    while root.saturating_mul(root) < len {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= len {
        root -= 1;
    }
    root.max(min_block_length)
}
