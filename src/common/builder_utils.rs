pub(crate) fn ensure_block_lengths_or_panic(block_length: usize, min_block_length: usize) {
    assert!(block_length > 0, "block_length must be greater than zero");
    assert!(
        min_block_length > 0,
        "min_block_length must be greater than zero"
    );
}
