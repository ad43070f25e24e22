use std::collections::VecDeque;

use blockdeque::{Deque, Error};
use paste::paste;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Collects the elements by stepping a position from `begin()` to `end()`.
fn walk<T: Clone>(deque: &Deque<T>) -> Vec<T> {
    let mut values = Vec::with_capacity(deque.len());
    let mut pos = deque.begin();
    while pos != deque.end() {
        values.push(deque.get(pos).unwrap().clone());
        pos = deque.next(pos).unwrap();
    }
    values
}

fn assert_blocks_in_range<T>(deque: &Deque<T>) {
    let sizes = deque.block_sizes().collect::<Vec<_>>();
    let length = deque.block_length();
    assert_eq!(sizes.iter().sum::<usize>(), deque.len());
    let (last, rest) = sizes.split_last().unwrap();
    for &size in rest {
        assert!(
            size * 2 >= length && size <= length,
            "block size {size} out of range for length {length}"
        );
    }
    assert!(*last <= length);
    assert!(*last > 0 || deque.is_empty());
}

fn push_then_drain(mut deque: Deque<u32>) {
    for i in 1..=1000 {
        deque.push_back(i);
    }
    assert_eq!(deque.len(), 1000);
    assert_eq!(deque.at(500), Ok(&501));
    assert_eq!(deque[999], 1000);

    for expected in 1..=1000 {
        assert_eq!(deque.front(), Ok(&expected));
        let pos = deque.erase(deque.begin()).unwrap();
        assert_eq!(pos, deque.begin());
        assert_blocks_in_range(&deque);
    }
    assert!(deque.is_empty());
    assert_eq!(deque.begin(), deque.end());
    assert_eq!(deque.erase(deque.begin()), Err(Error::EmptyContainer));
}

fn random_interleave(mut deque: Deque<u32>, seed: u64, ops: usize) {
    init_logger();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut expected = VecDeque::new();

    for step in 0..ops {
        let value = step as u32;
        // Inserts slightly outnumber erases so the deque keeps growing.
        if expected.is_empty() || rng.random_bool(0.55) {
            let index = rng.random_range(0..=expected.len());
            let pos = deque.position(index).unwrap();
            let pos = deque.insert(pos, value).unwrap();
            assert_eq!(deque.get(pos), Ok(&value));
            assert_eq!(deque.index_of(pos), Ok(index));
            expected.insert(index, value);
        } else {
            let index = rng.random_range(0..expected.len());
            let pos = deque.position(index).unwrap();
            let pos = deque.erase(pos).unwrap();
            assert_eq!(deque.index_of(pos), Ok(index));
            expected.remove(index);
        }

        assert_eq!(deque.len(), expected.len());
        assert_eq!(walk(&deque), Vec::from(expected.clone()));
        assert_blocks_in_range(&deque);
    }
}

fn random_ends(mut deque: Deque<u32>, seed: u64, ops: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut expected = VecDeque::new();

    for step in 0..ops {
        let value = step as u32;
        match rng.random_range(0..4) {
            0 => {
                deque.push_back(value);
                expected.push_back(value);
            }
            1 => {
                deque.push_front(value);
                expected.push_front(value);
            }
            2 => assert_eq!(deque.pop_back().ok(), expected.pop_back()),
            _ => assert_eq!(deque.pop_front().ok(), expected.pop_front()),
        }
        assert_eq!(deque.front().ok(), expected.front());
        assert_eq!(deque.back().ok(), expected.back());
    }
    assert!(deque.iter().eq(expected.iter()));
    assert_blocks_in_range(&deque);
}

macro_rules! generate_scenarios {
    ($name:ident, $deque_init:expr) => {
        paste! {
            #[test]
            fn [<test_ $name _push_then_drain>]() {
                push_then_drain($deque_init);
            }

            #[test]
            fn [<test_ $name _random_interleave>]() {
                random_interleave($deque_init, 0x5eed, 10_000);
            }

            #[test]
            fn [<test_ $name _random_ends>]() {
                random_ends($deque_init, 0xdeca, 5_000);
            }
        }
    };
}

generate_scenarios!(default, Deque::new());
generate_scenarios!(
    tiny_blocks,
    Deque::builder().block_length(2).min_block_length(1).build()
);
generate_scenarios!(
    small_blocks,
    Deque::builder().block_length(8).min_block_length(8).build()
);
generate_scenarios!(
    growing_blocks,
    Deque::builder().block_length(1).min_block_length(4).build()
);

#[test]
fn insert_at_both_ends() {
    let mut deque = Deque::builder()
        .block_length(4)
        .min_block_length(4)
        .build();

    let pos = deque.insert(deque.end(), 2).unwrap();
    assert_eq!(deque.index_of(pos), Ok(0));
    let pos = deque.insert(deque.begin(), 1).unwrap();
    assert_eq!(deque.index_of(pos), Ok(0));
    let pos = deque.insert(deque.end(), 3).unwrap();
    assert_eq!(deque.index_of(pos), Ok(2));
    assert_eq!(walk(&deque), [1, 2, 3]);

    // Stepping forward from the last element lands exactly on end().
    assert_eq!(deque.next(pos), Ok(deque.end()));
}

#[test]
fn erase_last_element_returns_end() {
    let mut deque: Deque<u32> = (0..50).collect();
    let last = deque.prev(deque.end()).unwrap();
    let pos = deque.erase(last).unwrap();
    assert_eq!(pos, deque.end());
    assert_eq!(deque.back(), Ok(&48));
}

#[test]
fn errors_leave_the_deque_untouched() {
    let mut deque: Deque<u32> = (0..10).collect();
    let stale = deque.begin();
    deque.push_back(10);
    let before = deque.clone();

    assert_eq!(deque.insert(stale, 0), Err(Error::InvalidIterator));
    assert_eq!(deque.erase(stale), Err(Error::InvalidIterator));
    assert_eq!(deque.erase(deque.end()), Err(Error::InvalidIterator));
    assert_eq!(
        deque.insert_at(12, 0),
        Err(Error::IndexOutOfBound { index: 12, len: 11 })
    );
    assert_eq!(
        deque.remove_at(11),
        Err(Error::IndexOutOfBound { index: 11, len: 11 })
    );
    assert_eq!(
        deque.at(11),
        Err(Error::IndexOutOfBound { index: 11, len: 11 })
    );
    assert_eq!(deque, before);

    // The positions issued before the failed calls are still valid.
    let begin = deque.begin();
    assert_eq!(deque.erase(deque.end()), Err(Error::InvalidIterator));
    assert_eq!(deque.get(begin), Ok(&0));
}

#[test]
fn positions_of_a_copy_are_foreign() {
    let deque: Deque<u32> = (0..10).collect();
    let mut copy = deque.clone();
    assert_eq!(copy, deque);

    assert_eq!(copy.erase(deque.begin()), Err(Error::InvalidIterator));
    assert_eq!(deque.get(copy.begin()), Err(Error::InvalidIterator));

    copy.push_back(10);
    copy[0] = 100;
    assert_eq!(deque.len(), 10);
    assert_eq!(deque[0], 0);
    assert_ne!(copy, deque);
}

#[test]
fn large_deque_rebuilds_to_sqrt_length() {
    init_logger();
    let mut deque = Deque::builder().min_block_length(16).build();
    // 90,000 = 300², so the target settles at 300 once a rebuild happens.
    deque.extend(0..90_000u32);
    while deque.block_length() != 300 {
        let value = deque.pop_back().unwrap();
        deque.push_back(value);
    }
    assert_eq!(deque.len(), 90_000);
    assert_eq!(deque.at(45_000), Ok(&45_000));
    assert_blocks_in_range(&deque);
}
