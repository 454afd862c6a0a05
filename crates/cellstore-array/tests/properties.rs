//! Property tests for the store-level invariants.

use cellstore_array::CellStore;
use cellstore_core::{CellRange, Liveness, StoreConfig, WriteMode};
use cellstore_test_utils::{
    cells, live_before, live_i32s, store_of_i32, store_of_i32_with, SequenceModel, I32_WIDTH,
};
use proptest::prelude::*;

/// Per-slot contents with roughly one free slot in three.
fn slots() -> impl Strategy<Value = Vec<Option<i32>>> {
    prop::collection::vec(prop::option::weighted(0.66, 0i32..1000), 1..24)
}

/// Ascending, non-overlapping `(start, len)` spans built from gaps.
fn disjoint_spans() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..4, 1usize..4), 1..5).prop_map(|parts| {
        let mut next = 0;
        parts
            .into_iter()
            .map(|(gap, len)| {
                let start = next + gap;
                next = start + len;
                (start, len)
            })
            .collect()
    })
}

/// `items` rotated left by `rotate` and optionally reversed.
fn shuffled<T: Clone>(items: &[T], rotate: usize, reverse: bool) -> Vec<T> {
    let mut out = items.to_vec();
    out.rotate_left(rotate % items.len().max(1));
    if reverse {
        out.reverse();
    }
    out
}

fn to_range(start: usize, len: usize) -> CellRange {
    CellRange::new(start as isize, (start + len - 1) as isize)
}

proptest! {
    #[test]
    fn retrieve_returns_what_was_written(
        spans in disjoint_spans(),
        reverse_batch in any::<bool>(),
        seed in any::<i32>(),
    ) {
        let mut spans = spans;
        if reverse_batch {
            spans.reverse();
        }
        let ranges: Vec<CellRange> = spans.iter().map(|&(s, l)| to_range(s, l)).collect();
        let data: Vec<Vec<u8>> = spans
            .iter()
            .enumerate()
            .map(|(i, &(_, len))| {
                let values: Vec<i32> = (0..len as i32)
                    .map(|k| seed.wrapping_add(i as i32 * 16 + k))
                    .collect();
                cells(&values)
            })
            .collect();
        let sources: Vec<&[u8]> = data.iter().map(Vec::as_slice).collect();

        let mut store = CellStore::new(I32_WIDTH).unwrap();
        store.write(&ranges, &sources, WriteMode::Overwrite).unwrap();
        let out = store.retrieve(&ranges).unwrap();
        let expected = data.concat();
        prop_assert_eq!(out.as_bytes(), expected.as_slice());
    }

    #[test]
    fn inserts_match_sequence_model(
        initial in slots(),
        steps in prop::collection::vec((0usize..64, 1usize..4, any::<bool>()), 1..6),
    ) {
        let mut store = store_of_i32(&initial);
        let mut model = SequenceModel::new(initial.iter().flatten().copied().collect());
        let mut next_value = 1000;

        for (at, len, reversed) in steps {
            let capacity = store.capacity();
            let start = at % capacity;
            let end = (start + len - 1).min(capacity - 1);
            let values: Vec<i32> = (next_value..next_value + (end - start + 1) as i32).collect();
            next_value += 10;

            let range = if reversed {
                CellRange::new(end as isize, start as isize)
            } else {
                CellRange::new(start as isize, end as isize)
            };
            let position = live_before(&store, start);
            store.insert(range, &cells(&values)).unwrap();
            model.insert(position, &values, reversed && end > start);

            let live = live_i32s(&store);
            prop_assert_eq!(live.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn batch_insert_equals_successive_inserts(
        initial in slots(),
        spans in disjoint_spans(),
        rotate in 0usize..5,
        reverse in any::<bool>(),
    ) {
        let capacity = initial.len();
        let spans: Vec<(usize, usize)> = spans
            .into_iter()
            .filter(|&(s, l)| s + l <= capacity)
            .collect();
        prop_assume!(!spans.is_empty());

        let ranges: Vec<CellRange> = spans.iter().map(|&(s, l)| to_range(s, l)).collect();
        let data: Vec<Vec<u8>> = spans
            .iter()
            .map(|&(s, l)| cells(&vec![2000 + s as i32; l]))
            .collect();
        let sources: Vec<&[u8]> = data.iter().map(Vec::as_slice).collect();

        let mut batched = store_of_i32(&initial);
        batched
            .write(
                &shuffled(&ranges, rotate, reverse),
                &shuffled(&sources, rotate, reverse),
                WriteMode::Insert,
            )
            .unwrap();

        let mut stepped = store_of_i32(&initial);
        for (range, source) in ranges.iter().zip(&sources) {
            stepped.insert(*range, source).unwrap();
        }
        prop_assert_eq!(batched, stepped);
    }

    #[test]
    fn inserted_batch_retrieves_what_was_written(
        initial in slots(),
        spans in disjoint_spans(),
        rotate in 0usize..5,
        reverse in any::<bool>(),
    ) {
        let capacity = initial.len();
        let spans: Vec<(usize, usize)> = spans
            .into_iter()
            .filter(|&(s, l)| s + l <= capacity)
            .collect();
        prop_assume!(!spans.is_empty());
        let spans = shuffled(&spans, rotate, reverse);

        let ranges: Vec<CellRange> = spans.iter().map(|&(s, l)| to_range(s, l)).collect();
        let data: Vec<Vec<u8>> = spans
            .iter()
            .enumerate()
            .map(|(i, &(_, len))| {
                let values: Vec<i32> = (0..len as i32).map(|k| 3000 + i as i32 * 16 + k).collect();
                cells(&values)
            })
            .collect();
        let sources: Vec<&[u8]> = data.iter().map(Vec::as_slice).collect();

        let mut store = store_of_i32(&initial);
        let live = store.live_len();
        store.write(&ranges, &sources, WriteMode::Insert).unwrap();

        prop_assert_eq!(store.live_len(), live + data.concat().len() / I32_WIDTH);
        let out = store.retrieve(&ranges).unwrap();
        let expected = data.concat();
        prop_assert_eq!(out.as_bytes(), expected.as_slice());
    }

    #[test]
    fn erase_capacity_follows_shrink_flag(
        initial in slots(),
        span in (0usize..24, 1usize..6),
        shrink in any::<bool>(),
    ) {
        let mut store = store_of_i32(&initial);
        let capacity = store.capacity();
        let start = span.0 % capacity;
        let end = (start + span.1 - 1).min(capacity - 1);

        store
            .erase(&[CellRange::new(start as isize, end as isize)], shrink)
            .unwrap();

        let live = store.live_len();
        prop_assert_eq!(live_i32s(&store).len(), live);
        prop_assert_eq!(store.live_tail().map_or(0, |t| t + 1), live);
        if shrink {
            prop_assert_eq!(store.capacity(), live);
        } else {
            prop_assert_eq!(store.capacity(), capacity);
        }
    }

    #[test]
    fn tracked_free_slots_always_hold_the_pattern(
        initial in slots(),
        ops in prop::collection::vec((any::<bool>(), 0usize..32, 1usize..3), 1..8),
    ) {
        let config = StoreConfig::new().with_liveness(Liveness::Tracked);
        let mut store = store_of_i32_with(&initial, config);

        for (insert, at, len) in ops {
            let capacity = store.capacity();
            if capacity == 0 {
                store.push_back(&cells(&[-1])).unwrap();
                continue;
            }
            let start = at % capacity;
            let end = (start + len - 1).min(capacity - 1);
            let range = CellRange::new(start as isize, end as isize);
            if insert {
                store.insert(range, &cells(&vec![-1; end - start + 1])).unwrap();
            } else {
                store.erase(&[range], at % 2 == 0).unwrap();
            }

            let pattern = store.pattern().as_bytes().to_vec();
            for slot in 0..store.capacity() {
                if !store.is_live(slot) {
                    prop_assert_eq!(store.slot(slot).unwrap(), pattern.as_slice());
                }
            }
        }
    }
}
