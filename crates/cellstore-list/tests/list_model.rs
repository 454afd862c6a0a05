//! Integration test: list operations checked against a `VecDeque` model.

use std::collections::VecDeque;

use cellstore_array::CellStore;
use cellstore_core::CellRange;
use cellstore_list::{CellList, ListError, NodeHandle};
use cellstore_test_utils::{cell, cells, live_i32s, store_of_i32, I32_WIDTH};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    PushFront(i32),
    PushBack(i32),
    PopFront,
    PopBack,
    InsertBefore(usize, i32),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i32..1000).prop_map(Op::PushFront),
        (0i32..1000).prop_map(Op::PushBack),
        Just(Op::PopFront),
        Just(Op::PopBack),
        (0usize..16, 0i32..1000).prop_map(|(at, v)| Op::InsertBefore(at, v)),
        (0usize..16).prop_map(Op::Remove),
    ]
}

fn node(value: i32) -> CellStore {
    store_of_i32(&[Some(value)])
}

fn value_of(store: &CellStore) -> i32 {
    live_i32s(store)[0]
}

fn values(list: &CellList) -> Vec<i32> {
    list.iter().map(|(_, s)| value_of(s)).collect()
}

proptest! {
    #[test]
    fn list_matches_deque(ops in prop::collection::vec(op(), 1..40)) {
        let mut list = CellList::new();
        let mut model: VecDeque<i32> = VecDeque::new();
        let mut removed: Vec<NodeHandle> = Vec::new();

        for op in ops {
            match op {
                Op::PushFront(v) => {
                    list.push_front(node(v));
                    model.push_front(v);
                }
                Op::PushBack(v) => {
                    list.push_back(node(v));
                    model.push_back(v);
                }
                Op::PopFront => match model.pop_front() {
                    Some(v) => {
                        prop_assert_eq!(value_of(&list.pop_front().unwrap()), v);
                    }
                    None => {
                        prop_assert_eq!(list.pop_front().unwrap_err(), ListError::Empty);
                    }
                },
                Op::PopBack => match model.pop_back() {
                    Some(v) => {
                        prop_assert_eq!(value_of(&list.pop_back().unwrap()), v);
                    }
                    None => {
                        prop_assert_eq!(list.pop_back().unwrap_err(), ListError::Empty);
                    }
                },
                Op::InsertBefore(at, v) if !model.is_empty() => {
                    let at = at % model.len();
                    let handle = list.nth(at as isize).unwrap();
                    list.insert_before(handle, node(v)).unwrap();
                    model.insert(at, v);
                }
                Op::Remove(at) if !model.is_empty() => {
                    let at = at % model.len();
                    let handle = list.nth(-(at as isize) - 1).unwrap();
                    list.remove(handle).unwrap();
                    model.remove(model.len() - 1 - at);
                    removed.push(handle);
                }
                _ => {}
            }

            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(values(&list), model.iter().copied().collect::<Vec<_>>());
        }

        for handle in removed {
            let is_stale = matches!(list.get(handle), Err(ListError::StaleHandle { .. }));
            prop_assert!(is_stale);
        }
    }
}

#[test]
fn cursor_walks_and_edits_nodes() {
    let mut list = CellList::new();
    for v in [10, 20, 30] {
        list.push_back_bytes(I32_WIDTH, &cell(v)).unwrap();
    }

    let mut cursor = list.cursor_front().unwrap();
    cursor.move_by(&list, 1).unwrap();
    cursor
        .store_mut(&mut list)
        .unwrap()
        .insert(CellRange::single(0), &cell(15))
        .unwrap();
    assert_eq!(live_i32s(cursor.store(&list).unwrap()), vec![15, 20]);

    cursor.move_by(&list, -1).unwrap();
    let doomed = cursor.handle();
    cursor.move_by(&list, 2).unwrap();
    list.remove(doomed).unwrap();
    assert_eq!(live_i32s(cursor.store(&list).unwrap()), vec![30]);

    assert_eq!(
        cursor.move_by(&list, -3),
        Err(ListError::CursorOutOfRange { offset: -3 })
    );
    assert_eq!(values_of_all(&list), vec![vec![15, 20], vec![30]]);
}

#[test]
fn nodes_carry_independent_stores() {
    let mut list = CellList::new();
    let a = list.push_back_bytes(I32_WIDTH, &cells(&[1, 2, 3])).unwrap();
    let copy = list.get(a).unwrap().retrieve(&[CellRange::new(1, 2)]).unwrap();
    let b = list.push_back(copy);
    list.get_mut(a).unwrap().erase(&[CellRange::single(0)], true).unwrap();
    assert_eq!(live_i32s(list.get(a).unwrap()), vec![2, 3]);
    assert_eq!(live_i32s(list.get(b).unwrap()), vec![2, 3]);
    assert_eq!(list.get(a).unwrap().capacity(), 2);
}

fn values_of_all(list: &CellList) -> Vec<Vec<i32>> {
    list.iter().map(|(_, s)| live_i32s(s)).collect()
}
