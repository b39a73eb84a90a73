//! Ordering engine laws over generated collections

use backstage_server::models::{EquipmentListEntry, EquipmentListHeading};
use backstage_server::ordering::{
    append_slot, drop_onto, insert_into, is_first, is_last, move_guards, move_item_down,
    move_item_up, next_sort_index, sorted_list, DropPosition, DropTarget, ListRow, Ordered,
    RowRef,
};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: u32,
    sort_index: i32,
}

impl Ordered for Item {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }

    fn sort_index(&self) -> i32 {
        self.sort_index
    }

    fn set_sort_index(&mut self, sort_index: i32) {
        self.sort_index = sort_index;
    }
}

fn items(indices: &[i32]) -> Vec<Item> {
    indices
        .iter()
        .enumerate()
        .map(|(id, &sort_index)| Item {
            id: id as u32,
            sort_index,
        })
        .collect()
}

fn order<T: Ordered>(items: &[T]) -> Vec<T::Key> {
    sorted_list(items).keys()
}

fn apply<T: Ordered>(items: &[T], updates: &[T]) -> Vec<T> {
    items
        .iter()
        .map(|i| {
            updates
                .iter()
                .find(|u| u.key() == i.key())
                .cloned()
                .unwrap_or_else(|| i.clone())
        })
        .collect()
}

fn entry(id: i32, sort_index: i32) -> EquipmentListEntry {
    EquipmentListEntry {
        id,
        equipment_id: None,
        name: format!("entry {}", id),
        number_of_units: 1,
        number_of_hours: 0,
        price_per_unit: None,
        price_per_hour: None,
        discount_percentage: None,
        sort_index,
    }
}

/// Top-level rows; `true` makes a heading
fn list_rows(rows: &[(bool, i32)]) -> Vec<ListRow> {
    rows.iter()
        .enumerate()
        .map(|(id, &(is_heading, sort_index))| {
            let id = id as i32;
            if is_heading {
                ListRow::Heading(EquipmentListHeading {
                    id,
                    name: format!("heading {}", id),
                    sort_index,
                    entries: Vec::new(),
                })
            } else {
                ListRow::Entry(entry(id, sort_index))
            }
        })
        .collect()
}

/// Mixed entries and headings crowded against `i32::MAX`
fn crowded_rows() -> impl Strategy<Value = Vec<(bool, i32)>> {
    prop::collection::vec(
        (
            any::<bool>(),
            prop_oneof![
                3 => Just(i32::MAX),
                2 => (i32::MAX - 25)..=i32::MAX,
                1 => -20i32..20,
            ],
        ),
        1..10,
    )
}

/// Small indices for frequent ties, plus the extremes of `i32`
fn sort_indices() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(
        prop_oneof![
            6 => -20i32..20,
            1 => Just(i32::MAX),
            1 => Just(i32::MIN),
            1 => (i32::MAX - 3)..=i32::MAX,
        ],
        1..12,
    )
}

fn without<K: Copy + PartialEq>(order: &[K], key: K) -> Vec<K> {
    order.iter().copied().filter(|k| *k != key).collect()
}

proptest! {
    #[test]
    fn prop_sorted_is_total_order(indices in sort_indices()) {
        let items = items(&indices);
        let sorted = sorted_list(&items);
        prop_assert_eq!(sorted.len(), items.len());
        for pair in sorted.to_vec().windows(2) {
            prop_assert!(
                (pair[0].sort_index, pair[0].id) < (pair[1].sort_index, pair[1].id)
            );
        }
        // Restartable and stable under re-sorting
        prop_assert_eq!(sorted.keys(), sorted.iter().map(|i| i.id).collect::<Vec<_>>());
        prop_assert_eq!(order(&sorted.to_vec()), sorted.keys());
    }

    #[test]
    fn prop_next_sort_index_appends(indices in sort_indices()) {
        let items = items(&indices);
        let next = next_sort_index(&items);
        let max = indices.iter().copied().max().unwrap_or_default();
        prop_assert!(indices.iter().all(|&i| i <= next));
        if max <= i32::MAX - 10 {
            prop_assert_eq!(next, max + 10);
        }
    }

    #[test]
    fn prop_guards_match_boundaries(indices in sort_indices()) {
        let items = items(&indices);
        let guards = move_guards(&items);
        prop_assert_eq!(guards.len(), items.len());
        for (key, guard) in guards {
            let item = items.iter().find(|i| i.id == key).unwrap();
            prop_assert_eq!(guard.can_move_up, !is_first(&items, item));
            prop_assert_eq!(guard.can_move_down, !is_last(&items, item));
        }
    }

    #[test]
    fn prop_move_up_then_down_round_trips(indices in sort_indices(), pick in any::<prop::sample::Index>()) {
        let items = items(&indices);
        let item = items[pick.index(items.len())].clone();
        let original = order(&items);

        let up = move_item_up(&items, &item);
        if is_first(&items, &item) {
            prop_assert!(up.is_unchanged());
            return Ok(());
        }
        let moved = apply(&items, &up.into_changes());
        let pos = original.iter().position(|k| *k == item.id).unwrap();
        let mut expected = original.clone();
        expected.swap(pos, pos - 1);
        prop_assert_eq!(order(&moved), expected);

        let moved_item = moved.iter().find(|i| i.id == item.id).unwrap().clone();
        let back = apply(&moved, &move_item_down(&moved, &moved_item).into_changes());
        prop_assert_eq!(order(&back), original);
    }

    #[test]
    fn prop_move_down_at_end_is_noop(indices in sort_indices()) {
        let items = items(&indices);
        let last = sorted_list(&items).last().unwrap().clone();
        prop_assert!(move_item_down(&items, &last).is_unchanged());
    }

    #[test]
    fn prop_drop_places_next_to_target(
        indices in sort_indices(),
        dragged in any::<prop::sample::Index>(),
        target in any::<prop::sample::Index>(),
        after in any::<bool>(),
    ) {
        let items = items(&indices);
        let dragged = items[dragged.index(items.len())].clone();
        let target = items[target.index(items.len())].clone();
        let position = if after { DropPosition::After } else { DropPosition::Before };
        let original = order(&items);

        let reorder = drop_onto(&items, &dragged, &target, position);
        let result = order(&apply(&items, &reorder.updated));

        if dragged.id == target.id {
            prop_assert!(reorder.is_noop());
            return Ok(());
        }
        if !reorder.renumbered {
            prop_assert!(reorder.updated.len() <= 1);
        }
        prop_assert_eq!(without(&result, dragged.id), without(&original, dragged.id));
        let t = result.iter().position(|k| *k == target.id).unwrap();
        let d = result.iter().position(|k| *k == dragged.id).unwrap();
        match position {
            DropPosition::Before => prop_assert_eq!(d + 1, t),
            DropPosition::After => prop_assert_eq!(t + 1, d),
        }
    }

    #[test]
    fn prop_insert_into_keeps_destination_order(
        indices in sort_indices(),
        incoming in any::<i32>(),
        target in proptest::option::of((any::<prop::sample::Index>(), any::<bool>())),
    ) {
        let destination = items(&indices);
        let item = Item { id: 1000, sort_index: incoming };
        let target = target.map(|(index, after)| DropTarget {
            key: destination[index.index(destination.len())].id,
            position: if after { DropPosition::After } else { DropPosition::Before },
        });

        let reorder = insert_into(&destination, &item, target);
        prop_assert!(reorder.updated.iter().any(|i| i.id == item.id));

        let mut combined = destination.clone();
        combined.push(item.clone());
        let result = order(&apply(&combined, &reorder.updated));
        prop_assert_eq!(without(&result, item.id), order(&destination));

        let d = result.iter().position(|k| *k == item.id).unwrap();
        match target {
            None => prop_assert_eq!(d + 1, result.len()),
            Some(t) => {
                let p = result.iter().position(|k| *k == t.key).unwrap();
                match t.position {
                    DropPosition::Before => prop_assert_eq!(d + 1, p),
                    DropPosition::After => prop_assert_eq!(p + 1, d),
                }
            }
        }
    }

    #[test]
    fn prop_append_slot_sorts_last(indices in sort_indices()) {
        let items = items(&indices);
        let (index, room) = append_slot(&items);
        let after = apply(&items, &room);
        prop_assert_eq!(order(&after), order(&items));
        prop_assert!(after.iter().all(|i| i.sort_index < index));
    }

    #[test]
    fn prop_insert_row_into_crowded_list(
        rows in crowded_rows(),
        target in proptest::option::of((any::<prop::sample::Index>(), any::<bool>())),
    ) {
        let destination = list_rows(&rows);
        // Lowest key of all, so a tie on the index would put it first
        let moved = ListRow::Entry(entry(-1, 0));
        let target = target.map(|(index, after)| DropTarget {
            key: destination[index.index(destination.len())].key(),
            position: if after { DropPosition::After } else { DropPosition::Before },
        });

        let reorder = insert_into(&destination, &moved, target);
        let mut combined = destination.clone();
        combined.push(moved.clone());
        let result = order(&apply(&combined, &reorder.updated));
        prop_assert_eq!(without(&result, RowRef::entry(-1)), order(&destination));

        let d = result.iter().position(|k| *k == RowRef::entry(-1)).unwrap();
        match target {
            None => prop_assert_eq!(d + 1, result.len()),
            Some(t) => {
                let p = result.iter().position(|k| *k == t.key).unwrap();
                match t.position {
                    DropPosition::Before => prop_assert_eq!(d + 1, p),
                    DropPosition::After => prop_assert_eq!(p + 1, d),
                }
            }
        }
    }
}

#[test]
fn test_is_first_panics_for_foreign_item() {
    let items = items(&[10, 20]);
    let foreign = Item { id: 42, sort_index: 0 };
    let result = std::panic::catch_unwind(|| is_first(&items, &foreign));
    assert!(result.is_err());
}
