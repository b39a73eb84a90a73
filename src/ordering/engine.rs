//! Manual ordering over `sort_index`-carrying collections
//!
//! Every function here is pure: inputs are borrowed, results are new values
//! holding only the entities whose `sort_index` must be persisted. Boundary
//! no-ops are normal return values. Passing an item that is not part of the
//! given collection is a caller bug and panics.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Distance between consecutive indices handed out by appends and renumbering
pub const SORT_INDEX_STEP: i32 = 10;

/// An entity ordered manually by the user
pub trait Ordered: Clone {
    /// Stable identity, also used to break `sort_index` ties
    type Key: Copy + Ord + std::fmt::Debug;

    fn key(&self) -> Self::Key;
    fn sort_index(&self) -> i32;
    fn set_sort_index(&mut self, sort_index: i32);

    fn with_sort_index(&self, sort_index: i32) -> Self {
        let mut item = self.clone();
        item.set_sort_index(sort_index);
        item
    }
}

fn compare<T: Ordered>(a: &T, b: &T) -> Ordering {
    a.sort_index()
        .cmp(&b.sort_index())
        .then_with(|| a.key().cmp(&b.key()))
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// A collection sorted by `(sort_index, key)`; iterate it as many times as needed
#[derive(Debug)]
pub struct SortedList<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T: Ordered> SortedList<'a, T> {
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, &'a T>> {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&'a T> {
        self.items.first().copied()
    }

    pub fn last(&self) -> Option<&'a T> {
        self.items.last().copied()
    }

    pub fn keys(&self) -> Vec<T::Key> {
        self.items.iter().map(|i| i.key()).collect()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().map(|i| (*i).clone()).collect()
    }

    fn position(&self, key: T::Key) -> usize {
        self.items
            .iter()
            .position(|i| i.key() == key)
            .unwrap_or_else(|| panic!("item {:?} is not part of the collection", key))
    }
}

impl<'s, 'a, T: Ordered> IntoIterator for &'s SortedList<'a, T> {
    type Item = &'a T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sort ascending by `sort_index`, ties broken by key
pub fn sorted_list<T: Ordered>(items: &[T]) -> SortedList<'_, T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| compare(*a, *b));
    SortedList { items: sorted }
}

/// Index that appends after every existing sibling without touching them.
///
/// Saturates at `i32::MAX`; use [`append_slot`] when the new item must sort last.
pub fn next_sort_index<T: Ordered>(items: &[T]) -> i32 {
    items
        .iter()
        .map(Ordered::sort_index)
        .max()
        .map_or(SORT_INDEX_STEP, |max| max.saturating_add(SORT_INDEX_STEP))
}

/// Index strictly above every sibling, plus the siblings renumbered to make room.
///
/// The renumbering is empty unless the level sits within one step of `i32::MAX`.
pub fn append_slot<T: Ordered>(items: &[T]) -> (i32, Vec<T>) {
    let max = items.iter().map(Ordered::sort_index).max();
    match max {
        None => (SORT_INDEX_STEP, Vec::new()),
        Some(max) => match max.checked_add(SORT_INDEX_STEP) {
            Some(index) => (index, Vec::new()),
            None => {
                let desired = sorted_list(items).keys();
                (step_index(items.len()), renumber(items, &desired))
            }
        },
    }
}

pub fn is_first<T: Ordered>(items: &[T], item: &T) -> bool {
    sorted_list(items).position(item.key()) == 0
}

pub fn is_last<T: Ordered>(items: &[T], item: &T) -> bool {
    let sorted = sorted_list(items);
    sorted.position(item.key()) + 1 == sorted.len()
}

/// Whether the move controls of an item should be enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MoveGuards {
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// Guards for every item, in sorted order
pub fn move_guards<T: Ordered>(items: &[T]) -> Vec<(T::Key, MoveGuards)> {
    let sorted = sorted_list(items);
    let last = sorted.len().saturating_sub(1);
    sorted
        .iter()
        .enumerate()
        .map(|(pos, item)| {
            let guards = MoveGuards {
                can_move_up: pos > 0,
                can_move_down: pos < last,
            };
            (item.key(), guards)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// One-step moves
// ---------------------------------------------------------------------------

/// Result of a one-step move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome<T> {
    /// The item and its neighbor exchanged indices
    Swapped { moved: T, neighbor: T },
    /// Tied indices made a swap meaningless; the whole level was renumbered
    Renumbered(Vec<T>),
    /// Already at the boundary
    Unchanged,
}

impl<T> MoveOutcome<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, MoveOutcome::Unchanged)
    }

    /// Entities to persist
    pub fn into_changes(self) -> Vec<T> {
        match self {
            MoveOutcome::Swapped { moved, neighbor } => vec![moved, neighbor],
            MoveOutcome::Renumbered(items) => items,
            MoveOutcome::Unchanged => Vec::new(),
        }
    }
}

pub fn move_item_up<T: Ordered>(items: &[T], item: &T) -> MoveOutcome<T> {
    move_by_one(items, item, true)
}

pub fn move_item_down<T: Ordered>(items: &[T], item: &T) -> MoveOutcome<T> {
    move_by_one(items, item, false)
}

fn move_by_one<T: Ordered>(items: &[T], item: &T, up: bool) -> MoveOutcome<T> {
    let sorted = sorted_list(items);
    let pos = sorted.position(item.key());
    let neighbor_pos = match (up, pos) {
        (true, 0) => return MoveOutcome::Unchanged,
        (true, p) => p - 1,
        (false, p) if p + 1 == sorted.len() => return MoveOutcome::Unchanged,
        (false, p) => p + 1,
    };

    let current = sorted.items[pos];
    let neighbor = sorted.items[neighbor_pos];
    let mut desired = sorted.keys();
    desired.swap(pos, neighbor_pos);

    let moved = current.with_sort_index(neighbor.sort_index());
    let swapped = neighbor.with_sort_index(current.sort_index());
    let candidate = vec![moved.clone(), swapped.clone()];

    if produces_order(items, &candidate, &desired) {
        MoveOutcome::Swapped { moved, neighbor: swapped }
    } else {
        MoveOutcome::Renumbered(renumber(items, &desired))
    }
}

// ---------------------------------------------------------------------------
// Drag and drop
// ---------------------------------------------------------------------------

/// Side of the target row the dragged item lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DropPosition {
    Before,
    After,
}

/// Where a dragged item should land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget<K> {
    pub key: K,
    pub position: DropPosition,
}

/// Entities whose `sort_index` changed after a reorder
#[derive(Debug, Clone, PartialEq)]
pub struct Reorder<T> {
    pub updated: Vec<T>,
    /// Whether siblings had to be renumbered to open a gap
    pub renumbered: bool,
}

impl<T> Reorder<T> {
    fn unchanged() -> Self {
        Self {
            updated: Vec::new(),
            renumbered: false,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.updated.is_empty()
    }
}

/// Drop `dragged` next to `target`.
///
/// Only the dragged item gets a new index, strictly between the target and
/// its neighbor on the drop side. When no integer fits there, the siblings
/// are renumbered with a fresh step sequence first and returned as well.
pub fn drop_onto<T: Ordered>(
    items: &[T],
    dragged: &T,
    target: &T,
    position: DropPosition,
) -> Reorder<T> {
    let sorted = sorted_list(items);
    sorted.position(dragged.key());
    sorted.position(target.key());
    if dragged.key() == target.key() {
        return Reorder::unchanged();
    }

    let siblings: Vec<&T> = sorted
        .iter()
        .filter(|i| i.key() != dragged.key())
        .collect();
    let target_pos = siblings
        .iter()
        .position(|i| i.key() == target.key())
        .unwrap_or_else(|| panic!("item {:?} is not part of the collection", target.key()));
    let insert_at = match position {
        DropPosition::Before => target_pos,
        DropPosition::After => target_pos + 1,
    };

    let mut desired: Vec<T::Key> = siblings.iter().map(|i| i.key()).collect();
    desired.insert(insert_at, dragged.key());
    if desired == sorted.keys() {
        return Reorder::unchanged();
    }

    let bounds = |level: &[&T]| -> (Option<i32>, Option<i32>) {
        let below = insert_at.checked_sub(1).map(|p| level[p].sort_index());
        let above = level.get(insert_at).map(|i| i.sort_index());
        (below, above)
    };

    let (below, above) = bounds(&siblings);
    if let Some(index) = index_between(below, above) {
        let candidate = vec![dragged.with_sort_index(index)];
        if produces_order(items, &candidate, &desired) {
            return Reorder {
                updated: candidate,
                renumbered: false,
            };
        }
    }

    tracing::debug!(
        "No gap next to {:?}, renumbering {} siblings",
        target.key(),
        siblings.len()
    );
    let renumbered: Vec<T> = siblings
        .iter()
        .enumerate()
        .map(|(pos, item)| item.with_sort_index(step_index(pos)))
        .collect();
    let fresh: Vec<&T> = renumbered.iter().collect();
    let (below, above) = bounds(&fresh);
    let index = index_between(below, above).unwrap_or_else(|| step_index(insert_at));

    let mut updated: Vec<T> = renumbered
        .into_iter()
        .zip(siblings.iter())
        .filter(|(new, old)| new.sort_index() != old.sort_index())
        .map(|(new, _)| new)
        .collect();
    updated.push(dragged.with_sort_index(index));

    Reorder {
        updated,
        renumbered: true,
    }
}

/// Insert an item coming from another collection.
///
/// Without a target the item is appended through [`append_slot`]; with one
/// it is placed like a drop. The item is always part of the result since its
/// container changed.
pub fn insert_into<T: Ordered>(
    destination: &[T],
    item: &T,
    target: Option<DropTarget<T::Key>>,
) -> Reorder<T> {
    assert!(
        destination.iter().all(|i| i.key() != item.key()),
        "item {:?} is already part of the destination",
        item.key()
    );

    let (index, room) = append_slot(destination);
    let appended = item.with_sort_index(index);
    let Some(target) = target else {
        let renumbered = !room.is_empty();
        let mut updated = room;
        updated.push(appended);
        return Reorder {
            updated,
            renumbered,
        };
    };

    let mut combined = apply_updates(destination, &room);
    combined.push(appended.clone());
    let target_item = combined
        .iter()
        .find(|i| i.key() == target.key)
        .cloned()
        .unwrap_or_else(|| panic!("item {:?} is not part of the collection", target.key));

    let mut reorder = drop_onto(&combined, &appended, &target_item, target.position);
    if !reorder.updated.iter().any(|i| i.key() == item.key()) {
        reorder.updated.push(appended);
    }
    if !room.is_empty() {
        reorder.renumbered = true;
        for sibling in room {
            if !reorder.updated.iter().any(|i| i.key() == sibling.key()) {
                reorder.updated.push(sibling);
            }
        }
    }
    reorder
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn step_index(pos: usize) -> i32 {
    i32::try_from(pos + 1)
        .ok()
        .and_then(|n| n.checked_mul(SORT_INDEX_STEP))
        .unwrap_or(i32::MAX)
}

/// Integer strictly between two neighbors, `±1` past a lone bound
fn index_between(below: Option<i32>, above: Option<i32>) -> Option<i32> {
    match (below, above) {
        (Some(lo), Some(hi)) => {
            let (lo, hi) = (i64::from(lo), i64::from(hi));
            if hi - lo >= 2 {
                i32::try_from(lo + (hi - lo) / 2).ok()
            } else {
                None
            }
        }
        (Some(lo), None) => lo.checked_add(1),
        (None, Some(hi)) => hi.checked_sub(1),
        (None, None) => Some(SORT_INDEX_STEP),
    }
}

fn apply_updates<T: Ordered>(items: &[T], updates: &[T]) -> Vec<T> {
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

/// Whether applying `updates` to `items` yields exactly the `desired` order
fn produces_order<T: Ordered>(items: &[T], updates: &[T], desired: &[T::Key]) -> bool {
    sorted_list(&apply_updates(items, updates)).keys() == desired
}

/// Fresh step sequence following `desired`; returns only changed items
fn renumber<T: Ordered>(items: &[T], desired: &[T::Key]) -> Vec<T> {
    tracing::debug!("Renumbering {} items", desired.len());
    desired
        .iter()
        .enumerate()
        .filter_map(|(pos, key)| {
            let item = items.iter().find(|i| i.key() == *key)?;
            let index = step_index(pos);
            (item.sort_index() != index).then(|| item.with_sort_index(index))
        })
        .collect()
}
