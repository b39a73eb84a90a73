//! Ordering of an equipment list's two levels
//!
//! The top level mixes entries and headings in one `sort_index` space; each
//! heading owns a second, independent space for its entries. The planners
//! below turn a user gesture into an [`OrderingChanges`] diff for storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::engine::{
    self, DropPosition, DropTarget, MoveGuards, MoveOutcome, Ordered, Reorder,
};
use crate::models::{EquipmentList, EquipmentListEntry, EquipmentListHeading};

impl Ordered for EquipmentListEntry {
    type Key = i32;

    fn key(&self) -> i32 {
        self.id
    }

    fn sort_index(&self) -> i32 {
        self.sort_index
    }

    fn set_sort_index(&mut self, sort_index: i32) {
        self.sort_index = sort_index;
    }
}

impl Ordered for EquipmentListHeading {
    type Key = i32;

    fn key(&self) -> i32 {
        self.id
    }

    fn sort_index(&self) -> i32 {
        self.sort_index
    }

    fn set_sort_index(&mut self, sort_index: i32) {
        self.sort_index = sort_index;
    }
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Entry,
    Heading,
}

/// Reference to an entry or a heading of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub struct RowRef {
    pub kind: RowKind,
    pub id: i32,
}

impl RowRef {
    pub fn entry(id: i32) -> Self {
        Self { kind: RowKind::Entry, id }
    }

    pub fn heading(id: i32) -> Self {
        Self { kind: RowKind::Heading, id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    List,
    Heading,
}

/// Collection an entry belongs to: the list itself or one of its headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Container {
    pub kind: ContainerKind,
    pub id: i32,
}

impl Container {
    pub fn list(id: i32) -> Self {
        Self { kind: ContainerKind::List, id }
    }

    pub fn heading(id: i32) -> Self {
        Self { kind: ContainerKind::Heading, id }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ContainerKind::List => write!(f, "list {}", self.id),
            ContainerKind::Heading => write!(f, "heading {}", self.id),
        }
    }
}

/// Top-level row of a list
#[derive(Debug, Clone, PartialEq)]
pub enum ListRow {
    Entry(EquipmentListEntry),
    Heading(EquipmentListHeading),
}

impl Ordered for ListRow {
    type Key = RowRef;

    fn key(&self) -> RowRef {
        match self {
            ListRow::Entry(e) => RowRef::entry(e.id),
            ListRow::Heading(h) => RowRef::heading(h.id),
        }
    }

    fn sort_index(&self) -> i32 {
        match self {
            ListRow::Entry(e) => e.sort_index,
            ListRow::Heading(h) => h.sort_index,
        }
    }

    fn set_sort_index(&mut self, sort_index: i32) {
        match self {
            ListRow::Entry(e) => e.sort_index = sort_index,
            ListRow::Heading(h) => h.sort_index = sort_index,
        }
    }
}

// ---------------------------------------------------------------------------
// Diff
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderingError {
    #[error("Entry {0} is not part of this equipment list")]
    UnknownEntry(i32),

    #[error("Heading {0} is not part of this equipment list")]
    UnknownHeading(i32),

    #[error("{0} does not belong to this equipment list")]
    UnknownContainer(Container),

    #[error("Headings cannot be nested inside {0}")]
    NestedHeading(Container),
}

/// New `sort_index` of one record, with the value it replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortIndexUpdate {
    pub id: i32,
    pub sort_index: i32,
    pub previous_sort_index: i32,
}

/// Entry moving to another collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reparent {
    pub entry_id: i32,
    pub from: Container,
    pub to: Container,
}

/// Records to write for one ordering gesture, as a single unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderingChanges {
    pub equipment_list_id: i32,
    pub entries: Vec<SortIndexUpdate>,
    pub headings: Vec<SortIndexUpdate>,
    pub reparent: Option<Reparent>,
}

impl OrderingChanges {
    fn empty(list: &EquipmentList) -> Self {
        Self {
            equipment_list_id: list.id,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.headings.is_empty() && self.reparent.is_none()
    }

    /// Number of records the diff rewrites
    pub fn write_count(&self) -> usize {
        let reparented = self
            .reparent
            .filter(|r| !self.entries.iter().any(|e| e.id == r.entry_id))
            .map_or(0, |_| 1);
        self.entries.len() + self.headings.len() + reparented
    }

    fn push_entry(&mut self, updated: &EquipmentListEntry, previous: i32) {
        self.entries.push(SortIndexUpdate {
            id: updated.id,
            sort_index: updated.sort_index,
            previous_sort_index: previous,
        });
    }

    fn push_heading(&mut self, updated: &EquipmentListHeading, previous: i32) {
        self.headings.push(SortIndexUpdate {
            id: updated.id,
            sort_index: updated.sort_index,
            previous_sort_index: previous,
        });
    }

    fn add_rows(&mut self, before: &[ListRow], updated: &[ListRow]) {
        for row in updated {
            let previous = before
                .iter()
                .find(|r| r.key() == row.key())
                .map_or(row.sort_index(), Ordered::sort_index);
            match row {
                ListRow::Entry(e) => self.push_entry(e, previous),
                ListRow::Heading(h) => self.push_heading(h, previous),
            }
        }
    }

    fn add_entries(&mut self, before: &[EquipmentListEntry], updated: &[EquipmentListEntry]) {
        for entry in updated {
            let previous = before
                .iter()
                .find(|e| e.id == entry.id)
                .map_or(entry.sort_index, |e| e.sort_index);
            self.push_entry(entry, previous);
        }
    }
}

// ---------------------------------------------------------------------------
// List accessors
// ---------------------------------------------------------------------------

impl EquipmentList {
    /// Entries and headings of the top level, unsorted
    pub fn top_level_rows(&self) -> Vec<ListRow> {
        self.entries
            .iter()
            .cloned()
            .map(ListRow::Entry)
            .chain(self.headings.iter().cloned().map(ListRow::Heading))
            .collect()
    }

    pub fn container_of(&self, entry_id: i32) -> Option<Container> {
        if self.entries.iter().any(|e| e.id == entry_id) {
            return Some(Container::list(self.id));
        }
        self.headings
            .iter()
            .find(|h| h.entries.iter().any(|e| e.id == entry_id))
            .map(|h| Container::heading(h.id))
    }

    pub fn find_entry(&self, entry_id: i32) -> Option<&EquipmentListEntry> {
        self.all_entries().find(|e| e.id == entry_id)
    }

    pub fn find_heading(&self, heading_id: i32) -> Option<&EquipmentListHeading> {
        self.headings.iter().find(|h| h.id == heading_id)
    }

    fn heading_entries(&self, container: Container) -> Result<&[EquipmentListEntry], OrderingError> {
        match container.kind {
            ContainerKind::List if container.id == self.id => Ok(&self.entries),
            ContainerKind::Heading => self
                .find_heading(container.id)
                .map(|h| h.entries.as_slice())
                .ok_or(OrderingError::UnknownContainer(container)),
            ContainerKind::List => Err(OrderingError::UnknownContainer(container)),
        }
    }

    /// Container holding a row: headings always live on the list itself
    fn container_of_row(&self, row: RowRef) -> Result<Container, OrderingError> {
        match row.kind {
            RowKind::Entry => self
                .container_of(row.id)
                .ok_or(OrderingError::UnknownEntry(row.id)),
            RowKind::Heading => self
                .find_heading(row.id)
                .map(|_| Container::list(self.id))
                .ok_or(OrderingError::UnknownHeading(row.id)),
        }
    }
}

// ---------------------------------------------------------------------------
// Planners
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

fn step<T: Ordered>(items: &[T], item: &T, direction: MoveDirection) -> MoveOutcome<T> {
    match direction {
        MoveDirection::Up => engine::move_item_up(items, item),
        MoveDirection::Down => engine::move_item_down(items, item),
    }
}

/// Move an entry or heading one position within its own level
pub fn plan_move(
    list: &EquipmentList,
    item: RowRef,
    direction: MoveDirection,
) -> Result<OrderingChanges, OrderingError> {
    let container = list.container_of_row(item)?;
    let mut changes = OrderingChanges::empty(list);

    if container.kind == ContainerKind::Heading {
        let entries = list.heading_entries(container)?;
        let entry = entries
            .iter()
            .find(|e| e.id == item.id)
            .ok_or(OrderingError::UnknownEntry(item.id))?;
        let updated = step(entries, entry, direction).into_changes();
        changes.add_entries(entries, &updated);
        return Ok(changes);
    }

    let rows = list.top_level_rows();
    let row = rows
        .iter()
        .find(|r| r.key() == item)
        .ok_or(OrderingError::UnknownEntry(item.id))?;
    let updated = step(&rows, row, direction).into_changes();
    changes.add_rows(&rows, &updated);
    Ok(changes)
}

/// Drop a row next to another row.
///
/// Dropping an entry next to a row of a different collection re-parents it.
pub fn plan_drop(
    list: &EquipmentList,
    dragged: RowRef,
    target: RowRef,
    position: DropPosition,
) -> Result<OrderingChanges, OrderingError> {
    let from = list.container_of_row(dragged)?;
    let to = list.container_of_row(target)?;

    if from != to {
        if dragged.kind == RowKind::Heading {
            return Err(OrderingError::NestedHeading(to));
        }
        return plan_move_into_container(list, dragged.id, to, Some(DropTarget { key: target, position }));
    }

    let mut changes = OrderingChanges::empty(list);
    if to.kind == ContainerKind::Heading {
        let entries = list.heading_entries(to)?;
        let find = |id: i32| {
            entries
                .iter()
                .find(|e| e.id == id)
                .ok_or(OrderingError::UnknownEntry(id))
        };
        let reorder = engine::drop_onto(entries, find(dragged.id)?, find(target.id)?, position);
        changes.add_entries(entries, &reorder.updated);
        return Ok(changes);
    }

    let rows = list.top_level_rows();
    let find = |key: RowRef| {
        rows.iter()
            .find(|r| r.key() == key)
            .ok_or(OrderingError::UnknownEntry(key.id))
    };
    let reorder = engine::drop_onto(&rows, find(dragged)?, find(target)?, position);
    changes.add_rows(&rows, &reorder.updated);
    Ok(changes)
}

/// Sort index for a new entry at the end of `container`.
///
/// The returned changes renumber the container when it has no room left below
/// `i32::MAX`; they are empty otherwise.
pub fn plan_append(
    list: &EquipmentList,
    container: Container,
) -> Result<(i32, OrderingChanges), OrderingError> {
    let mut changes = OrderingChanges::empty(list);
    match container.kind {
        ContainerKind::List => {
            if container.id != list.id {
                return Err(OrderingError::UnknownContainer(container));
            }
            let rows = list.top_level_rows();
            let (index, room) = engine::append_slot(&rows);
            changes.add_rows(&rows, &room);
            Ok((index, changes))
        }
        ContainerKind::Heading => {
            let entries = list.heading_entries(container)?;
            let (index, room) = engine::append_slot(entries);
            changes.add_entries(entries, &room);
            Ok((index, changes))
        }
    }
}

/// Re-parent an entry into `to`, appended or placed at `target`
pub fn plan_move_into_container(
    list: &EquipmentList,
    entry_id: i32,
    to: Container,
    target: Option<DropTarget<RowRef>>,
) -> Result<OrderingChanges, OrderingError> {
    let from = list
        .container_of(entry_id)
        .ok_or(OrderingError::UnknownEntry(entry_id))?;
    let entry = list
        .find_entry(entry_id)
        .ok_or(OrderingError::UnknownEntry(entry_id))?;

    if from == to {
        return match target {
            Some(t) => plan_drop(list, RowRef::entry(entry_id), t.key, t.position),
            None => Ok(OrderingChanges::empty(list)),
        };
    }

    let mut changes = OrderingChanges::empty(list);
    changes.reparent = Some(Reparent { entry_id, from, to });

    match to.kind {
        ContainerKind::List => {
            if to.id != list.id {
                return Err(OrderingError::UnknownContainer(to));
            }
            let rows = list.top_level_rows();
            if let Some(t) = target {
                if !rows.iter().any(|r| r.key() == t.key) {
                    return Err(OrderingError::UnknownEntry(t.key.id));
                }
            }
            let moved = ListRow::Entry(entry.clone());
            let reorder: Reorder<ListRow> = engine::insert_into(&rows, &moved, target);
            let mut before = rows;
            before.push(moved);
            changes.add_rows(&before, &reorder.updated);
        }
        ContainerKind::Heading => {
            let entries = list.heading_entries(to)?;
            let target = match target {
                Some(t) if t.key.kind == RowKind::Heading => {
                    return Err(OrderingError::NestedHeading(to));
                }
                Some(t) => {
                    if !entries.iter().any(|e| e.id == t.key.id) {
                        return Err(OrderingError::UnknownEntry(t.key.id));
                    }
                    Some(DropTarget {
                        key: t.key.id,
                        position: t.position,
                    })
                }
                None => None,
            };
            let reorder = engine::insert_into(entries, entry, target);
            let mut before = entries.to_vec();
            before.push(entry.clone());
            changes.add_entries(&before, &reorder.updated);
        }
    }

    Ok(changes)
}

// ---------------------------------------------------------------------------
// Read view
// ---------------------------------------------------------------------------

/// Entry as displayed, with its move guards
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderedEntry {
    pub entry: EquipmentListEntry,
    pub guards: MoveGuards,
}

/// Top-level row as displayed; headings carry their sorted entries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderedRow {
    pub row: RowRef,
    pub name: String,
    pub sort_index: i32,
    pub guards: MoveGuards,
    pub entries: Vec<OrderedEntry>,
}

fn ordered_entries(entries: &[EquipmentListEntry]) -> Vec<OrderedEntry> {
    let sorted = engine::sorted_list(entries);
    engine::move_guards(entries)
        .into_iter()
        .zip(sorted.iter())
        .map(|((_, guards), entry)| OrderedEntry {
            entry: entry.clone(),
            guards,
        })
        .collect()
}

/// Sorted projection of a list for display
pub fn ordering_view(list: &EquipmentList) -> Vec<OrderedRow> {
    let rows = list.top_level_rows();
    let sorted = engine::sorted_list(&rows);
    engine::move_guards(&rows)
        .into_iter()
        .zip(sorted.iter())
        .map(|((key, guards), row)| match row {
            ListRow::Entry(e) => OrderedRow {
                row: key,
                name: e.name.clone(),
                sort_index: e.sort_index,
                guards,
                entries: Vec::new(),
            },
            ListRow::Heading(h) => OrderedRow {
                row: key,
                name: h.name.clone(),
                sort_index: h.sort_index,
                guards,
                entries: ordered_entries(&h.entries),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i32, sort_index: i32) -> EquipmentListEntry {
        EquipmentListEntry {
            id,
            equipment_id: Some(100 + id),
            name: format!("entry {}", id),
            number_of_units: 1,
            number_of_hours: 0,
            price_per_unit: None,
            price_per_hour: None,
            discount_percentage: None,
            sort_index,
        }
    }

    fn heading(id: i32, sort_index: i32, entries: Vec<EquipmentListEntry>) -> EquipmentListHeading {
        EquipmentListHeading {
            id,
            name: format!("heading {}", id),
            sort_index,
            entries,
        }
    }

    /// Top level: e1(10) h1(20) e2(30) h2(40); h1 holds e3(10) e4(20)
    fn list() -> EquipmentList {
        EquipmentList {
            id: 9,
            booking_id: 1,
            name: "Main".to_string(),
            equipment_out_datetime: None,
            equipment_in_datetime: None,
            usage_start_datetime: None,
            usage_end_datetime: None,
            number_of_days: Some(2),
            entries: vec![entry(1, 10), entry(2, 30)],
            headings: vec![
                heading(1, 20, vec![entry(3, 10), entry(4, 20)]),
                heading(2, 40, Vec::new()),
            ],
        }
    }

    fn update(id: i32, sort_index: i32, previous_sort_index: i32) -> SortIndexUpdate {
        SortIndexUpdate {
            id,
            sort_index,
            previous_sort_index,
        }
    }

    #[test]
    fn test_move_entry_past_heading_touches_two_records() {
        let changes = plan_move(&list(), RowRef::entry(2), MoveDirection::Up).unwrap();
        assert_eq!(changes.entries, vec![update(2, 20, 30)]);
        assert_eq!(changes.headings, vec![update(1, 30, 20)]);
        assert_eq!(changes.write_count(), 2);
        assert!(changes.reparent.is_none());
    }

    #[test]
    fn test_move_inside_heading_stays_in_heading_space() {
        let changes = plan_move(&list(), RowRef::entry(4), MoveDirection::Up).unwrap();
        assert_eq!(changes.entries, vec![update(4, 10, 20), update(3, 20, 10)]);
        assert!(changes.headings.is_empty());
    }

    #[test]
    fn test_move_at_boundary_is_empty() {
        let changes = plan_move(&list(), RowRef::heading(2), MoveDirection::Down).unwrap();
        assert!(changes.is_empty());
        let changes = plan_move(&list(), RowRef::entry(3), MoveDirection::Up).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_move_unknown_item_is_error() {
        assert_eq!(
            plan_move(&list(), RowRef::entry(77), MoveDirection::Up),
            Err(OrderingError::UnknownEntry(77))
        );
        assert_eq!(
            plan_move(&list(), RowRef::heading(77), MoveDirection::Up),
            Err(OrderingError::UnknownHeading(77))
        );
    }

    #[test]
    fn test_drop_heading_between_rows() {
        let changes =
            plan_drop(&list(), RowRef::heading(2), RowRef::entry(1), DropPosition::After).unwrap();
        assert_eq!(changes.headings, vec![update(2, 15, 40)]);
        assert!(changes.entries.is_empty());
    }

    #[test]
    fn test_drop_entry_into_heading_reparents() {
        let changes =
            plan_drop(&list(), RowRef::entry(1), RowRef::entry(3), DropPosition::After).unwrap();
        assert_eq!(
            changes.reparent,
            Some(Reparent {
                entry_id: 1,
                from: Container::list(9),
                to: Container::heading(1),
            })
        );
        assert_eq!(changes.entries, vec![update(1, 15, 10)]);
    }

    #[test]
    fn test_drop_heading_into_heading_rejected() {
        assert_eq!(
            plan_drop(&list(), RowRef::heading(2), RowRef::entry(3), DropPosition::Before),
            Err(OrderingError::NestedHeading(Container::heading(1)))
        );
    }

    #[test]
    fn test_move_into_heading_appends() {
        let changes = plan_move_into_container(&list(), 2, Container::heading(2), None).unwrap();
        assert_eq!(changes.entries, vec![update(2, 10, 30)]);
        assert_eq!(changes.reparent.map(|r| r.to), Some(Container::heading(2)));
    }

    #[test]
    fn test_move_out_of_heading_appends_to_list() {
        let changes = plan_move_into_container(&list(), 3, Container::list(9), None).unwrap();
        assert_eq!(changes.entries, vec![update(3, 50, 10)]);
        assert_eq!(
            changes.reparent.map(|r| r.from),
            Some(Container::heading(1))
        );
        assert_eq!(changes.write_count(), 1);
    }

    #[test]
    fn test_move_out_of_heading_to_target() {
        let target = DropTarget {
            key: RowRef::heading(1),
            position: DropPosition::Before,
        };
        let changes =
            plan_move_into_container(&list(), 4, Container::list(9), Some(target)).unwrap();
        assert_eq!(changes.entries, vec![update(4, 15, 20)]);
    }

    #[test]
    fn test_move_into_same_container_without_target_is_empty() {
        let changes = plan_move_into_container(&list(), 3, Container::heading(1), None).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_move_into_foreign_container_rejected() {
        assert_eq!(
            plan_move_into_container(&list(), 1, Container::heading(55), None),
            Err(OrderingError::UnknownContainer(Container::heading(55)))
        );
        assert_eq!(
            plan_move_into_container(&list(), 3, Container::list(10), None),
            Err(OrderingError::UnknownContainer(Container::list(10)))
        );
    }

    /// Persist a diff the way the repository does, for assertions on the result
    fn apply(mut list: EquipmentList, changes: &OrderingChanges) -> EquipmentList {
        if let Some(r) = changes.reparent {
            let mut moved = None;
            if let Some(p) = list.entries.iter().position(|e| e.id == r.entry_id) {
                moved = Some(list.entries.remove(p));
            }
            for h in &mut list.headings {
                if let Some(p) = h.entries.iter().position(|e| e.id == r.entry_id) {
                    moved = Some(h.entries.remove(p));
                }
            }
            let moved = moved.unwrap();
            match r.to.kind {
                ContainerKind::List => list.entries.push(moved),
                ContainerKind::Heading => list
                    .headings
                    .iter_mut()
                    .find(|h| h.id == r.to.id)
                    .unwrap()
                    .entries
                    .push(moved),
            }
        }
        for u in &changes.entries {
            let nested = list.headings.iter_mut().flat_map(|h| h.entries.iter_mut());
            for e in list.entries.iter_mut().chain(nested) {
                if e.id == u.id {
                    e.sort_index = u.sort_index;
                }
            }
        }
        for u in &changes.headings {
            for h in list.headings.iter_mut().filter(|h| h.id == u.id) {
                h.sort_index = u.sort_index;
            }
        }
        list
    }

    /// e1(10) then a heading at the top of the index range holding e5
    fn crowded_list() -> EquipmentList {
        let mut list = list();
        list.entries = vec![entry(1, 10)];
        list.headings = vec![heading(1, i32::MAX, vec![entry(5, 10)])];
        list
    }

    #[test]
    fn test_move_out_of_heading_at_ceiling_lands_last() {
        let list = crowded_list();
        let changes = plan_move_into_container(&list, 5, Container::list(9), None).unwrap();
        assert_eq!(changes.headings, vec![update(1, 20, i32::MAX)]);
        assert_eq!(changes.entries, vec![update(5, 30, 10)]);

        let view = ordering_view(&apply(list, &changes));
        let rows: Vec<RowRef> = view.iter().map(|r| r.row).collect();
        assert_eq!(
            rows,
            vec![RowRef::entry(1), RowRef::heading(1), RowRef::entry(5)]
        );
    }

    #[test]
    fn test_plan_append_renumbers_only_at_ceiling() {
        let (index, changes) = plan_append(&list(), Container::list(9)).unwrap();
        assert_eq!(index, 50);
        assert!(changes.is_empty());

        let (index, changes) = plan_append(&list(), Container::heading(1)).unwrap();
        assert_eq!(index, 30);
        assert!(changes.is_empty());

        let (index, changes) = plan_append(&crowded_list(), Container::list(9)).unwrap();
        assert_eq!(index, 30);
        assert_eq!(changes.headings, vec![update(1, 20, i32::MAX)]);
        assert!(changes.entries.is_empty());

        assert_eq!(
            plan_append(&list(), Container::heading(8)),
            Err(OrderingError::UnknownContainer(Container::heading(8)))
        );
    }

    #[test]
    fn test_ordering_view() {
        let view = ordering_view(&list());
        let rows: Vec<RowRef> = view.iter().map(|r| r.row).collect();
        assert_eq!(
            rows,
            vec![RowRef::entry(1), RowRef::heading(1), RowRef::entry(2), RowRef::heading(2)]
        );
        assert!(!view[0].guards.can_move_up);
        assert!(!view[3].guards.can_move_down);
        assert_eq!(view[1].entries.len(), 2);
        assert!(!view[1].entries[0].guards.can_move_up);
        assert!(view[1].entries[0].guards.can_move_down);
    }
}
