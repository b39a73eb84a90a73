//! Manual ordering engine for equipment lists, headings and packages

pub mod engine;
pub mod list;

pub use engine::{
    append_slot, drop_onto, insert_into, is_first, is_last, move_guards, move_item_down, move_item_up,
    next_sort_index, sorted_list, DropPosition, DropTarget, MoveGuards, MoveOutcome, Ordered,
    Reorder, SortedList, SORT_INDEX_STEP,
};
pub use list::{
    ordering_view, plan_append, plan_drop, plan_move, plan_move_into_container, Container, ContainerKind,
    ListRow, MoveDirection, OrderedEntry, OrderedRow, OrderingChanges, OrderingError, Reparent,
    RowKind, RowRef, SortIndexUpdate,
};
