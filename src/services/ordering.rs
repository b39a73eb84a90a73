//! Equipment list ordering service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CreateEquipmentListEntry, EquipmentListEntry},
    ordering::{
        ordering_view, plan_append, plan_drop, plan_move, plan_move_into_container, Container,
        DropPosition, DropTarget, MoveDirection, OrderedRow, OrderingChanges, OrderingError,
        RowRef,
    },
    repository::EquipmentListStore,
};

#[derive(Clone)]
pub struct OrderingService {
    store: Arc<dyn EquipmentListStore>,
}

impl OrderingService {
    pub fn new(store: Arc<dyn EquipmentListStore>) -> Self {
        Self { store }
    }

    /// Sorted rows of a list with their move guards
    pub async fn view(&self, equipment_list_id: i32) -> AppResult<Vec<OrderedRow>> {
        let list = self.store.equipment_list(equipment_list_id).await?;
        Ok(ordering_view(&list))
    }

    /// Append a new entry after the last row of its container
    pub async fn append_entry(
        &self,
        equipment_list_id: i32,
        data: &CreateEquipmentListEntry,
    ) -> AppResult<EquipmentListEntry> {
        let list = self.store.equipment_list(equipment_list_id).await?;
        let container = match data.heading_id {
            Some(heading_id) => {
                list.find_heading(heading_id)
                    .ok_or(OrderingError::UnknownHeading(heading_id))?;
                Container::heading(heading_id)
            }
            None => Container::list(list.id),
        };
        let (sort_index, room) = plan_append(&list, container)?;
        self.persist(room).await?;
        self.store
            .create_entry(equipment_list_id, data, sort_index)
            .await
    }

    pub async fn move_item(
        &self,
        equipment_list_id: i32,
        item: RowRef,
        direction: MoveDirection,
    ) -> AppResult<OrderingChanges> {
        let list = self.store.equipment_list(equipment_list_id).await?;
        let changes = plan_move(&list, item, direction)?;
        self.persist(changes).await
    }

    pub async fn drop_item(
        &self,
        equipment_list_id: i32,
        dragged: RowRef,
        target: RowRef,
        position: DropPosition,
    ) -> AppResult<OrderingChanges> {
        let list = self.store.equipment_list(equipment_list_id).await?;
        let changes = plan_drop(&list, dragged, target, position)?;
        self.persist(changes).await
    }

    pub async fn move_into_container(
        &self,
        equipment_list_id: i32,
        entry_id: i32,
        to: Container,
        target: Option<DropTarget<RowRef>>,
    ) -> AppResult<OrderingChanges> {
        let list = self.store.equipment_list(equipment_list_id).await?;
        let changes = plan_move_into_container(&list, entry_id, to, target)?;
        self.persist(changes).await
    }

    async fn persist(&self, changes: OrderingChanges) -> AppResult<OrderingChanges> {
        if changes.is_empty() {
            return Ok(changes);
        }
        self.store.apply_ordering(&changes).await?;
        tracing::info!(
            "Reordered equipment list {} ({} records)",
            changes.equipment_list_id,
            changes.write_count()
        );
        Ok(changes)
    }
}
