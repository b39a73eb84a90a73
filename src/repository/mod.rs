//! Repository layer for database operations

pub mod bookings;
pub mod equipment;
pub mod equipment_lists;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        Booking, CreateEquipmentListEntry, Equipment, EquipmentList, EquipmentListEntry,
        ReservationWindow,
    },
    ordering::OrderingChanges,
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Read access needed by conflict checks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationSource: Send + Sync {
    async fn equipment_by_id(&self, id: i32) -> AppResult<Equipment>;

    /// Bookings holding a list that uses the equipment during `window`.
    ///
    /// The list `exclude_list_id` is never the reason a booking is returned.
    /// Canceled bookings are returned as well; callers filter them.
    async fn find_bookings_reserving_equipment(
        &self,
        equipment_id: i32,
        window: ReservationWindow,
        exclude_list_id: i32,
    ) -> AppResult<Vec<Booking>>;
}

/// Equipment list storage used by ordering operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentListStore: Send + Sync {
    async fn equipment_list(&self, id: i32) -> AppResult<EquipmentList>;

    /// Write every update of `changes` in one transaction
    async fn apply_ordering(&self, changes: &OrderingChanges) -> AppResult<()>;

    async fn create_entry(
        &self,
        equipment_list_id: i32,
        data: &CreateEquipmentListEntry,
        sort_index: i32,
    ) -> AppResult<EquipmentListEntry>;
}

#[async_trait]
impl ReservationSource for Repository {
    async fn equipment_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.equipment_get_by_id(id).await
    }

    async fn find_bookings_reserving_equipment(
        &self,
        equipment_id: i32,
        window: ReservationWindow,
        exclude_list_id: i32,
    ) -> AppResult<Vec<Booking>> {
        self.bookings_reserving_equipment(equipment_id, window, exclude_list_id)
            .await
    }
}

#[async_trait]
impl EquipmentListStore for Repository {
    async fn equipment_list(&self, id: i32) -> AppResult<EquipmentList> {
        self.equipment_list_get_by_id(id).await
    }

    async fn apply_ordering(&self, changes: &OrderingChanges) -> AppResult<()> {
        self.equipment_list_apply_ordering(changes).await
    }

    async fn create_entry(
        &self,
        equipment_list_id: i32,
        data: &CreateEquipmentListEntry,
        sort_index: i32,
    ) -> AppResult<EquipmentListEntry> {
        self.equipment_list_create_entry(equipment_list_id, data, sort_index)
            .await
    }
}
