//! Equipment domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::Equipment,
};

impl Repository {
    /// Get equipment by ID
    pub async fn equipment_get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            "SELECT id, name, inventory_count, crea_date, modif_date FROM equipment WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }
}
