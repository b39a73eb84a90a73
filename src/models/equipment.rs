//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Equipment catalog record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Display name
    pub name: String,
    /// Units owned; `None` means untracked, which disables conflict checking
    pub inventory_count: Option<i32>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Equipment {
    pub fn is_tracked(&self) -> bool {
        self.inventory_count.is_some()
    }
}
