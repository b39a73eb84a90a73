//! Equipment list domain methods on Repository

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{CreateEquipmentListEntry, EquipmentList, EquipmentListEntry, EquipmentListHeading},
    ordering::{ContainerKind, OrderingChanges},
};

#[derive(Debug, Clone, FromRow)]
pub(crate) struct EquipmentListRow {
    pub id: i32,
    pub booking_id: i32,
    pub name: String,
    pub equipment_out_datetime: Option<DateTime<Utc>>,
    pub equipment_in_datetime: Option<DateTime<Utc>>,
    pub usage_start_datetime: Option<DateTime<Utc>>,
    pub usage_end_datetime: Option<DateTime<Utc>>,
    pub number_of_days: Option<i32>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct HeadingRow {
    pub id: i32,
    pub equipment_list_id: i32,
    pub name: String,
    pub sort_index: i32,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct EntryRow {
    pub id: i32,
    /// List the entry belongs to, directly or through its heading
    pub owner_list_id: i32,
    pub equipment_list_heading_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub name: String,
    pub number_of_units: i32,
    pub number_of_hours: i32,
    pub price_per_unit: Option<Decimal>,
    pub price_per_hour: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    pub sort_index: i32,
}

impl From<EntryRow> for EquipmentListEntry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: row.id,
            equipment_id: row.equipment_id,
            name: row.name,
            number_of_units: row.number_of_units,
            number_of_hours: row.number_of_hours,
            price_per_unit: row.price_per_unit,
            price_per_hour: row.price_per_hour,
            discount_percentage: row.discount_percentage,
            sort_index: row.sort_index,
        }
    }
}

const LIST_COLUMNS: &str = "id, booking_id, name, equipment_out_datetime, equipment_in_datetime, \
     usage_start_datetime, usage_end_datetime, number_of_days";

/// Nest headings and entries under their lists, keeping the order of `lists`
pub(crate) fn assemble_lists(
    lists: Vec<EquipmentListRow>,
    headings: Vec<HeadingRow>,
    entries: Vec<EntryRow>,
) -> Vec<EquipmentList> {
    let mut heading_entries: HashMap<i32, Vec<EquipmentListEntry>> = HashMap::new();
    let mut list_entries: HashMap<i32, Vec<EquipmentListEntry>> = HashMap::new();
    for row in entries {
        match row.equipment_list_heading_id {
            Some(heading_id) => heading_entries.entry(heading_id).or_default().push(row.into()),
            None => list_entries.entry(row.owner_list_id).or_default().push(row.into()),
        }
    }

    let mut list_headings: HashMap<i32, Vec<EquipmentListHeading>> = HashMap::new();
    for row in headings {
        list_headings
            .entry(row.equipment_list_id)
            .or_default()
            .push(EquipmentListHeading {
                id: row.id,
                name: row.name,
                sort_index: row.sort_index,
                entries: heading_entries.remove(&row.id).unwrap_or_default(),
            });
    }

    lists
        .into_iter()
        .map(|row| EquipmentList {
            id: row.id,
            booking_id: row.booking_id,
            name: row.name,
            equipment_out_datetime: row.equipment_out_datetime,
            equipment_in_datetime: row.equipment_in_datetime,
            usage_start_datetime: row.usage_start_datetime,
            usage_end_datetime: row.usage_end_datetime,
            number_of_days: row.number_of_days,
            entries: list_entries.remove(&row.id).unwrap_or_default(),
            headings: list_headings.remove(&row.id).unwrap_or_default(),
        })
        .collect()
}

impl Repository {
    /// Get an equipment list with its headings and entries
    pub async fn equipment_list_get_by_id(&self, id: i32) -> AppResult<EquipmentList> {
        let query = format!("SELECT {} FROM equipment_lists WHERE id = $1", LIST_COLUMNS);
        let row = sqlx::query_as::<_, EquipmentListRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment list {} not found", id)))?;

        self.equipment_lists_load(vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Equipment list {} not found", id)))
    }

    /// Get every equipment list of the given bookings
    pub async fn equipment_lists_by_booking_ids(
        &self,
        booking_ids: &[i32],
    ) -> AppResult<Vec<EquipmentList>> {
        let query = format!(
            "SELECT {} FROM equipment_lists WHERE booking_id = ANY($1) ORDER BY booking_id, id",
            LIST_COLUMNS
        );
        let rows = sqlx::query_as::<_, EquipmentListRow>(&query)
            .bind(booking_ids)
            .fetch_all(&self.pool)
            .await?;
        self.equipment_lists_load(rows).await
    }

    async fn equipment_lists_load(
        &self,
        rows: Vec<EquipmentListRow>,
    ) -> AppResult<Vec<EquipmentList>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let list_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

        let headings = sqlx::query_as::<_, HeadingRow>(
            r#"
            SELECT id, equipment_list_id, name, sort_index
            FROM equipment_list_headings
            WHERE equipment_list_id = ANY($1)
            "#,
        )
        .bind(list_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let entries = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT e.id,
                   COALESCE(e.equipment_list_id, h.equipment_list_id) AS owner_list_id,
                   e.equipment_list_heading_id, e.equipment_id, e.name,
                   e.number_of_units, e.number_of_hours,
                   e.price_per_unit, e.price_per_hour, e.discount_percentage,
                   e.sort_index
            FROM equipment_list_entries e
            LEFT JOIN equipment_list_headings h ON h.id = e.equipment_list_heading_id
            WHERE COALESCE(e.equipment_list_id, h.equipment_list_id) = ANY($1)
            "#,
        )
        .bind(list_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble_lists(rows, headings, entries))
    }

    /// Insert an entry into the list or one of its headings
    pub async fn equipment_list_create_entry(
        &self,
        equipment_list_id: i32,
        data: &CreateEquipmentListEntry,
        sort_index: i32,
    ) -> AppResult<EquipmentListEntry> {
        let (list_id, heading_id) = match data.heading_id {
            Some(heading_id) => (None, Some(heading_id)),
            None => (Some(equipment_list_id), None),
        };

        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            INSERT INTO equipment_list_entries
                (equipment_list_id, equipment_list_heading_id, equipment_id, name,
                 number_of_units, number_of_hours, price_per_unit, price_per_hour,
                 discount_percentage, sort_index, crea_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, $12::integer AS owner_list_id, equipment_list_heading_id, equipment_id,
                      name, number_of_units, number_of_hours, price_per_unit, price_per_hour,
                      discount_percentage, sort_index
            "#,
        )
        .bind(list_id)
        .bind(heading_id)
        .bind(data.equipment_id)
        .bind(&data.name)
        .bind(data.number_of_units)
        .bind(data.number_of_hours)
        .bind(data.price_per_unit)
        .bind(data.price_per_hour)
        .bind(data.discount_percentage)
        .bind(sort_index)
        .bind(Utc::now())
        .bind(equipment_list_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Apply an ordering diff atomically
    pub async fn equipment_list_apply_ordering(&self, changes: &OrderingChanges) -> AppResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        if let Some(reparent) = changes.reparent {
            let (list_id, heading_id) = match reparent.to.kind {
                ContainerKind::List => (Some(reparent.to.id), None),
                ContainerKind::Heading => (None, Some(reparent.to.id)),
            };
            let result = sqlx::query(
                r#"
                UPDATE equipment_list_entries
                SET equipment_list_id = $1, equipment_list_heading_id = $2, modif_date = $3
                WHERE id = $4
                "#,
            )
            .bind(list_id)
            .bind(heading_id)
            .bind(now)
            .bind(reparent.entry_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::NotFound(format!(
                    "Equipment list entry {} not found",
                    reparent.entry_id
                )));
            }
        }

        for update in &changes.entries {
            let result = sqlx::query(
                "UPDATE equipment_list_entries SET sort_index = $1, modif_date = $2 WHERE id = $3",
            )
            .bind(update.sort_index)
            .bind(now)
            .bind(update.id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::NotFound(format!(
                    "Equipment list entry {} not found",
                    update.id
                )));
            }
        }

        for update in &changes.headings {
            let result = sqlx::query(
                r#"
                UPDATE equipment_list_headings SET sort_index = $1, modif_date = $2
                WHERE id = $3 AND equipment_list_id = $4
                "#,
            )
            .bind(update.sort_index)
            .bind(now)
            .bind(update.id)
            .bind(changes.equipment_list_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::NotFound(format!(
                    "Equipment list heading {} not found",
                    update.id
                )));
            }
        }

        tx.commit().await?;
        tracing::debug!(
            "Applied {} ordering writes to equipment list {}",
            changes.write_count(),
            changes.equipment_list_id
        );
        Ok(())
    }
}
