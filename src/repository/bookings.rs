//! Booking domain methods on Repository

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Repository;
use crate::{
    error::AppResult,
    models::{Booking, BookingStatus, EquipmentList, ReservationWindow},
};

#[derive(Debug, Clone, FromRow)]
struct BookingRow {
    id: i32,
    name: String,
    status: i16,
    crea_date: Option<DateTime<Utc>>,
    modif_date: Option<DateTime<Utc>>,
}

fn attach_lists(rows: Vec<BookingRow>, lists: Vec<EquipmentList>) -> Vec<Booking> {
    let mut by_booking: HashMap<i32, Vec<EquipmentList>> = HashMap::new();
    for list in lists {
        by_booking.entry(list.booking_id).or_default().push(list);
    }
    rows.into_iter()
        .map(|row| Booking {
            id: row.id,
            name: row.name,
            status: BookingStatus::from(row.status),
            equipment_lists: by_booking.remove(&row.id).unwrap_or_default(),
            crea_date: row.crea_date,
            modif_date: row.modif_date,
        })
        .collect()
}

impl Repository {
    /// Bookings with a list other than `exclude_list_id` that uses the
    /// equipment during `window`.
    ///
    /// A list's window is out/in when both are set, usage start/end otherwise.
    /// Bookings come back with all their lists; canceled ones are included.
    pub async fn bookings_reserving_equipment(
        &self,
        equipment_id: i32,
        window: ReservationWindow,
        exclude_list_id: i32,
    ) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT b.id, b.name, b.status, b.crea_date, b.modif_date
            FROM bookings b
            WHERE EXISTS (
                SELECT 1
                FROM equipment_lists l
                LEFT JOIN equipment_list_headings h ON h.equipment_list_id = l.id
                JOIN equipment_list_entries e
                  ON e.equipment_list_id = l.id OR e.equipment_list_heading_id = h.id
                WHERE l.booking_id = b.id
                  AND l.id <> $4
                  AND e.equipment_id = $1
                  AND (
                    (l.equipment_out_datetime IS NOT NULL AND l.equipment_in_datetime IS NOT NULL
                     AND l.equipment_out_datetime <= $3 AND l.equipment_in_datetime >= $2)
                    OR
                    ((l.equipment_out_datetime IS NULL OR l.equipment_in_datetime IS NULL)
                     AND l.usage_start_datetime <= $3 AND l.usage_end_datetime >= $2)
                  )
            )
            ORDER BY b.id
            "#,
        )
        .bind(equipment_id)
        .bind(window.start)
        .bind(window.end)
        .bind(exclude_list_id)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let booking_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let lists = self.equipment_lists_by_booking_ids(&booking_ids).await?;
        tracing::debug!(
            "Equipment {} is reserved by {} other booking(s) between {} and {}",
            equipment_id,
            rows.len(),
            window.start,
            window.end
        );
        Ok(attach_lists(rows, lists))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: i32, booking_id: i32) -> EquipmentList {
        EquipmentList {
            id,
            booking_id,
            name: format!("list {}", id),
            equipment_out_datetime: None,
            equipment_in_datetime: None,
            usage_start_datetime: None,
            usage_end_datetime: None,
            number_of_days: None,
            entries: Vec::new(),
            headings: Vec::new(),
        }
    }

    #[test]
    fn test_attach_lists_groups_by_booking() {
        let rows = vec![
            BookingRow {
                id: 1,
                name: "Festival".to_string(),
                status: 2,
                crea_date: None,
                modif_date: None,
            },
            BookingRow {
                id: 2,
                name: "Gala".to_string(),
                status: 4,
                crea_date: None,
                modif_date: None,
            },
        ];
        let bookings = attach_lists(rows, vec![list(10, 1), list(11, 2), list(12, 1)]);

        assert_eq!(bookings[0].equipment_lists.len(), 2);
        assert_eq!(bookings[0].status, BookingStatus::Confirmed);
        assert_eq!(bookings[1].equipment_lists[0].id, 11);
        assert!(!bookings[1].reserves_equipment());
    }
}
