//! Equipment list model (lists, entries, headings)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::window::ReservationWindow;
use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// EquipmentListEntry
// ---------------------------------------------------------------------------

fn default_number_of_units() -> i32 {
    1
}

/// A row of an equipment list, either directly on the list or inside a heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentListEntry {
    /// Negative ids are entries created client-side and not yet persisted
    pub id: i32,
    /// Referenced catalog equipment; `None` for free-text rows
    pub equipment_id: Option<i32>,
    pub name: String,
    #[serde(default = "default_number_of_units")]
    pub number_of_units: i32,
    #[serde(default)]
    pub number_of_hours: i32,
    #[schema(value_type = Option<String>)]
    pub price_per_unit: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub price_per_hour: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub sort_index: i32,
}

impl EquipmentListEntry {
    pub fn is_unsaved(&self) -> bool {
        self.id < 0
    }

    /// Units this entry reserves of the given equipment
    pub fn units_of(&self, equipment_id: i32) -> i32 {
        if self.equipment_id == Some(equipment_id) {
            self.number_of_units.max(0)
        } else {
            0
        }
    }
}

/// Create entry request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEquipmentListEntry {
    /// Heading to append into; the list itself when absent
    pub heading_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub name: String,
    #[serde(default = "default_number_of_units")]
    pub number_of_units: i32,
    #[serde(default)]
    pub number_of_hours: i32,
    #[schema(value_type = Option<String>)]
    pub price_per_unit: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub price_per_hour: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub discount_percentage: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// EquipmentListHeading
// ---------------------------------------------------------------------------

/// Labeled grouping row owning its own ordered entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentListHeading {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub sort_index: i32,
    #[serde(default)]
    pub entries: Vec<EquipmentListEntry>,
}

// ---------------------------------------------------------------------------
// EquipmentList
// ---------------------------------------------------------------------------

/// Equipment list belonging to one booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentList {
    pub id: i32,
    pub booking_id: i32,
    pub name: String,
    pub equipment_out_datetime: Option<DateTime<Utc>>,
    pub equipment_in_datetime: Option<DateTime<Utc>>,
    pub usage_start_datetime: Option<DateTime<Utc>>,
    pub usage_end_datetime: Option<DateTime<Utc>>,
    /// Day count used instead of absolute dates
    pub number_of_days: Option<i32>,
    #[serde(default)]
    pub entries: Vec<EquipmentListEntry>,
    #[serde(default)]
    pub headings: Vec<EquipmentListHeading>,
}

impl EquipmentList {
    pub fn has_explicit_dates(&self) -> bool {
        self.equipment_out_datetime.is_some()
            || self.equipment_in_datetime.is_some()
            || self.usage_start_datetime.is_some()
            || self.usage_end_datetime.is_some()
    }

    /// Window used for conflict accounting.
    ///
    /// Out/in datetimes win when both are set, then usage start/end. A list
    /// with neither complete pair is unscheduled and returns `None`.
    pub fn reservation_window(&self) -> Option<ReservationWindow> {
        ReservationWindow::from_pair(self.equipment_out_datetime, self.equipment_in_datetime).or_else(
            || ReservationWindow::from_pair(self.usage_start_datetime, self.usage_end_datetime),
        )
    }

    /// Check the date-mode invariants
    pub fn validate(&self) -> AppResult<()> {
        if let (Some(out), Some(back)) = (self.equipment_out_datetime, self.equipment_in_datetime) {
            if out >= back {
                return Err(AppError::Validation(format!(
                    "Equipment list {}: equipment out must be before equipment in",
                    self.id
                )));
            }
        }
        if let (Some(start), Some(end)) = (self.usage_start_datetime, self.usage_end_datetime) {
            if start >= end {
                return Err(AppError::Validation(format!(
                    "Equipment list {}: usage start must be before usage end",
                    self.id
                )));
            }
        }
        if self.has_explicit_dates() && self.number_of_days.is_some() {
            return Err(AppError::Validation(format!(
                "Equipment list {}: cannot have both dates and a number of days",
                self.id
            )));
        }
        if matches!(self.number_of_days, Some(days) if days < 0) {
            return Err(AppError::Validation(format!(
                "Equipment list {}: number of days cannot be negative",
                self.id
            )));
        }
        if let Some(entry) = self.all_entries().find(|e| e.number_of_units < 0) {
            return Err(AppError::Validation(format!(
                "Equipment list {}: entry {} has a negative number of units",
                self.id, entry.id
            )));
        }
        Ok(())
    }

    /// Switch to explicit dates, clearing the day count
    pub fn set_dates(
        &mut self,
        equipment_out: Option<DateTime<Utc>>,
        equipment_in: Option<DateTime<Utc>>,
        usage_start: Option<DateTime<Utc>>,
        usage_end: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut next = self.clone();
        next.equipment_out_datetime = equipment_out;
        next.equipment_in_datetime = equipment_in;
        next.usage_start_datetime = usage_start;
        next.usage_end_datetime = usage_end;
        next.number_of_days = None;
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Switch to a pure day count, clearing every date
    pub fn set_number_of_days(&mut self, days: i32) -> AppResult<()> {
        if days < 0 {
            return Err(AppError::Validation("Number of days cannot be negative".to_string()));
        }
        self.equipment_out_datetime = None;
        self.equipment_in_datetime = None;
        self.usage_start_datetime = None;
        self.usage_end_datetime = None;
        self.number_of_days = Some(days);
        Ok(())
    }

    /// Every entry of the list, direct ones first, then heading by heading
    pub fn all_entries(&self) -> impl Iterator<Item = &EquipmentListEntry> {
        self.entries
            .iter()
            .chain(self.headings.iter().flat_map(|h| h.entries.iter()))
    }

    pub fn references(&self, equipment_id: i32) -> bool {
        self.all_entries().any(|e| e.equipment_id == Some(equipment_id))
    }

    /// Units of the equipment requested by this list, summed across headings
    pub fn number_of_units_of(&self, equipment_id: i32) -> i32 {
        self.all_entries()
            .map(|e| e.units_of(equipment_id))
            .fold(0, i32::saturating_add)
    }
}
