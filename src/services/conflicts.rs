//! Conflict check service

use std::{collections::HashMap, sync::Arc, time::Duration};

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::ConflictsConfig,
    conflict::{detect, ConflictStatus, RemoteBookings},
    error::AppResult,
    models::{Booking, EquipmentList, ReservationWindow},
    repository::ReservationSource,
};

/// Inputs a conflict check result depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct ConflictCheckKey {
    pub equipment_id: i32,
    pub equipment_list_id: i32,
    pub window: Option<ReservationWindow>,
    pub requested_units: i32,
}

impl ConflictCheckKey {
    pub fn new(equipment_id: i32, list: &EquipmentList) -> Self {
        Self {
            equipment_id,
            equipment_list_id: list.id,
            window: list.reservation_window(),
            requested_units: list.number_of_units_of(equipment_id),
        }
    }
}

/// Conflict status tagged with the key it was computed for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictCheck {
    pub key: ConflictCheckKey,
    pub status: ConflictStatus,
}

/// Newest requested key per (equipment, list) pair.
///
/// Completions are matched against it, so a slow answer to an older request
/// never replaces the answer to a newer one.
#[derive(Debug, Default)]
pub struct LatestChecks {
    latest: HashMap<(i32, i32), ConflictCheckKey>,
}

impl LatestChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as the newest request for its pair
    pub fn request(&mut self, key: ConflictCheckKey) {
        self.latest
            .insert((key.equipment_id, key.equipment_list_id), key);
    }

    pub fn is_current(&self, key: &ConflictCheckKey) -> bool {
        self.latest.get(&(key.equipment_id, key.equipment_list_id)) == Some(key)
    }

    /// Keep `check` only while its key is still the newest one.
    ///
    /// An accepted check settles its pair, which stops being tracked.
    pub fn accept(&mut self, check: ConflictCheck) -> Option<ConflictCheck> {
        if !self.is_current(&check.key) {
            return None;
        }
        self.forget(check.key.equipment_id, check.key.equipment_list_id);
        Some(check)
    }

    /// Stop tracking a pair, e.g. when its list is closed
    pub fn forget(&mut self, equipment_id: i32, equipment_list_id: i32) {
        self.latest.remove(&(equipment_id, equipment_list_id));
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

#[derive(Clone)]
pub struct ConflictService {
    source: Arc<dyn ReservationSource>,
    query_timeout: Duration,
}

impl ConflictService {
    pub fn new(source: Arc<dyn ReservationSource>, config: &ConflictsConfig) -> Self {
        Self {
            source,
            query_timeout: Duration::from_millis(config.query_timeout_ms),
        }
    }

    /// Check `list` for conflicts on one equipment.
    ///
    /// `other_lists` are lists of the current editing session; all of them are
    /// validated along with `list`. A failing or slow booking query yields
    /// `ConflictStatus::Unavailable`, not an error.
    pub async fn check(
        &self,
        equipment_id: i32,
        list: &EquipmentList,
        other_lists: &[EquipmentList],
    ) -> AppResult<ConflictCheck> {
        list.validate()?;
        for other in other_lists {
            other.validate()?;
        }

        let equipment = self.source.equipment_by_id(equipment_id).await?;
        let key = ConflictCheckKey::new(equipment_id, list);

        if !equipment.is_tracked() {
            return Ok(ConflictCheck {
                key,
                status: ConflictStatus::NotApplicable,
            });
        }

        let bookings = match key.window {
            Some(window) => self.remote_bookings(equipment_id, window, list.id).await,
            // Unscheduled lists overlap nothing
            None => Ok(Vec::new()),
        };
        let remote = match &bookings {
            Ok(bookings) => RemoteBookings::Loaded(bookings),
            Err(reason) => RemoteBookings::Failed(reason),
        };

        let status = detect(&equipment, list, other_lists, remote);
        if let ConflictStatus::Resolved(report) = &status {
            if report.is_conflict() {
                tracing::info!(
                    "Equipment {} over-reserved by list {}: {}/{} units",
                    equipment_id,
                    list.id,
                    report.max_number_of_units_used,
                    report.inventory_count
                );
            }
        }
        Ok(ConflictCheck { key, status })
    }

    async fn remote_bookings(
        &self,
        equipment_id: i32,
        window: ReservationWindow,
        exclude_list_id: i32,
    ) -> Result<Vec<Booking>, String> {
        let query = self
            .source
            .find_bookings_reserving_equipment(equipment_id, window, exclude_list_id);
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(Ok(bookings)) => Ok(bookings),
            Ok(Err(e)) => {
                tracing::warn!(
                    "Overlapping bookings query failed for equipment {}: {}",
                    equipment_id,
                    e
                );
                Err("Overlapping bookings could not be loaded".to_string())
            }
            Err(_) => {
                tracing::warn!(
                    "Overlapping bookings query for equipment {} timed out after {:?}",
                    equipment_id,
                    self.query_timeout
                );
                Err(format!(
                    "Overlapping bookings query timed out after {} ms",
                    self.query_timeout.as_millis()
                ))
            }
        }
    }
}
