//! Equipment reservation conflict detection

use std::collections::HashSet;

use crate::models::{Booking, Equipment, EquipmentList};

use super::report::{Classification, ConflictContribution, ConflictReport, ContributionSource};

/// State of the remote query for overlapping bookings
#[derive(Debug, Clone, Copy)]
pub enum RemoteBookings<'a> {
    /// Query still in flight
    Pending,
    /// Query failed; the reason is shown to the user
    Failed(&'a str),
    Loaded(&'a [Booking]),
}

/// Terminal state of a conflict check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictStatus {
    /// Inventory is untracked, nothing can conflict
    NotApplicable,
    /// Overlap data could not be fetched; never equivalent to "no conflict"
    Unavailable { reason: String },
    /// Overlap data not fetched yet
    Loading,
    Resolved(ConflictReport),
}

impl ConflictStatus {
    pub fn report(&self) -> Option<&ConflictReport> {
        match self {
            ConflictStatus::Resolved(report) => Some(report),
            _ => None,
        }
    }
}

/// Check whether `list` can reserve its quantity of `equipment`.
///
/// `other_lists` are lists known locally, possibly with unsaved edits; they
/// take precedence over any remote list with the same id. Canceled remote
/// bookings are ignored.
pub fn detect(
    equipment: &Equipment,
    list: &EquipmentList,
    other_lists: &[EquipmentList],
    remote: RemoteBookings<'_>,
) -> ConflictStatus {
    let Some(inventory_count) = equipment.inventory_count else {
        return ConflictStatus::NotApplicable;
    };
    match remote {
        RemoteBookings::Pending => ConflictStatus::Loading,
        RemoteBookings::Failed(reason) => ConflictStatus::Unavailable {
            reason: reason.to_string(),
        },
        RemoteBookings::Loaded(bookings) => ConflictStatus::Resolved(classify(
            equipment.id,
            inventory_count,
            list,
            other_lists,
            bookings,
        )),
    }
}

/// Count overlapping usage and classify it against `inventory_count`
pub fn classify(
    equipment_id: i32,
    inventory_count: i32,
    list: &EquipmentList,
    other_lists: &[EquipmentList],
    bookings: &[Booking],
) -> ConflictReport {
    let used_by_this_list = list.number_of_units_of(equipment_id);
    let breakdown = overlapping_usage(equipment_id, list, other_lists, bookings);

    let used_by_others = breakdown
        .iter()
        .map(|c| c.number_of_units)
        .fold(0, i32::saturating_add);
    let max_used = used_by_others.saturating_add(used_by_this_list);

    let classification = if used_by_this_list > inventory_count {
        Classification::SelfExceeding
    } else if used_by_others == 0 {
        Classification::NoConflict
    } else if max_used > inventory_count {
        Classification::Exceeded
    } else {
        Classification::SharedWithinCapacity
    };

    ConflictReport {
        classification,
        inventory_count,
        number_of_units_used_by_this_list: used_by_this_list,
        number_of_units_used_by_others: used_by_others,
        max_number_of_units_used: max_used,
        breakdown,
    }
}

/// Non-zero usage of the equipment by every other list overlapping `list`
fn overlapping_usage(
    equipment_id: i32,
    list: &EquipmentList,
    other_lists: &[EquipmentList],
    bookings: &[Booking],
) -> Vec<ConflictContribution> {
    // Unscheduled lists cannot overlap anything
    let Some(window) = list.reservation_window() else {
        return Vec::new();
    };
    let overlaps = |other: &EquipmentList| {
        other.references(equipment_id)
            && other
                .reservation_window()
                .is_some_and(|w| w.overlaps(&window))
    };

    let mut counted: HashSet<i32> = HashSet::from([list.id]);
    let mut breakdown = Vec::new();

    for other in other_lists {
        if !counted.insert(other.id) || !overlaps(other) {
            continue;
        }
        breakdown.push(ConflictContribution {
            equipment_list_id: other.id,
            equipment_list_name: other.name.clone(),
            booking_id: other.booking_id,
            booking_name: None,
            number_of_units: other.number_of_units_of(equipment_id),
            source: ContributionSource::Local,
        });
    }

    for booking in bookings.iter().filter(|b| b.reserves_equipment()) {
        for other in &booking.equipment_lists {
            if !counted.insert(other.id) || !overlaps(other) {
                continue;
            }
            breakdown.push(ConflictContribution {
                equipment_list_id: other.id,
                equipment_list_name: other.name.clone(),
                booking_id: booking.id,
                booking_name: Some(booking.name.clone()),
                number_of_units: other.number_of_units_of(equipment_id),
                source: ContributionSource::Remote,
            });
        }
    }

    breakdown.retain(|c| c.number_of_units > 0);
    breakdown
}
