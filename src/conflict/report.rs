//! Conflict classification and breakdown

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Nobody else uses the equipment and the list fits the inventory
    NoConflict,
    /// The list alone asks for more units than exist
    SelfExceeding,
    /// The list plus overlapping reservations exceed the inventory
    Exceeded,
    /// Others use the equipment at the same time, still within the inventory
    SharedWithinCapacity,
}

impl Classification {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Classification::SelfExceeding | Classification::Exceeded)
    }
}

/// Where an overlapping reservation was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSource {
    /// Open in the current editing session, possibly unsaved
    Local,
    /// Returned by the booking query
    Remote,
}

/// Units of the equipment one overlapping list reserves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConflictContribution {
    pub equipment_list_id: i32,
    pub equipment_list_name: String,
    pub booking_id: i32,
    pub booking_name: Option<String>,
    pub number_of_units: i32,
    pub source: ContributionSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConflictReport {
    pub classification: Classification,
    pub inventory_count: i32,
    pub number_of_units_used_by_this_list: i32,
    pub number_of_units_used_by_others: i32,
    pub max_number_of_units_used: i32,
    pub breakdown: Vec<ConflictContribution>,
}

impl ConflictReport {
    pub fn is_conflict(&self) -> bool {
        self.classification.is_conflict()
    }

    /// Multi-line text suitable for a tooltip
    pub fn summary(&self) -> String {
        let mut out = match self.classification {
            Classification::NoConflict => format!(
                "{} of {} units used, no other reservations",
                self.max_number_of_units_used, self.inventory_count
            ),
            Classification::SelfExceeding => format!(
                "This list alone needs {} units, only {} in inventory",
                self.number_of_units_used_by_this_list, self.inventory_count
            ),
            Classification::Exceeded => format!(
                "{} units needed at the same time, only {} in inventory",
                self.max_number_of_units_used, self.inventory_count
            ),
            Classification::SharedWithinCapacity => format!(
                "{} of {} units used, shared with other reservations",
                self.max_number_of_units_used, self.inventory_count
            ),
        };

        for c in &self.breakdown {
            let booking = c
                .booking_name
                .clone()
                .unwrap_or_else(|| format!("booking {}", c.booking_id));
            out.push_str(&format!(
                "\n- {}: {} ({} units)",
                booking, c.equipment_list_name, c.number_of_units
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_breakdown() {
        let report = ConflictReport {
            classification: Classification::Exceeded,
            inventory_count: 5,
            number_of_units_used_by_this_list: 3,
            number_of_units_used_by_others: 3,
            max_number_of_units_used: 6,
            breakdown: vec![ConflictContribution {
                equipment_list_id: 2,
                equipment_list_name: "Stage".to_string(),
                booking_id: 8,
                booking_name: Some("Summer festival".to_string()),
                number_of_units: 3,
                source: ContributionSource::Remote,
            }],
        };
        assert_eq!(
            report.summary(),
            "6 units needed at the same time, only 5 in inventory\n- Summer festival: Stage (3 units)"
        );
        assert!(report.is_conflict());
    }

    #[test]
    fn test_summary_names_unnamed_bookings_by_id() {
        let contribution = |id: i32, booking_name: Option<&str>| ConflictContribution {
            equipment_list_id: id,
            equipment_list_name: format!("list {}", id),
            booking_id: id * 10,
            booking_name: booking_name.map(str::to_string),
            number_of_units: id,
            source: ContributionSource::Local,
        };
        let report = ConflictReport {
            classification: Classification::SharedWithinCapacity,
            inventory_count: 10,
            number_of_units_used_by_this_list: 2,
            number_of_units_used_by_others: 4,
            max_number_of_units_used: 6,
            breakdown: vec![contribution(1, None), contribution(3, Some("Gala"))],
        };
        let summary = report.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(
            lines,
            vec![
                "6 of 10 units used, shared with other reservations",
                "- booking 10: list 1 (1 units)",
                "- Gala: list 3 (3 units)",
            ]
        );
    }

    #[test]
    fn test_shared_is_not_a_conflict() {
        assert!(!Classification::SharedWithinCapacity.is_conflict());
        assert!(!Classification::NoConflict.is_conflict());
        assert!(Classification::SelfExceeding.is_conflict());
    }
}
