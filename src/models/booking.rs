//! Booking model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::equipment_list::EquipmentList;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum BookingStatus {
    Draft = 0,
    Inquiry = 1,
    Confirmed = 2,
    Done = 3,
    Canceled = 4,
}

impl From<i16> for BookingStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => BookingStatus::Inquiry,
            2 => BookingStatus::Confirmed,
            3 => BookingStatus::Done,
            4 => BookingStatus::Canceled,
            _ => BookingStatus::Draft,
        }
    }
}

impl From<BookingStatus> for i16 {
    fn from(s: BookingStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Draft => "Draft",
            BookingStatus::Inquiry => "Inquiry",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Done => "Done",
            BookingStatus::Canceled => "Canceled",
        };
        write!(f, "{}", label)
    }
}

/// Booking aggregate with its equipment lists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub name: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub equipment_lists: Vec<EquipmentList>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Booking {
    /// Canceled bookings hold no equipment
    pub fn reserves_equipment(&self) -> bool {
        self.status != BookingStatus::Canceled
    }
}
