//! Data models for Backstage

pub mod booking;
pub mod equipment;
pub mod equipment_list;
pub mod window;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus};
pub use equipment::Equipment;
pub use equipment_list::{
    CreateEquipmentListEntry, EquipmentList, EquipmentListEntry, EquipmentListHeading,
};
pub use window::ReservationWindow;
