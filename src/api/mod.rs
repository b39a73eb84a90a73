//! API handlers for Backstage REST endpoints

pub mod conflicts;
pub mod equipment_lists;
pub mod health;
pub mod openapi;
