//! Backstage rental booking server
//!
//! Equipment lists of bookings, their manual ordering, and the detection of
//! equipment reserved beyond its inventory, exposed as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod conflict;
pub mod error;
pub mod models;
pub mod ordering;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
