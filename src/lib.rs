//! LogiTrack - inventory and order tracking API
//!
//! Persists inventory items and customer orders, serves reads through a
//! short-lived read-through cache, and gates sensitive endpoints behind the
//! `Admin` role.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
