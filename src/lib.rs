//! Convoy dashboard client.
//!
//! Headless state for the dashboard: session storage, the REST client,
//! the active-project context, sidebar navigation and per-screen
//! controllers.

pub mod api;
pub mod config;
pub mod context;
pub mod controllers;
pub mod errors;
pub mod layout;
pub mod models;
pub mod navigation;
pub mod notification;
pub mod router;
pub mod state;
pub mod storage;

pub use errors::{DashboardError, Result};
pub use state::DashboardState;
