//! REST client for the dashboard API.

pub mod client;

pub use client::ApiClient;

/// Feature flag gating CLI API key creation on the app details screen.
pub const CAN_CREATE_CLI_API_KEY: &str = "can_create_cli_api_key";
