//! leafscan HTTP gateway
//!
//! Accepts leaf photo uploads, forwards them to the configured vision
//! provider, and returns the classification engine's verdict as JSON.

pub mod analyze;
pub mod error;
pub mod health_api;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
