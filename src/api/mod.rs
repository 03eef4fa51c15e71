//! HTTP API module for the Severance Settlement Engine.
//!
//! This module provides the REST endpoint that calculates a termination
//! settlement from a JSON request.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
