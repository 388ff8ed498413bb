//! Web layer for the nearby-amenities service.
//!
//! Provides HTTP endpoints for resolving the amenities around a property,
//! plus the raw category search and travel-time lookups behind it.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, MapsBackend};
pub use templates::*;
