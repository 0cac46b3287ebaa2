//! Web layer for the rail scheduler.
//!
//! Provides HTTP endpoints for browsing the schedule and planning routes.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
