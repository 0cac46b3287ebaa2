//! Domain types for the rail scheduler.
//!
//! This module contains the core domain model types that represent
//! validated schedule data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod station;
mod time;
mod trip;

pub use error::DomainError;
pub use station::{Station, StationId};
pub use time::{ClockTime, TimeError};
pub use trip::Trip;
