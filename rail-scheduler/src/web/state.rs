//! Application state for the web layer.

use std::sync::Arc;

use crate::timetable::Timetable;

/// Shared application state.
///
/// The timetable is built before the server starts and never changes, so
/// handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Loaded schedule and routing tables
    pub timetable: Arc<Timetable>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(timetable: Timetable) -> Self {
        Self {
            timetable: Arc::new(timetable),
        }
    }
}
