//! Station identifier and station record types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 1-based station identifier.
///
/// Ids are only meaningful relative to a loaded schedule: a schedule of `N`
/// stations accepts ids `1..=N`. Range checks happen where the station count
/// is known (`StationTable`, `Timetable`), not here.
///
/// # Examples
///
/// ```
/// use rail_scheduler::domain::StationId;
///
/// let id = StationId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.index(), Some(2));
///
/// // Zero is never a valid id
/// assert_eq!(StationId::new(0).index(), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(u32);

impl StationId {
    /// Wrap a raw id.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Build the id for a 0-based slot.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Returns the raw 1-based id.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns the 0-based slot, or `None` for id 0.
    pub fn index(&self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    /// Returns the 0-based slot if this id is valid for `count` stations.
    pub fn index_within(&self, count: usize) -> Option<usize> {
        self.index().filter(|&idx| idx < count)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station in a loaded schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Station id, unique within the schedule
    pub id: StationId,
    /// Name as written in the schedule data
    pub name: String,
}

impl Station {
    /// Create a new station.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Name for display, with data-file underscores rendered as spaces.
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }

    /// Whether `query` names this station.
    ///
    /// Comparison is ASCII case-insensitive, and `_` and space are treated
    /// as the same character so `union station` matches `Union_Station`.
    pub fn matches_name(&self, query: &str) -> bool {
        let normalize = |c: char| {
            if c == '_' {
                ' '
            } else {
                c.to_ascii_lowercase()
            }
        };
        let query = query.trim();
        self.name.chars().count() == query.chars().count()
            && self
                .name
                .chars()
                .zip(query.chars())
                .all(|(a, b)| normalize(a) == normalize(b))
    }
}
