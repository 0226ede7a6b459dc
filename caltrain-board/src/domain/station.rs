//! Station identity and per-station train collections.

use std::fmt;

use super::train::Train;

/// Direction of travel along the corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Northbound,
    Southbound,
}

/// A normalized station identifier.
///
/// The feeds identify *platforms*, not stations: the raw reference is a
/// shared station code with one trailing direction/platform character
/// appended (e.g. `"70011"` and `"70012"` are the two platforms of station
/// `"7001"`). Dropping the final character yields the station-level id.
/// A `StationId` is non-empty by construction.
///
/// # Examples
///
/// ```
/// use caltrain_board::domain::StationId;
///
/// let nb = StationId::from_platform_ref("70011").unwrap();
/// let sb = StationId::from_platform_ref("70012").unwrap();
/// assert_eq!(nb, sb);
/// assert_eq!(nb.as_str(), "7001");
///
/// // Too short to carry both a station code and a platform suffix
/// assert!(StationId::from_platform_ref("7").is_none());
/// assert!(StationId::from_platform_ref("").is_none());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(String);

impl StationId {
    /// Derive the station id from a raw platform reference by dropping its
    /// final character. Returns `None` when nothing would remain.
    pub fn from_platform_ref(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        chars.next_back()?;
        let stem = chars.as_str();
        if stem.is_empty() {
            None
        } else {
            Some(Self(stem.to_string()))
        }
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One physical station with its two departure boards.
///
/// Identity and display name are fixed for the lifetime of the run; the two
/// train collections are cleared and repopulated on every merge cycle. Each
/// collection is keyed by train id and preserves feed insertion order —
/// overwriting an id keeps its original position, so a later stable sort by
/// departure time leaves equal times in feed order.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: String,
    northbound: Vec<Train>,
    southbound: Vec<Train>,
}

impl Station {
    /// Create a station with empty train collections.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            northbound: Vec::new(),
            southbound: Vec::new(),
        }
    }

    /// Returns the normalized station id.
    pub fn id(&self) -> &StationId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the trains for one direction, in feed insertion order.
    pub fn trains(&self, direction: Direction) -> &[Train] {
        match direction {
            Direction::Northbound => &self.northbound,
            Direction::Southbound => &self.southbound,
        }
    }

    /// Insert a train, replacing any existing entry with the same id in
    /// place (last write wins, position preserved).
    pub fn upsert_train(&mut self, direction: Direction, train: Train) {
        let trains = self.trains_mut(direction);
        match trains.iter_mut().find(|t| t.id == train.id) {
            Some(slot) => *slot = train,
            None => trains.push(train),
        }
    }

    /// Look up a train by id within one direction.
    pub fn train_mut(&mut self, direction: Direction, id: &str) -> Option<&mut Train> {
        self.trains_mut(direction).iter_mut().find(|t| t.id == id)
    }

    /// Empty both train collections.
    pub fn clear_trains(&mut self) {
        self.northbound.clear();
        self.southbound.clear();
    }

    fn trains_mut(&mut self, direction: Direction) -> &mut Vec<Train> {
        match direction {
            Direction::Northbound => &mut self.northbound,
            Direction::Southbound => &mut self.southbound,
        }
    }
}
