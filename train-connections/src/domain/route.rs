//! Transit routes from a route listing.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// A named station with its code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Station {
    pub name: String,
    pub code: String,
}

impl Station {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// One row of a transit listing: source -> transit -> destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitRoute {
    pub source: Station,

    /// Number of trains from source to transit.
    pub source_trains: u32,

    pub transit: Station,

    /// Number of trains from transit to destination.
    pub transit_trains: u32,

    pub destination: Station,

    /// Distance as listed, e.g. "754 Kms".
    pub distance: String,

    /// Site-relative link to the connection details.
    pub link: String,
}

impl TransitRoute {
    /// Trains available across both segments.
    pub fn total_trains(&self) -> u32 {
        self.source_trains.saturating_add(self.transit_trains)
    }

    /// Listed distance in kilometres, 0 if unparsable.
    pub fn distance_km(&self) -> u32 {
        parse_distance_km(&self.distance)
    }
}

fn distance_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]+)\s*Kms?").unwrap())
}

/// Extract the kilometre count from a listed distance such as "754 Kms".
///
/// The suffix is case-sensitive and the space optional. Anything else gives
/// 0, so callers can't tell a missing distance from a zero one.
///
/// ```
/// use train_connections::domain::parse_distance_km;
///
/// assert_eq!(parse_distance_km("754 Kms"), 754);
/// assert_eq!(parse_distance_km("500Kms"), 500);
/// assert_eq!(parse_distance_km("invalid distance"), 0);
/// ```
pub fn parse_distance_km(s: &str) -> u32 {
    distance_pattern()
        .captures(s)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}
