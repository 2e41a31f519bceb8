//! Two-leg connection resolution.
//!
//! Pairs every source->transit leg with every transit->destination leg and
//! keeps the pairs where both trains share a running day and the layover at
//! the transit station falls in a 1 to 4 hour window, either on the same day
//! or after rolling over midnight.

use std::fmt;

use tracing::{debug, trace};

use crate::domain::{MINUTES_PER_DAY, RunningDays, TrainLeg, Weekday, format_duration};

/// Shortest acceptable layover at the transit station (minutes).
pub const MIN_LAYOVER_MINS: i64 = 60;

/// Longest acceptable layover at the transit station (minutes).
pub const MAX_LAYOVER_MINS: i64 = 240;

/// Journeys at or above this total time (minutes) are not worth reporting.
pub const MAX_JOURNEY_MINS: i64 = 19 * 60;

const DAY_MINS: i64 = MINUTES_PER_DAY as i64;

/// Why two legs don't make a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoConnectionReason {
    /// The trains never run on the same day.
    NoCommonDays,
    /// The layover is under the minimum, on the same day or the next.
    InsufficientLayover,
    /// Both candidate layovers exceed the maximum.
    LayoverTooLong,
}

impl fmt::Display for NoConnectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoConnectionReason::NoCommonDays => f.write_str("no common running days"),
            NoConnectionReason::InsufficientLayover => f.write_str("insufficient layover"),
            NoConnectionReason::LayoverTooLong => f.write_str("layover too long"),
        }
    }
}

/// Classification of a pair of legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Second train departs the same calendar day the first arrives.
    SameDay,
    /// Second train departs the day after the first arrives.
    NextDay,
    NoConnection(NoConnectionReason),
}

impl ConnectionKind {
    /// Whether this is a usable connection.
    pub fn is_valid(self) -> bool {
        matches!(self, ConnectionKind::SameDay | ConnectionKind::NextDay)
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::SameDay => f.write_str("Same day"),
            ConnectionKind::NextDay => f.write_str("Next day"),
            ConnectionKind::NoConnection(reason) => write!(f, "No connection: {reason}"),
        }
    }
}

/// A pair of legs meeting at a transit station, with its derived timings.
///
/// Built only by [`Connection::analyze`]; every field is computed from the
/// two legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection<'a> {
    first: &'a TrainLeg,
    second: &'a TrainLeg,
    kind: ConnectionKind,
    common_days: RunningDays,
    layover_mins: Option<i64>,
    total_mins: Option<i64>,
}

impl<'a> Connection<'a> {
    /// Classify the pairing of `first` (source->transit) with `second`
    /// (transit->destination).
    ///
    /// # Examples
    ///
    /// ```
    /// use train_connections::connections::{Connection, ConnectionKind};
    /// use train_connections::domain::TrainLeg;
    ///
    /// let first = TrainLeg::new("1", "A").departing("BL", "06:00").arriving("KYN", "10:00").running_on("1111111");
    /// let second = TrainLeg::new("2", "B").departing("KYN", "12:00").arriving("NED", "20:00").running_on("1111111");
    ///
    /// let connection = Connection::analyze(&first, &second);
    /// assert_eq!(connection.kind(), ConnectionKind::SameDay);
    /// assert_eq!(connection.layover_text().as_deref(), Some("2h 0m"));
    /// ```
    pub fn analyze(first: &'a TrainLeg, second: &'a TrainLeg) -> Self {
        let common_days = match (first.days(), second.days()) {
            (Some(a), Some(b)) => a.intersection(b),
            _ => RunningDays::NONE,
        };

        let mut connection = Self {
            first,
            second,
            kind: ConnectionKind::NoConnection(NoConnectionReason::NoCommonDays),
            common_days,
            layover_mins: None,
            total_mins: None,
        };

        if common_days.is_empty() {
            return connection;
        }

        let start = i64::from(first.departure_minutes());
        let arrival = i64::from(first.arrival_minutes());
        let departure = i64::from(second.departure_minutes());
        let end = i64::from(second.arrival_minutes());

        let same_day_layover = departure - arrival;
        let next_day_layover = departure + DAY_MINS - arrival;

        if in_layover_window(same_day_layover) {
            let end = if end < start { end + DAY_MINS } else { end };
            connection.kind = ConnectionKind::SameDay;
            connection.layover_mins = Some(same_day_layover);
            connection.total_mins = Some(end - start);
        } else if in_layover_window(next_day_layover) {
            connection.kind = ConnectionKind::NextDay;
            connection.layover_mins = Some(next_day_layover);
            connection.total_mins = Some(end + DAY_MINS - start);
        } else if same_day_layover < MIN_LAYOVER_MINS || next_day_layover < MIN_LAYOVER_MINS {
            connection.kind = ConnectionKind::NoConnection(NoConnectionReason::InsufficientLayover);
        } else {
            connection.kind = ConnectionKind::NoConnection(NoConnectionReason::LayoverTooLong);
        }

        connection
    }

    /// The source->transit leg.
    pub fn first(&self) -> &'a TrainLeg {
        self.first
    }

    /// The transit->destination leg.
    pub fn second(&self) -> &'a TrainLeg {
        self.second
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    pub fn is_valid(&self) -> bool {
        self.kind.is_valid()
    }

    /// Days on which both trains run.
    pub fn common_days(&self) -> RunningDays {
        self.common_days
    }

    /// Whether both trains run on `day`.
    pub fn runs_on(&self, day: Weekday) -> bool {
        self.common_days.contains(day)
    }

    /// Layover at the transit station, for valid connections.
    pub fn layover_mins(&self) -> Option<i64> {
        self.layover_mins
    }

    /// Door-to-door journey time, for valid connections.
    pub fn total_mins(&self) -> Option<i64> {
        self.total_mins
    }

    pub fn layover_text(&self) -> Option<String> {
        self.layover_mins.map(format_duration)
    }

    pub fn total_text(&self) -> Option<String> {
        self.total_mins.map(format_duration)
    }

    /// Whether the total journey time is under the 19 hour limit.
    pub fn within_journey_limit(&self) -> bool {
        self.total_mins
            .is_some_and(|total| (0..MAX_JOURNEY_MINS).contains(&total))
    }
}

fn in_layover_window(layover: i64) -> bool {
    (MIN_LAYOVER_MINS..=MAX_LAYOVER_MINS).contains(&layover)
}

/// Resolve every valid connection between two sets of legs.
///
/// Considers the full cross product, outer loop over `legs_ab`. Pairs that
/// don't connect are discarded. With a `day` filter, only connections where
/// both trains run on that day are kept. Results are in encounter order.
pub fn resolve_connections<'a>(
    legs_ab: &'a [TrainLeg],
    legs_bc: &'a [TrainLeg],
    day: Option<Weekday>,
) -> Vec<Connection<'a>> {
    let mut connections = Vec::new();
    let mut rejected = 0usize;

    for first in legs_ab {
        for second in legs_bc {
            let connection = Connection::analyze(first, second);

            if !connection.is_valid() {
                trace!(
                    first = %first.number,
                    second = %second.number,
                    kind = %connection.kind(),
                    "legs do not connect"
                );
                rejected += 1;
                continue;
            }

            if let Some(day) = day
                && !connection.runs_on(day)
            {
                continue;
            }

            connections.push(connection);
        }
    }

    debug!(
        pairs = legs_ab.len() * legs_bc.len(),
        found = connections.len(),
        rejected,
        "resolved connections"
    );

    connections
}

/// Keep only connections with a total journey time under 19 hours.
pub fn within_journey_limit(connections: Vec<Connection<'_>>) -> Vec<Connection<'_>> {
    connections
        .into_iter()
        .filter(Connection::within_journey_limit)
        .collect()
}
