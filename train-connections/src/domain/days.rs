//! Days of the week and weekly running-day masks.
//!
//! Listings describe when a train runs with a 7-character indicator string,
//! Sunday first, where `'1'` means the train runs that day and any other
//! character means it doesn't (e.g. `"1010101"` is Sun, Tue, Thu, Sat).

use std::fmt;
use std::str::FromStr;

use super::error::InvalidDay;

/// A day of the week, Sunday first to match running-day indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All days in indicator order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Position of this day in a running-day indicator (Sunday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Three-letter abbreviation, e.g. "Wed".
    pub fn abbreviation(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }

    /// Full English name, e.g. "Wednesday".
    pub fn full_name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Parse a user-supplied day name.
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive.
    /// Accepts the three-letter abbreviation or the full name; nothing else.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_connections::domain::Weekday;
    ///
    /// assert_eq!(Weekday::normalize("MON").unwrap(), Weekday::Monday);
    /// assert_eq!(Weekday::normalize("  tue  ").unwrap(), Weekday::Tuesday);
    /// assert_eq!(Weekday::normalize("Sunday").unwrap().full_name(), "Sunday");
    /// assert!(Weekday::normalize("invalid").is_err());
    /// ```
    pub fn normalize(input: &str) -> Result<Self, InvalidDay> {
        let input = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                day.abbreviation().eq_ignore_ascii_case(&input)
                    || day.full_name().eq_ignore_ascii_case(&input)
            })
            .ok_or_else(|| InvalidDay::new(input))
    }
}

impl FromStr for Weekday {
    type Err = InvalidDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// The set of weekdays a train runs on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RunningDays(u8);

impl RunningDays {
    /// Runs on no day.
    pub const NONE: RunningDays = RunningDays(0);

    /// Runs every day.
    pub const DAILY: RunningDays = RunningDays(0b111_1111);

    /// Parse a running-day indicator.
    ///
    /// Only the first seven characters are read. Returns `None` when the
    /// indicator is shorter than seven characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_connections::domain::{RunningDays, Weekday};
    ///
    /// let days = RunningDays::parse("1010101").unwrap();
    /// assert!(days.contains(Weekday::Sunday));
    /// assert!(!days.contains(Weekday::Monday));
    /// assert!(RunningDays::parse("101").is_none());
    /// ```
    pub fn parse(indicator: &str) -> Option<Self> {
        if indicator.len() < 7 {
            return None;
        }
        Some(Self::lossy(indicator))
    }

    /// Parse a running-day indicator, treating missing positions as not running.
    pub fn lossy(indicator: &str) -> Self {
        indicator
            .bytes()
            .zip(Weekday::ALL)
            .filter(|(b, _)| *b == b'1')
            .map(|(_, day)| day)
            .collect()
    }

    /// Whether the train runs on `day`.
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    /// Add a day to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.index();
    }

    /// Days present in both sets.
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_daily(self) -> bool {
        self == Self::DAILY
    }

    /// Number of days in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the days in the set, Sunday first.
    pub fn days(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |day| self.contains(*day))
    }

    /// Comma-joined abbreviations, e.g. "Sun,Tue,Sat". Empty for no days.
    ///
    /// Unlike `Display`, this never collapses a full week to "Daily".
    pub fn abbreviations(self) -> String {
        self.days()
            .map(Weekday::abbreviation)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<Weekday> for RunningDays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = RunningDays::NONE;
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl fmt::Debug for RunningDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunningDays({})", self.abbreviations())
    }
}

impl fmt::Display for RunningDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_daily() {
            f.write_str("Daily")
        } else {
            f.write_str(&self.abbreviations())
        }
    }
}

/// Common running days of two indicators, as comma-joined abbreviations.
///
/// Returns an empty string when either indicator is shorter than seven
/// characters or the two share no day.
///
/// ```
/// use train_connections::domain::intersect;
///
/// assert_eq!(intersect("1010101", "1011001"), "Sun,Tue,Sat");
/// assert_eq!(intersect("1010101", "0101010"), "");
/// assert_eq!(intersect("101", "1111111"), "");
/// ```
pub fn intersect(a: &str, b: &str) -> String {
    match (RunningDays::parse(a), RunningDays::parse(b)) {
        (Some(a), Some(b)) => a.intersection(b).abbreviations(),
        _ => String::new(),
    }
}
