//! Single-train legs as listed between two stations.

use serde::Deserialize;

use super::days::RunningDays;
use super::time::parse_time;

/// One train's journey between two stations.
///
/// Field names on the wire follow the listing's embedded JSON records
/// (`{"num": "12345", "s": "BL", "st": "08:10", ...}`). Every field is
/// optional on the wire; a missing field decodes as empty. Times and the
/// running-day indicator are kept as listed and interpreted on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TrainLeg {
    /// Train number, e.g. "12907".
    #[serde(rename = "num")]
    pub number: String,

    /// Display name, e.g. "Maharashtra Sampark Kranti".
    pub name: String,

    /// Source station code.
    #[serde(rename = "s")]
    pub source: String,

    /// Departure from the source station, "HH:MM".
    #[serde(rename = "st")]
    pub departs: String,

    /// Destination station code.
    #[serde(rename = "d")]
    pub destination: String,

    /// Arrival at the destination station, "HH:MM".
    #[serde(rename = "dt")]
    pub arrives: String,

    /// Running-day indicator, Sunday first.
    #[serde(rename = "dy")]
    pub running_days: String,

    /// Train category as listed (e.g. "SF", "EXP").
    #[serde(rename = "typ")]
    pub kind: String,

    /// Listed travel time between the two stations.
    #[serde(rename = "tt")]
    pub travel_time: String,

    /// Booking information, if any.
    #[serde(rename = "book")]
    pub booking: String,

    /// Advance reservation period in days.
    #[serde(rename = "arp")]
    pub advance_reservation: i32,
}

impl TrainLeg {
    /// Create a leg with a number and display name; stations and times empty.
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the source station and departure time.
    pub fn departing(mut self, station: impl Into<String>, time: impl Into<String>) -> Self {
        self.source = station.into();
        self.departs = time.into();
        self
    }

    /// Set the destination station and arrival time.
    pub fn arriving(mut self, station: impl Into<String>, time: impl Into<String>) -> Self {
        self.destination = station.into();
        self.arrives = time.into();
        self
    }

    /// Set the running-day indicator.
    pub fn running_on(mut self, indicator: impl Into<String>) -> Self {
        self.running_days = indicator.into();
        self
    }

    /// Departure as minutes since midnight (0 if unparsable).
    pub fn departure_minutes(&self) -> u32 {
        parse_time(&self.departs)
    }

    /// Arrival as minutes since midnight (0 if unparsable).
    pub fn arrival_minutes(&self) -> u32 {
        parse_time(&self.arrives)
    }

    /// Running days, or `None` if the indicator is too short to interpret.
    pub fn days(&self) -> Option<RunningDays> {
        RunningDays::parse(&self.running_days)
    }

    /// Running days for display ("Daily", "Mon,Wed", ...).
    pub fn days_label(&self) -> String {
        RunningDays::lossy(&self.running_days).to_string()
    }

    /// Whether this leg runs from `source` to `destination`.
    pub fn serves(&self, source: &str, destination: &str) -> bool {
        self.source == source && self.destination == destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Weekday;

    #[test]
    fn decode_listing_record() {
        let json = r#"{"typ":"SF","num":"12907","name":"Sampark Kranti","s":"BL","st":"08:10",
            "d":"KYN","dt":"11:45","tt":"3:35","dy":"0101010","book":"Y","arp":120}"#;
        let leg: TrainLeg = serde_json::from_str(json).unwrap();

        assert_eq!(leg.number, "12907");
        assert_eq!(leg.name, "Sampark Kranti");
        assert_eq!(leg.source, "BL");
        assert_eq!(leg.destination, "KYN");
        assert_eq!(leg.departure_minutes(), 490);
        assert_eq!(leg.arrival_minutes(), 705);
        assert_eq!(leg.kind, "SF");
        assert_eq!(leg.travel_time, "3:35");
        assert_eq!(leg.booking, "Y");
        assert_eq!(leg.advance_reservation, 120);

        let days = leg.days().unwrap();
        assert!(days.contains(Weekday::Monday));
        assert!(!days.contains(Weekday::Sunday));
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let leg: TrainLeg = serde_json::from_str(r#"{"num":"1","s":"A","d":"B"}"#).unwrap();
        assert_eq!(leg.number, "1");
        assert_eq!(leg.departs, "");
        assert_eq!(leg.departure_minutes(), 0);
        assert!(leg.days().is_none());
        assert_eq!(leg.advance_reservation, 0);
    }

    #[test]
    fn builder_sets_fields() {
        let leg = TrainLeg::new("101", "Express")
            .departing("BL", "06:00")
            .arriving("KYN", "10:00")
            .running_on("1111111");

        assert!(leg.serves("BL", "KYN"));
        assert!(!leg.serves("KYN", "BL"));
        assert_eq!(leg.days_label(), "Daily");
    }

    #[test]
    fn days_label_tolerates_short_indicator() {
        let leg = TrainLeg::new("1", "x").running_on("011");
        assert!(leg.days().is_none());
        assert_eq!(leg.days_label(), "Mon,Tue");
    }
}
