//! Station codes of a via route, and partitioning legs by segment.

use crate::domain::TrainLeg;

const DEFAULT_SOURCE: &str = "BL";
const DEFAULT_DESTINATION: &str = "NED";
const DEFAULT_TRANSIT: &str = "KYN";

/// Source, destination and transit station codes of a via search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteCodes {
    pub source: String,
    pub destination: String,
    pub transit: String,
}

impl RouteCodes {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        transit: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            transit: transit.into(),
        }
    }

    /// Extract station codes from a via-listing URL.
    ///
    /// The URL slug looks like `Valsad-BL-to-H-Sahib-Nanded-NED-via-Kalyan-Jn-KYN`:
    /// each code is the last hyphen-separated token of its part. Any part
    /// that can't be found falls back to a default code.
    ///
    /// ```
    /// use train_connections::connections::RouteCodes;
    ///
    /// let codes = RouteCodes::from_url(
    ///     "https://etrain.info/trains/Valsad-BL-to-H-Sahib-Nanded-NED-via-Kalyan-Jn-KYN",
    /// );
    /// assert_eq!(codes, RouteCodes::new("BL", "NED", "KYN"));
    /// ```
    pub fn from_url(url: &str) -> Self {
        let mut codes = Self::new(DEFAULT_SOURCE, DEFAULT_DESTINATION, DEFAULT_TRANSIT);

        let mut parts = url.split("-via-");
        let (Some(route), Some(via)) = (parts.next(), parts.next()) else {
            return codes;
        };

        if let Some(transit) = last_token(via) {
            codes.transit = transit.to_string();
        }

        let Some((from, to)) = route.split_once("-to-") else {
            return codes;
        };

        if let Some(source) = last_token(from) {
            codes.source = source.to_string();
        }
        if let Some(destination) = last_token(to) {
            codes.destination = destination.to_string();
        }

        codes
    }

    /// Partition legs into (source->transit, transit->destination).
    ///
    /// Order is preserved; legs on any other pair of stations are dropped.
    pub fn split_legs(&self, legs: &[TrainLeg]) -> (Vec<TrainLeg>, Vec<TrainLeg>) {
        let mut to_transit = Vec::new();
        let mut from_transit = Vec::new();

        for leg in legs {
            if leg.serves(&self.source, &self.transit) {
                to_transit.push(leg.clone());
            } else if leg.serves(&self.transit, &self.destination) {
                from_transit.push(leg.clone());
            }
        }

        (to_transit, from_transit)
    }
}

/// The text after the last hyphen, if the hyphen is neither first nor last.
fn last_token(s: &str) -> Option<&str> {
    let idx = s.rfind('-')?;
    (idx > 0 && idx < s.len() - 1).then(|| &s[idx + 1..])
}
