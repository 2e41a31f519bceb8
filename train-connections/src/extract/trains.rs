//! Train legs embedded in a train listing.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::TrainLeg;

fn record_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"data-train='(\{[^}]+\})'").unwrap())
}

/// Decode every `data-train='{...}'` record in a listing page.
///
/// Records that aren't valid JSON for a [`TrainLeg`] are logged and
/// skipped. Legs are returned in page order.
pub fn parse_train_legs(html: &str) -> Vec<TrainLeg> {
    let mut legs = Vec::new();

    for (i, caps) in record_pattern().captures_iter(html).enumerate() {
        let json = &caps[1];
        match serde_json::from_str::<TrainLeg>(json) {
            Ok(leg) => legs.push(leg),
            Err(e) => warn!(index = i, error = %e, "skipping undecodable train record"),
        }
    }

    debug!(count = legs.len(), "extracted train legs");
    legs
}
