//! Domain types for train connection planning.
//!
//! Legs and routes arrive from listings as loosely formatted text. The types
//! here keep the listed text and interpret it on demand, so nothing is lost
//! when a field doesn't parse.

mod days;
mod error;
mod leg;
mod route;
mod time;

pub use days::{RunningDays, Weekday, intersect};
pub use error::InvalidDay;
pub use leg::TrainLeg;
pub use route::{Station, TransitRoute, parse_distance_km};
pub use time::{MINUTES_PER_DAY, format_duration, is_under_19_hours, parse_time};
