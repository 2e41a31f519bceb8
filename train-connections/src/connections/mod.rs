//! Two-leg connection planning via a transit station.
//!
//! This module answers: "Which train from A to B can I change onto at B to
//! reach C, on which days, and how long will it take?"
//!
//! Every A->B leg is paired with every B->C leg. A pair is a connection when
//! the trains share a running day and the layover at B is between one and
//! four hours, possibly after the clock rolls over midnight.

mod resolve;
mod route_codes;

pub use resolve::{
    Connection, ConnectionKind, MAX_JOURNEY_MINS, MAX_LAYOVER_MINS, MIN_LAYOVER_MINS,
    NoConnectionReason, resolve_connections, within_journey_limit,
};
pub use route_codes::RouteCodes;
