//! Train connection planner.
//!
//! Answers two questions about a pair of stations: "which two-train
//! journeys via this transit station actually connect?" and "which transit
//! stations are the best bets?". Listings are fetched over HTTP, cached on
//! disk for a day, and turned into legs and routes for the resolver and the
//! aggregator.

pub mod cache;
pub mod connections;
pub mod domain;
pub mod extract;
pub mod fetch;
pub mod report;
pub mod routes;
