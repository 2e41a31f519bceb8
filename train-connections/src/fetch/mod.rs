//! Content fetching for listing pages.
//!
//! The planner only needs "give me the body behind this URL". The
//! [`ContentFetcher`] trait captures that, so the core can be driven by the
//! live site, by the on-disk cache, or by canned pages in tests.

mod client;
mod error;

pub use client::{ContentFetcher, FetchConfig, HttpFetcher};
pub use error::FetchError;
