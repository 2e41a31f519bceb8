//! Record extraction from listing pages.
//!
//! Listing pages are HTML with the data we need either embedded as JSON in
//! `data-train` attributes (train listings) or laid out as table rows
//! (transit listings). Extraction is tolerant: anything that doesn't match
//! the expected shape is skipped, never an error.

mod trains;
mod transit;

pub use trains::parse_train_legs;
pub use transit::parse_transit_routes;
