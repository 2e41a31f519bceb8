//! Route listing aggregation.
//!
//! A transit listing names, for each candidate transit station, how many
//! trains serve each half of the journey and how far it is end to end.
//! Listings can span several pages; the aggregator walks them, then
//! filters, ranks and truncates the combined set.

mod aggregate;
mod listing;
mod rank;

pub use aggregate::{
    AggregateError, AggregateOptions, Aggregation, FULL_PAGE_ROWS, MAX_PAGES, RouteSource,
    aggregate_routes, collect_pages,
};
pub use listing::{ListingSource, needs_pagination, page_url};
pub use rank::{RankOrder, filter_by_distance, rank_routes};
