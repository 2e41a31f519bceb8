//! Multi-page route aggregation.

use tracing::{debug, info, warn};

use crate::domain::TransitRoute;
use crate::fetch::FetchError;

use super::listing::needs_pagination;
use super::rank::{RankOrder, filter_by_distance, rank_routes};

/// A page with fewer rows than this is the last one.
pub const FULL_PAGE_ROWS: usize = 10;

/// Never fetch more than this many pages.
pub const MAX_PAGES: u32 = 20;

/// Error from route aggregation.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// A page could not be fetched. Routes from earlier pages are kept.
    #[error("failed to fetch page {page}: {source}")]
    Fetch {
        page: u32,
        source: FetchError,
        partial: Vec<TransitRoute>,
    },
}

impl AggregateError {
    /// Routes collected before the failure.
    pub fn partial(&self) -> &[TransitRoute] {
        match self {
            AggregateError::Fetch { partial, .. } => partial,
        }
    }
}

/// Trait for providing listing pages.
///
/// This abstraction allows the aggregator to be tested with canned pages.
// Callers await on one task; the futures need not be Send.
#[allow(async_fn_in_trait)]
pub trait RouteSource {
    /// Fetch the listing as a single, unpaginated page.
    async fn fetch_listing(&self) -> Result<Vec<TransitRoute>, FetchError>;

    /// Fetch one page of the listing. Pages start at 1.
    async fn fetch_page(&self, page: u32) -> Result<Vec<TransitRoute>, FetchError>;
}

/// Options for an aggregation.
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    /// Walk through pages instead of fetching the listing once.
    pub paginate: bool,

    /// Drop routes longer than this. `None` or 0 disables the filter.
    pub max_distance_km: Option<u32>,

    /// Keep at most this many routes. `None` or 0 keeps all.
    pub limit: Option<usize>,
}

impl AggregateOptions {
    /// Options for a listing URL, paginating when the URL calls for it.
    pub fn for_url(url: &str) -> Self {
        Self {
            paginate: needs_pagination(url),
            ..Self::default()
        }
    }

    /// Set the distance ceiling; 0 means none.
    pub fn with_max_distance(mut self, km: u32) -> Self {
        self.max_distance_km = (km > 0).then_some(km);
        self
    }

    /// Set the result limit; 0 means unlimited.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    fn distance_ceiling(&self) -> Option<u32> {
        self.max_distance_km.filter(|&km| km > 0)
    }

    fn result_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }
}

/// Result of an aggregation.
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Ranked routes, best first, truncated to the limit.
    pub routes: Vec<TransitRoute>,

    /// Order the routes were ranked by.
    pub order: RankOrder,

    /// Number of pages requested, including a trailing empty one.
    pub pages_fetched: u32,

    /// Routes found before any filtering.
    pub total_before_filter: usize,

    /// Routes passing the distance filter, before truncation.
    pub matched: usize,
}

/// Fetch pages 1, 2, ... until the listing runs out.
///
/// Stops after an empty page, after a page with fewer than
/// [`FULL_PAGE_ROWS`] rows, or after [`MAX_PAGES`] pages. Returns the routes
/// in page order and the number of pages requested.
pub async fn collect_pages<S: RouteSource>(
    source: &S,
) -> Result<(Vec<TransitRoute>, u32), AggregateError> {
    let mut routes = Vec::new();
    let mut page = 1;

    loop {
        let rows = match source.fetch_page(page).await {
            Ok(rows) => rows,
            Err(e) => {
                return Err(AggregateError::Fetch {
                    page,
                    source: e,
                    partial: routes,
                });
            }
        };

        if rows.is_empty() {
            debug!(page, "empty page, end of listing");
            break;
        }

        let count = rows.len();
        routes.extend(rows);
        debug!(page, count, total = routes.len(), "fetched page");

        if count < FULL_PAGE_ROWS {
            debug!(page, count, "short page, end of listing");
            break;
        }

        if page >= MAX_PAGES {
            warn!(pages = MAX_PAGES, "page limit reached, listing may be incomplete");
            break;
        }

        page += 1;
    }

    Ok((routes, page))
}

/// Gather, filter, rank and truncate the routes of a listing.
pub async fn aggregate_routes<S: RouteSource>(
    source: &S,
    options: &AggregateOptions,
) -> Result<Aggregation, AggregateError> {
    let (routes, pages_fetched) = if options.paginate {
        collect_pages(source).await?
    } else {
        let routes = source
            .fetch_listing()
            .await
            .map_err(|source| AggregateError::Fetch {
                page: 1,
                source,
                partial: Vec::new(),
            })?;
        (routes, 1)
    };

    let total_before_filter = routes.len();
    let ceiling = options.distance_ceiling();

    let routes = match ceiling {
        Some(km) => {
            let kept = filter_by_distance(routes, km);
            debug!(max_km = km, kept = kept.len(), "applied distance filter");
            kept
        }
        None => routes,
    };
    let matched = routes.len();

    let order = RankOrder::select(options.paginate, ceiling.is_some());
    let mut routes = rank_routes(routes, order);

    if let Some(limit) = options.result_limit() {
        routes.truncate(limit);
    }

    info!(
        pages = pages_fetched,
        total = total_before_filter,
        matched,
        shown = routes.len(),
        order = %order,
        "aggregated routes"
    );

    Ok(Aggregation {
        routes,
        order,
        pages_fetched,
        total_before_filter,
        matched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::route;
    use std::sync::Mutex;

    /// Mock source serving canned pages.
    struct MockSource {
        listing: Vec<TransitRoute>,
        pages: Vec<Vec<TransitRoute>>,
        fail_on: Option<u32>,
        requested: Mutex<Vec<u32>>,
    }

    impl MockSource {
        fn paged(sizes: &[usize]) -> Self {
            let pages = sizes
                .iter()
                .enumerate()
                .map(|(p, &n)| {
                    (0..n)
                        .map(|i| route(&format!("P{p}R{i}"), 1, 1, &format!("{} Kms", 100 + p * 10 + i)))
                        .collect()
                })
                .collect();
            Self {
                listing: Vec::new(),
                pages,
                fail_on: None,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn single(listing: Vec<TransitRoute>) -> Self {
            Self {
                listing,
                pages: Vec::new(),
                fail_on: None,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.fail_on = Some(page);
            self
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl RouteSource for MockSource {
        async fn fetch_listing(&self) -> Result<Vec<TransitRoute>, FetchError> {
            Ok(self.listing.clone())
        }

        async fn fetch_page(&self, page: u32) -> Result<Vec<TransitRoute>, FetchError> {
            self.requested.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err(FetchError::Status {
                    url: format!("https://example.test/transit/A-B?page={page}"),
                    status: 503,
                });
            }
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn paginated() -> AggregateOptions {
        AggregateOptions {
            paginate: true,
            ..AggregateOptions::default()
        }
    }

    #[tokio::test]
    async fn stops_after_short_page() {
        let source = MockSource::paged(&[10, 10, 3, 10]);
        let (routes, pages) = collect_pages(&source).await.unwrap();

        assert_eq!(routes.len(), 23);
        assert_eq!(pages, 3);
        assert_eq!(source.requested(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn stops_after_empty_page() {
        let source = MockSource::paged(&[10, 10]);
        let (routes, pages) = collect_pages(&source).await.unwrap();

        assert_eq!(routes.len(), 20);
        assert_eq!(pages, 3);
    }

    #[tokio::test]
    async fn empty_first_page() {
        let source = MockSource::paged(&[]);
        let (routes, pages) = collect_pages(&source).await.unwrap();

        assert!(routes.is_empty());
        assert_eq!(pages, 1);
    }

    #[tokio::test]
    async fn stops_at_page_limit() {
        let source = MockSource::paged(&[10; 25]);
        let (routes, pages) = collect_pages(&source).await.unwrap();

        assert_eq!(routes.len(), 200);
        assert_eq!(pages, MAX_PAGES);
        assert_eq!(source.requested().last(), Some(&MAX_PAGES));
    }

    #[tokio::test]
    async fn keeps_page_order() {
        let source = MockSource::paged(&[10, 2]);
        let (routes, _) = collect_pages(&source).await.unwrap();

        assert_eq!(routes[0].transit.code, "P0R0");
        assert_eq!(routes[9].transit.code, "P0R9");
        assert_eq!(routes[10].transit.code, "P1R0");
    }

    #[tokio::test]
    async fn failure_carries_partial_routes() {
        let source = MockSource::paged(&[10, 10, 10]).failing_on(3);
        let err = collect_pages(&source).await.unwrap_err();

        let AggregateError::Fetch { page, partial, .. } = &err;
        assert_eq!(*page, 3);
        assert_eq!(partial.len(), 20);
        assert_eq!(err.partial().len(), 20);
        assert!(err.to_string().starts_with("failed to fetch page 3"));
    }

    #[tokio::test]
    async fn failure_on_first_page_has_no_partial() {
        let source = MockSource::paged(&[10]).failing_on(1);
        let err = aggregate_routes(&source, &paginated()).await.unwrap_err();
        assert!(err.partial().is_empty());
    }

    #[tokio::test]
    async fn paginated_aggregation_sorts_by_distance() {
        let mut source = MockSource::paged(&[0]);
        source.pages = vec![vec![
            route("A", 9, 9, "900 Kms"),
            route("B", 1, 1, "300 Kms"),
            route("C", 5, 5, "600 Kms"),
        ]];

        let result = aggregate_routes(&source, &paginated()).await.unwrap();
        let codes: Vec<_> = result.routes.iter().map(|r| r.transit.code.as_str()).collect();

        assert_eq!(codes, vec!["B", "C", "A"]);
        assert_eq!(result.order, RankOrder::ShortestDistance);
        assert_eq!(result.pages_fetched, 1);
    }

    #[tokio::test]
    async fn single_page_sorts_by_trains() {
        let source = MockSource::single(vec![
            route("A", 2, 3, "900 Kms"),
            route("B", 10, 2, "500 Kms"),
            route("C", 4, 4, "700 Kms"),
        ]);

        let result = aggregate_routes(&source, &AggregateOptions::default())
            .await
            .unwrap();
        let codes: Vec<_> = result.routes.iter().map(|r| r.transit.code.as_str()).collect();

        assert_eq!(codes, vec!["B", "C", "A"]);
        assert_eq!(result.order, RankOrder::MostTrains);
        assert!(source.requested().is_empty());
    }

    #[tokio::test]
    async fn single_page_with_ceiling_filters_and_sorts_by_distance() {
        let source = MockSource::single(vec![
            route("A", 2, 3, "900 Kms"),
            route("B", 10, 2, "1200 Kms"),
            route("C", 4, 4, "700 Kms"),
            route("D", 40, 4, "no distance"),
        ]);
        let options = AggregateOptions::default().with_max_distance(1000);

        let result = aggregate_routes(&source, &options).await.unwrap();
        let codes: Vec<_> = result.routes.iter().map(|r| r.transit.code.as_str()).collect();

        assert_eq!(codes, vec!["C", "A"]);
        assert_eq!(result.order, RankOrder::ShortestDistance);
        assert_eq!(result.total_before_filter, 4);
        assert_eq!(result.matched, 2);
    }

    #[tokio::test]
    async fn limit_truncates_after_ranking() {
        let source = MockSource::paged(&[10, 10, 5]);
        let options = paginated().with_limit(8);

        let result = aggregate_routes(&source, &options).await.unwrap();

        assert_eq!(result.routes.len(), 8);
        assert_eq!(result.matched, 25);
        assert_eq!(result.total_before_filter, 25);
        assert_eq!(result.routes[0].distance_km(), 100);
    }

    #[tokio::test]
    async fn zero_limit_and_ceiling_mean_unbounded() {
        let source = MockSource::paged(&[10, 4]);
        let options = paginated().with_limit(0).with_max_distance(0);
        assert_eq!(options.limit, None);
        assert_eq!(options.max_distance_km, None);

        let result = aggregate_routes(&source, &options).await.unwrap();
        assert_eq!(result.routes.len(), 14);
    }

    #[tokio::test]
    async fn explicit_zero_options_are_unbounded() {
        let source = MockSource::single(vec![route("A", 1, 1, "900 Kms"), route("B", 1, 1, "?")]);
        let options = AggregateOptions {
            paginate: false,
            max_distance_km: Some(0),
            limit: Some(0),
        };

        let result = aggregate_routes(&source, &options).await.unwrap();
        assert_eq!(result.routes.len(), 2);
        assert_eq!(result.order, RankOrder::MostTrains);
    }

    #[test]
    fn options_for_url() {
        assert!(AggregateOptions::for_url("https://etrain.info/transit/BL-NED").paginate);
        assert!(!AggregateOptions::for_url("https://etrain.info/transit/BL-NED?page=1").paginate);
        assert!(!AggregateOptions::for_url("https://etrain.info/trains/BL-to-NED").paginate);
    }
}
