//! Transit listings fetched by URL.

use crate::domain::TransitRoute;
use crate::extract::parse_transit_routes;
use crate::fetch::{ContentFetcher, FetchError};

use super::aggregate::RouteSource;

/// Whether a listing URL should be walked page by page.
///
/// Transit listings are paginated unless the URL already pins a page.
pub fn needs_pagination(url: &str) -> bool {
    url.contains("/transit/") && !url.contains("page=")
}

/// URL of page `page` of a listing.
///
/// ```
/// use train_connections::routes::page_url;
///
/// assert_eq!(page_url("https://etrain.info/transit/BL-NED", 2), "https://etrain.info/transit/BL-NED?page=2");
/// assert_eq!(page_url("https://etrain.info/transit/BL-NED?sort=d", 3), "https://etrain.info/transit/BL-NED?sort=d&page=3");
/// ```
pub fn page_url(base: &str, page: u32) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}page={page}")
}

/// A transit listing at a URL, read through a [`ContentFetcher`].
pub struct ListingSource<'a, F> {
    fetcher: &'a F,
    url: String,
}

impl<'a, F: ContentFetcher> ListingSource<'a, F> {
    pub fn new(fetcher: &'a F, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<F: ContentFetcher> RouteSource for ListingSource<'_, F> {
    async fn fetch_listing(&self) -> Result<Vec<TransitRoute>, FetchError> {
        let html = self.fetcher.fetch(&self.url).await?;
        Ok(parse_transit_routes(&html))
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<TransitRoute>, FetchError> {
        let html = self.fetcher.fetch(&page_url(&self.url, page)).await?;
        Ok(parse_transit_routes(&html))
    }
}
