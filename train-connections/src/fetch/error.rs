//! Fetch error types.

/// Errors that can occur when fetching a listing page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Status {
            url: "https://etrain.info/transit/BL-NED".into(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "https://etrain.info/transit/BL-NED returned status 503"
        );
    }
}
