//! Route filtering and ranking.

use std::fmt;

use crate::domain::TransitRoute;

/// How a set of routes is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Ascending listed distance.
    ShortestDistance,
    /// Descending total train count.
    MostTrains,
}

impl RankOrder {
    /// Order used for an aggregation.
    ///
    /// Paginated listings and distance-filtered results are ordered by
    /// distance; a single page is ordered by train availability.
    pub fn select(paginated: bool, distance_filtered: bool) -> Self {
        if paginated || distance_filtered {
            RankOrder::ShortestDistance
        } else {
            RankOrder::MostTrains
        }
    }
}

impl fmt::Display for RankOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankOrder::ShortestDistance => write!(f, "shortest distance"),
            RankOrder::MostTrains => write!(f, "total train availability"),
        }
    }
}

/// Sort routes best-first by `order`.
///
/// Ties keep no particular order.
pub fn rank_routes(mut routes: Vec<TransitRoute>, order: RankOrder) -> Vec<TransitRoute> {
    match order {
        RankOrder::ShortestDistance => routes.sort_by_key(|r| r.distance_km()),
        RankOrder::MostTrains => routes.sort_by(|a, b| b.total_trains().cmp(&a.total_trains())),
    }
    routes
}

/// Keep routes whose distance is known and at most `max_km`.
///
/// Routes with an unparsable distance count as 0 and are dropped.
pub fn filter_by_distance(routes: Vec<TransitRoute>, max_km: u32) -> Vec<TransitRoute> {
    routes
        .into_iter()
        .filter(|r| {
            let km = r.distance_km();
            km > 0 && km <= max_km
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::route;

    fn codes(routes: &[TransitRoute]) -> Vec<&str> {
        routes.iter().map(|r| r.transit.code.as_str()).collect()
    }

    #[test]
    fn select_order() {
        assert_eq!(RankOrder::select(true, false), RankOrder::ShortestDistance);
        assert_eq!(RankOrder::select(false, true), RankOrder::ShortestDistance);
        assert_eq!(RankOrder::select(true, true), RankOrder::ShortestDistance);
        assert_eq!(RankOrder::select(false, false), RankOrder::MostTrains);
    }

    #[test]
    fn rank_by_distance() {
        let routes = vec![
            route("A", 1, 1, "900 Kms"),
            route("B", 1, 1, "500 Kms"),
            route("C", 1, 1, "700 Kms"),
        ];
        let ranked = rank_routes(routes, RankOrder::ShortestDistance);
        assert_eq!(codes(&ranked), vec!["B", "C", "A"]);
    }

    #[test]
    fn rank_by_trains() {
        let routes = vec![
            route("A", 2, 3, "900 Kms"),
            route("B", 10, 2, "500 Kms"),
            route("C", 4, 4, "700 Kms"),
        ];
        let ranked = rank_routes(routes, RankOrder::MostTrains);
        assert_eq!(codes(&ranked), vec!["B", "C", "A"]);
    }

    #[test]
    fn unparsable_distance_sorts_first() {
        let routes = vec![route("A", 1, 1, "900 Kms"), route("B", 1, 1, "n/a")];
        let ranked = rank_routes(routes, RankOrder::ShortestDistance);
        assert_eq!(codes(&ranked), vec!["B", "A"]);
    }

    #[test]
    fn distance_filter_is_inclusive_and_drops_unknown() {
        let routes = vec![
            route("A", 1, 1, "900 Kms"),
            route("B", 1, 1, "1000 Kms"),
            route("C", 1, 1, "1001 Kms"),
            route("D", 1, 1, "unknown"),
            route("E", 1, 1, "0 Kms"),
        ];
        let kept = filter_by_distance(routes, 1000);
        assert_eq!(codes(&kept), vec!["A", "B"]);
    }

    #[test]
    fn display() {
        assert_eq!(RankOrder::ShortestDistance.to_string(), "shortest distance");
        assert_eq!(RankOrder::MostTrains.to_string(), "total train availability");
    }
}
