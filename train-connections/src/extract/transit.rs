//! Transit routes laid out as rows of a transit listing table.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::domain::{Station, TransitRoute};

/// Cells a route row must have: source, source count, link + transit,
/// transit count, destination, distance.
const ROUTE_CELLS: usize = 6;

fn row_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<tr[^>]*>.*?</tr>").unwrap())
}

fn cell_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<td[^>]*>(.*?)</td>").unwrap())
}

fn station_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([A-Z\s]+)\s*<br>\s*\(([A-Z]+)\)").unwrap())
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"href="([^"]*)""#).unwrap())
}

/// Extract every route row from a transit listing page.
///
/// Only rows mentioning both "Show" and "Kms" are considered. A row is
/// skipped if any of its cells doesn't have the expected shape.
pub fn parse_transit_routes(html: &str) -> Vec<TransitRoute> {
    let mut routes = Vec::new();
    let mut rows = 0usize;

    for (i, row) in row_pattern().find_iter(html).enumerate() {
        rows += 1;
        let row = row.as_str();
        if !row.contains("Show") || !row.contains("Kms") {
            continue;
        }

        match parse_row(row) {
            Some(route) => routes.push(route),
            None => trace!(row = i, "skipping malformed route row"),
        }
    }

    debug!(rows, routes = routes.len(), "extracted transit routes");
    routes
}

fn parse_row(row: &str) -> Option<TransitRoute> {
    let cells: Vec<&str> = cell_pattern()
        .captures_iter(row)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    if cells.len() < ROUTE_CELLS {
        return None;
    }

    let source = parse_station(cells[0])?;
    let source_trains = cells[1].trim().parse().ok()?;
    let link = link_pattern().captures(cells[2])?.get(1)?.as_str().to_string();
    let transit = parse_station(cells[2])?;
    let transit_trains = cells[3].trim().parse().ok()?;
    let destination = parse_station(cells[4])?;
    let distance = cells[5].trim().to_string();

    Some(TransitRoute {
        source,
        source_trains,
        transit,
        transit_trains,
        destination,
        distance,
        link,
    })
}

/// `NAME<br>(CODE)` within a cell.
fn parse_station(cell: &str) -> Option<Station> {
    let caps = station_pattern().captures(cell)?;
    Some(Station::new(caps[1].trim(), &caps[2]))
}
