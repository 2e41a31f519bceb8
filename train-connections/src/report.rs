//! Plain-text reports for the command line.

use std::io::{self, Write};

use crate::connections::{Connection, RouteCodes};
use crate::domain::Weekday;
use crate::routes::{AggregateOptions, Aggregation};

/// Site root that listing links are relative to.
pub const DETAILS_BASE: &str = "https://etrain.info";

/// Write the connections found for a via search.
///
/// `connections` should already be limited to the ones worth showing.
pub fn write_connections<W: Write>(
    out: &mut W,
    codes: &RouteCodes,
    day: Option<Weekday>,
    connections: &[Connection<'_>],
) -> io::Result<()> {
    let RouteCodes {
        source,
        destination,
        transit,
    } = codes;

    match day {
        Some(day) => writeln!(
            out,
            "=== TRAIN CONNECTIONS FROM {source} TO {destination} VIA {transit} (Available on {day}) ===\n"
        )?,
        None => writeln!(
            out,
            "=== TRAIN CONNECTIONS FROM {source} TO {destination} VIA {transit} ===\n"
        )?,
    }

    let count = connections.len();
    match day {
        Some(day) => writeln!(out, "Found {count} connections under 19 hours available on {day}:\n")?,
        None => writeln!(out, "Found {count} connections under 19 hours:\n")?,
    }

    for (i, connection) in connections.iter().enumerate() {
        let first = connection.first();
        let second = connection.second();
        let layover = connection.layover_text().unwrap_or_default();
        let total = connection.total_text().unwrap_or_default();

        writeln!(
            out,
            "{}. {} {} + {} {}",
            i + 1,
            first.number,
            first.name,
            second.number,
            second.name
        )?;
        writeln!(
            out,
            "   {source} {} → {transit} {} → {destination} {}",
            first.departs, first.arrives, second.arrives
        )?;
        writeln!(
            out,
            "   Total Time: {total} | Connection: {} | Layover: {layover}",
            connection.kind()
        )?;
        writeln!(
            out,
            "   Days: {} + {}\n",
            first.days_label(),
            second.days_label()
        )?;
    }

    Ok(())
}

/// Write the ranked routes of an aggregation.
pub fn write_routes<W: Write>(
    out: &mut W,
    aggregation: &Aggregation,
    options: &AggregateOptions,
) -> io::Result<()> {
    writeln!(out, "=== TOP TRANSIT ROUTES ===\n")?;

    if aggregation.total_before_filter == 0 {
        writeln!(out, "No transit routes found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "Found {} transit routes across {} page(s)",
        aggregation.total_before_filter, aggregation.pages_fetched
    )?;

    if let Some(km) = options.max_distance_km.filter(|&km| km > 0) {
        writeln!(
            out,
            "After distance filtering (≤{km} km): {} routes",
            aggregation.matched
        )?;
        if aggregation.matched == 0 {
            writeln!(out, "No routes found within {km} km distance limit.")?;
            return Ok(());
        }
    }

    writeln!(
        out,
        "Showing top {} routes (sorted by {}):\n",
        aggregation.routes.len(),
        aggregation.order
    )?;

    for (i, route) in aggregation.routes.iter().enumerate() {
        writeln!(
            out,
            "{}. {} → {} → {}",
            i + 1,
            route.source,
            route.transit,
            route.destination
        )?;
        writeln!(
            out,
            "   Trains: {} + {} = {} total | Distance: {}",
            route.source_trains,
            route.transit_trains,
            route.total_trains(),
            route.distance
        )?;
        writeln!(out, "   Details: {DETAILS_BASE}{}\n", route.link)?;
    }

    let remaining = aggregation.matched.saturating_sub(aggregation.routes.len());
    if remaining > 0 {
        writeln!(out, "... and {remaining} more routes available.")?;
    }

    Ok(())
}
