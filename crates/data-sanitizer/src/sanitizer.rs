//! Sanitization Pipeline

use crate::fields::{clean_age, clean_rooms, clean_surface, coerce_price};
use crate::location::{self, LocationShape};
use crate::{
    SanitizeError, COL_AGE, COL_PRICE, COL_ROOMS, COL_SURFACE, PRICE_MAX, PRICE_MIN,
};
use serde::Serialize;
use table_io::{Table, Value};
use tracing::{debug, info, warn};

/// Counters describing what a sanitization run changed.
///
/// Row drops are silent at the data level, so they are surfaced here for
/// downstream consumers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SanitizeReport {
    /// Rows in the raw table
    pub rows_in: usize,
    /// Rows surviving the price filter
    pub rows_out: usize,
    /// Rows dropped for a missing or out-of-band price
    pub price_rows_dropped: usize,
    /// Surface cells imputed with the median
    pub surface_imputed: usize,
    /// Room cells imputed with the median
    pub rooms_imputed: usize,
    /// Room cells capped back to the median
    pub rooms_capped: usize,
    /// Age cells imputed with the mean
    pub ages_imputed: usize,
    /// Free-text location cells filled with the most frequent label
    pub locations_filled: usize,
}

/// Sanitize a raw housing table.
///
/// Transforms run in a fixed order: surface area, room count, age, the
/// price row filter, then location encoding. Surface/room/age statistics
/// are computed over the pre-filter population; the location mode over
/// the surviving rows. Fails only when a required column is absent.
pub fn sanitize(mut table: Table) -> Result<(Table, SanitizeReport), SanitizeError> {
    for required in [COL_SURFACE, COL_ROOMS, COL_AGE, COL_PRICE] {
        if !table.has_column(required) {
            return Err(SanitizeError::MissingColumn(required.to_string()));
        }
    }
    let location_shape = LocationShape::resolve(&table)?;
    debug!(?location_shape, rows = table.n_rows(), "sanitizing dataset");

    let mut report = SanitizeReport {
        rows_in: table.n_rows(),
        ..Default::default()
    };

    let (surface, surface_imputed) = clean_surface(&table.column(COL_SURFACE)?);
    table.set_column(COL_SURFACE, surface)?;
    report.surface_imputed = surface_imputed;

    let (rooms, rooms_imputed, rooms_capped) = clean_rooms(&table.column(COL_ROOMS)?);
    table.set_column(COL_ROOMS, rooms)?;
    report.rooms_imputed = rooms_imputed;
    report.rooms_capped = rooms_capped;

    let (ages, ages_imputed) = clean_age(&table.column(COL_AGE)?);
    table.set_column(COL_AGE, ages)?;
    report.ages_imputed = ages_imputed;

    // Price is a row filter, not a repair: rows without a usable price
    // in (PRICE_MIN, PRICE_MAX) are removed entirely.
    let prices = coerce_price(&table.column(COL_PRICE)?);
    table.set_column(
        COL_PRICE,
        prices
            .iter()
            .map(|p| p.map_or(Value::Missing, Value::Number))
            .collect(),
    )?;
    let keep: Vec<bool> = prices
        .iter()
        .map(|p| matches!(p, Some(n) if *n > PRICE_MIN && *n < PRICE_MAX))
        .collect();
    report.price_rows_dropped = table.retain_rows(|i| keep[i]);
    if report.price_rows_dropped > 0 {
        warn!(
            dropped = report.price_rows_dropped,
            "dropped rows with missing or out-of-band prices"
        );
    }

    report.locations_filled = location::apply(location_shape, &mut table)?;
    report.rows_out = table.n_rows();

    info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        dropped = report.price_rows_dropped,
        "sanitization complete"
    );
    Ok((table, report))
}
