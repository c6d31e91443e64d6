//! Dataset Sanitizer
//!
//! Turns the raw housing table (mixed-format cells, localized tokens,
//! data-entry errors) into a typed, validated table ready for training.
//! The transform order is fixed: surface area, room count, age, price
//! row filter, then location encoding. Field statistics are computed on
//! the pre-filter population.

mod error;
mod fields;
mod location;
mod sanitizer;
mod stats;

pub use error::SanitizeError;
pub use location::{LocationShape, LABEL_CORRECTIONS};
pub use sanitizer::{sanitize, SanitizeReport};

/// Required numeric columns, in pipeline order.
pub const COL_SURFACE: &str = "surface_area";
pub const COL_ROOMS: &str = "room_count";
pub const COL_AGE: &str = "age";
pub const COL_PRICE: &str = "price";

/// Location columns; exactly one input shape must be present.
pub const COL_LOCATION: &str = "location";
pub const COL_LOCATION_RURAL: &str = "location_rural";
pub const COL_LOCATION_URBAN: &str = "location_urban";

/// Accepted price band, exclusive on both ends.
pub const PRICE_MIN: f64 = 10_000.0;
pub const PRICE_MAX: f64 = 1_000_000.0;

/// Room counts above this are treated as data-entry errors.
pub const MAX_ROOMS: f64 = 10.0;
