//! Cell coercion helpers.
//!
//! Spreadsheet cells are free text. These functions coerce them to numbers,
//! mapping anything that does not parse cleanly to `None` rather than
//! failing the row.

use encampment_map_source_models::Coordinates;

/// Parses a decimal-degree cell. Returns `None` if the cell is empty,
/// non-numeric, or not finite.
#[must_use]
pub fn parse_coordinate(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses lat/lng cells into validated [`Coordinates`]. Returns `None` if
/// either cell is missing, unparseable, or out of range.
#[must_use]
pub fn parse_lat_lng(lat: &str, lng: &str) -> Option<Coordinates> {
    Coordinates::new(parse_coordinate(lat)?, parse_coordinate(lng)?)
}

/// Parses an arrest count. Thousands separators are ignored and integral
/// floats (`"12.0"`) are accepted. Anything else is `None`.
#[must_use]
pub fn parse_arrests(s: &str) -> Option<u32> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(count) = cleaned.parse::<u32>() {
        return Some(count);
    }

    let value = cleaned.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Some(value as u32);
    }
    None
}
