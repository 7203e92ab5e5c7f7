//! Bounding box of a record set.
//!
//! Used to constrain how far the map can be panned. The box covers every
//! retained record and is then padded so edge markers are not clipped.

use encampment_map_source_models::EncampmentRecord;
use geo::{BoundingRect as _, MultiPoint, Point};
use serde::Serialize;

/// A latitude/longitude rectangle in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// The smallest box containing every record. `None` for an empty set.
    #[must_use]
    pub fn covering(records: &[EncampmentRecord]) -> Option<Self> {
        let points: MultiPoint<f64> = records
            .iter()
            .map(|r| Point::new(r.longitude(), r.latitude()))
            .collect::<Vec<_>>()
            .into();

        points.bounding_rect().map(|rect| Self {
            min_lat: rect.min().y,
            min_lon: rect.min().x,
            max_lat: rect.max().y,
            max_lon: rect.max().x,
        })
    }

    /// Grows the box by `margin` degrees on every side, clamped to the
    /// valid coordinate range.
    #[must_use]
    pub fn padded(self, margin: f64) -> Self {
        Self {
            min_lat: (self.min_lat - margin).clamp(-90.0, 90.0),
            min_lon: (self.min_lon - margin).clamp(-180.0, 180.0),
            max_lat: (self.max_lat + margin).clamp(-90.0, 90.0),
            max_lon: (self.max_lon + margin).clamp(-180.0, 180.0),
        }
    }

    /// South-west and north-east corners as Leaflet `[lat, lng]` pairs.
    #[must_use]
    pub const fn corners(&self) -> [[f64; 2]; 2] {
        [[self.min_lat, self.min_lon], [self.max_lat, self.max_lon]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encampment_map_source_models::{Coordinates, SiteFields};

    fn record(lat: f64, lon: f64) -> EncampmentRecord {
        let fields = SiteFields {
            name: "Site".to_string(),
            ..SiteFields::default()
        };
        EncampmentRecord::new(fields, Coordinates::new(lat, lon).unwrap()).unwrap()
    }

    #[test]
    fn empty_set_has_no_bounds() {
        assert!(BoundingBox::covering(&[]).is_none());
    }

    #[test]
    fn covers_all_records() {
        let records = vec![record(40.7, -74.0), record(34.05, -118.24), record(47.6, -122.3)];
        let bbox = BoundingBox::covering(&records).unwrap();
        assert!((bbox.min_lat - 34.05).abs() < f64::EPSILON);
        assert!((bbox.max_lat - 47.6).abs() < f64::EPSILON);
        assert!((bbox.min_lon - -122.3).abs() < f64::EPSILON);
        assert!((bbox.max_lon - -74.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_record_is_a_point_box() {
        let bbox = BoundingBox::covering(&[record(10.0, 20.0)]).unwrap();
        assert_eq!(bbox.corners(), [[10.0, 20.0], [10.0, 20.0]]);
    }

    #[test]
    fn padding_is_clamped() {
        let bbox = BoundingBox::covering(&[record(85.0, 175.0), record(-20.0, -10.0)])
            .unwrap()
            .padded(10.0);
        assert!((bbox.max_lat - 90.0).abs() < f64::EPSILON);
        assert!((bbox.max_lon - 180.0).abs() < f64::EPSILON);
        assert!((bbox.min_lat - -30.0).abs() < f64::EPSILON);
        assert!((bbox.min_lon - -20.0).abs() < f64::EPSILON);
    }
}
