//! Data types shared by the API client, the screens and the map renderer.

use serde::{Deserialize, Serialize};

/// A point of interest returned by the orphanages listing endpoint.
///
/// Records are never mutated by the UI; a refresh replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Server-assigned unique id
    pub id: i64,
    /// Display label
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Narrowest span zooming in can reach, in degrees
pub const MIN_SPAN: f64 = 0.000_5;
const MAX_LATITUDE_SPAN: f64 = 180.0;
const MAX_LONGITUDE_SPAN: f64 = 360.0;

/// A visible map region: a center point plus the full span in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for Region {
    /// The fixed initial viewport of the orphanages map.
    fn default() -> Self {
        Self {
            latitude: -20.284_595_8,
            longitude: -50.544_616_9,
            latitude_delta: 0.02,
            longitude_delta: 0.05,
        }
    }
}

impl Region {
    pub fn center(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Horizontal bounds as `[west, east]`
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.longitude_delta / 2.0;
        [self.longitude - half, self.longitude + half]
    }

    /// Vertical bounds as `[south, north]`
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.latitude_delta / 2.0;
        [self.latitude - half, self.latitude + half]
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        (west..=east).contains(&coordinate.longitude)
            && (south..=north).contains(&coordinate.latitude)
    }

    /// A finite center on the globe and strictly positive, finite spans.
    /// Every other method assumes this holds.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.latitude_delta.is_finite()
            && self.latitude_delta > 0.0
            && self.longitude_delta.is_finite()
            && self.longitude_delta > 0.0
    }

    /// Same span around a new center
    pub fn centered_on(&self, center: Coordinate) -> Region {
        Region {
            latitude: center.latitude.clamp(-90.0, 90.0),
            longitude: center.longitude.clamp(-180.0, 180.0),
            ..*self
        }
    }

    /// Move the center by a fraction of the span in each direction
    pub fn panned(&self, north: f64, east: f64) -> Region {
        self.centered_on(Coordinate {
            latitude: self.latitude + north * self.latitude_delta,
            longitude: self.longitude + east * self.longitude_delta,
        })
    }

    /// Scale both spans around the same center; `factor < 1` zooms in
    pub fn zoomed(&self, factor: f64) -> Region {
        Region {
            latitude_delta: (self.latitude_delta * factor).clamp(MIN_SPAN, MAX_LATITUDE_SPAN),
            longitude_delta: (self.longitude_delta * factor).clamp(MIN_SPAN, MAX_LONGITUDE_SPAN),
            ..*self
        }
    }

    /// Clamp a coordinate so it stays inside this region.
    pub fn clamp(&self, coordinate: Coordinate) -> Coordinate {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        Coordinate {
            latitude: coordinate.latitude.clamp(south, north),
            longitude: coordinate.longitude.clamp(west, east),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_ignoring_extra_fields() {
        let json = r#"{"id":1,"name":"Lar das meninas","latitude":-20.28,"longitude":-50.54,"about":"x"}"#;
        let record: LocationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Lar das meninas");
    }

    #[test]
    fn test_default_region_bounds() {
        let region = Region::default();
        let [west, east] = region.x_bounds();
        let [south, north] = region.y_bounds();
        assert!((east - west - 0.05).abs() < 1e-9);
        assert!((north - south - 0.02).abs() < 1e-9);
        assert!(region.contains(region.center()));
    }

    #[test]
    fn test_clamp_keeps_point_inside() {
        let region = Region::default();
        let far = Coordinate {
            latitude: 10.0,
            longitude: -100.0,
        };
        let clamped = region.clamp(far);
        assert!(region.contains(clamped));
        assert_eq!(clamped.latitude, region.y_bounds()[1]);
        assert_eq!(clamped.longitude, region.x_bounds()[0]);
    }

    #[test]
    fn test_degenerate_spans_are_invalid() {
        assert!(Region::default().is_valid());
        let base = Region::default();
        for region in [
            Region { longitude_delta: -0.05, ..base },
            Region { latitude_delta: 0.0, ..base },
            Region { latitude_delta: f64::NAN, ..base },
            Region { longitude_delta: f64::INFINITY, ..base },
            Region { latitude: f64::NAN, ..base },
            Region { longitude: 200.0, ..base },
        ] {
            assert!(!region.is_valid(), "{:?}", region);
        }
    }

    #[test]
    fn test_pan_and_zoom_keep_region_valid() {
        let region = Region::default();
        let panned = region.panned(0.25, -0.5);
        assert!((panned.latitude - (region.latitude + 0.005)).abs() < 1e-9);
        assert!((panned.longitude - (region.longitude - 0.025)).abs() < 1e-9);
        assert_eq!(panned.longitude_delta, region.longitude_delta);

        let out = region.zoomed(2.0);
        assert!((out.longitude_delta - 0.1).abs() < 1e-9);
        assert_eq!(out.center(), region.center());

        let mut tiny = region;
        for _ in 0..40 {
            tiny = tiny.zoomed(0.5);
        }
        assert_eq!(tiny.latitude_delta, MIN_SPAN);
        assert!(tiny.is_valid());

        let mut huge = region;
        for _ in 0..40 {
            huge = huge.zoomed(2.0);
        }
        assert_eq!(huge.longitude_delta, 360.0);
        assert!(huge.is_valid());

        let polar = region.panned(1.0e6, 0.0);
        assert_eq!(polar.latitude, 90.0);
        assert!(polar.is_valid());
    }
}
