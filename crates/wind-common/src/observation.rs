//! Wind observation records and their projected form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Vec2;

/// A raw station observation as delivered by the sample source.
///
/// `wind` is `[direction, speed]` where direction is meteorological degrees
/// (the bearing the wind blows FROM, clockwise from north) and speed is in
/// source units. Either entry may be null or zero; such records carry no
/// usable vector and are excluded from interpolation input. This mirrors
/// the upstream feed, which does not distinguish a calm reading from a
/// missing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "stationId")]
    pub station_id: String,
    /// `[longitude, latitude]` in degrees.
    pub coordinates: [f64; 2],
    /// `[direction_deg, speed]`, either possibly null.
    pub wind: [Option<f64>; 2],
    pub date: DateTime<Utc>,
}

impl Observation {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// The observation's wind as a screen-space vector, or `None` when the
    /// direction or speed is missing or zero.
    ///
    /// Direction d means "blowing from bearing d", so the air moves toward
    /// `d + 180°`. With x growing right and y growing down:
    /// `dx = -speed * sin(d)`, `dy = speed * cos(d)`. A northerly (d = 0)
    /// yields (0, +speed): southward on screen.
    pub fn usable_vector(&self) -> Option<Vec2> {
        let direction = self.wind[0].filter(|d| *d != 0.0)?;
        let speed = self.wind[1].filter(|s| *s != 0.0)?;
        let r = direction.to_radians();
        Some(Vec2::new(-speed * r.sin(), speed * r.cos()))
    }
}

/// An observation fixed to a projected pixel position for one animation
/// cycle. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationSample {
    /// Projected position in pixel coordinates.
    pub position: Vec2,
    /// Screen-space wind vector (pixels per tick before velocity scaling).
    pub vector: Vec2,
}

impl StationSample {
    pub fn new(position: Vec2, vector: Vec2) -> Self {
        Self { position, vector }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(direction: Option<f64>, speed: Option<f64>) -> Observation {
        Observation {
            station_id: "101".to_string(),
            coordinates: [139.75, 35.69],
            wind: [direction, speed],
            date: "2013-08-27T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_parse_record() {
        let json = r#"{
            "stationId": "40001",
            "coordinates": [139.75, 35.69],
            "wind": [180.0, 3.5],
            "date": "2013-08-27T12:00:00Z"
        }"#;
        let o: Observation = serde_json::from_str(json).unwrap();
        assert_eq!(o.station_id, "40001");
        assert_eq!(o.longitude(), 139.75);
        assert_eq!(o.latitude(), 35.69);
        assert!(o.usable_vector().is_some());
    }

    #[test]
    fn test_missing_or_zero_wind_is_unusable() {
        assert!(obs(None, Some(3.0)).usable_vector().is_none());
        assert!(obs(Some(90.0), None).usable_vector().is_none());
        assert!(obs(Some(0.0), Some(3.0)).usable_vector().is_none());
        assert!(obs(Some(90.0), Some(0.0)).usable_vector().is_none());
    }

    #[test]
    fn test_direction_convention() {
        // Wind from the north moves air southward: +y on screen.
        let v = obs(Some(360.0), Some(2.0)).usable_vector().unwrap();
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 2.0).abs() < 1e-9);

        // Wind from the west moves air eastward: +x on screen.
        let v = obs(Some(270.0), Some(2.0)).usable_vector().unwrap();
        assert!((v.x - 2.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
    }
}
