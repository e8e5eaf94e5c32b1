//! Fit-to-canvas projection for the demo driver.
//!
//! Real deployments project through a proper map projection owned by the
//! map layer; the demo only needs the observations on screen, so it scales
//! their geographic bounding box into the canvas with a margin, north up.

use wind_common::{Bounds, Observation, Project, Vec2};

/// Margin factor matching the reference's 0.95 fit.
const FIT: f64 = 0.95;

#[derive(Debug, Clone, Copy)]
pub struct FitProjection {
    scale: f64,
    translate_x: f64,
    translate_y: f64,
}

impl FitProjection {
    /// Fit the bounding box of the given observations into `bounds`,
    /// preserving aspect ratio and centering. Falls back to a unit mapping
    /// when the observations are empty or degenerate.
    pub fn fit(observations: &[Observation], bounds: Bounds) -> Self {
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        for obs in observations {
            min_lon = min_lon.min(obs.longitude());
            max_lon = max_lon.max(obs.longitude());
            min_lat = min_lat.min(obs.latitude());
            max_lat = max_lat.max(obs.latitude());
        }

        let lon_span = max_lon - min_lon;
        let lat_span = max_lat - min_lat;
        if !(lon_span.is_finite() && lat_span.is_finite()) || lon_span <= 0.0 || lat_span <= 0.0 {
            return Self {
                scale: 1.0,
                translate_x: 0.0,
                translate_y: 0.0,
            };
        }

        let scale = FIT
            * (bounds.width as f64 / lon_span).min(bounds.height as f64 / lat_span);
        let translate_x = (bounds.width as f64 - scale * (min_lon + max_lon)) / 2.0;
        // Latitude grows north, pixel y grows down.
        let translate_y = (bounds.height as f64 + scale * (min_lat + max_lat)) / 2.0;
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }
}

impl Project for FitProjection {
    fn project(&self, longitude: f64, latitude: f64) -> Vec2 {
        Vec2::new(
            self.scale * longitude + self.translate_x,
            -self.scale * latitude + self.translate_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(lon: f64, lat: f64) -> Observation {
        Observation {
            station_id: "s".to_string(),
            coordinates: [lon, lat],
            wind: [Some(90.0), Some(1.0)],
            date: "2013-08-27T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_fit_keeps_observations_inside_canvas() {
        let observations = vec![
            obs(139.0, 35.0),
            obs(141.0, 35.5),
            obs(140.0, 36.5),
            obs(139.5, 36.0),
        ];
        let bounds = Bounds::new(640, 480);
        let projection = FitProjection::fit(&observations, bounds);
        for o in &observations {
            let p = projection.project(o.longitude(), o.latitude());
            assert!(bounds.contains(p.x.round() as i32, p.y.round() as i32), "{p:?}");
        }
    }

    #[test]
    fn test_north_is_up() {
        let observations = vec![obs(139.0, 35.0), obs(141.0, 37.0)];
        let projection = FitProjection::fit(&observations, Bounds::new(100, 100));
        let south = projection.project(140.0, 35.0);
        let north = projection.project(140.0, 37.0);
        assert!(north.y < south.y);
    }
}
