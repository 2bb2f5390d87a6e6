use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{HeatmapError, HeatmapResult};

/// Geographic bounding box framing the target region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBounds {
    /// New York City, the five boroughs' subway footprint.
    pub const NYC: Self = Self {
        lat_min: 40.6,
        lat_max: 40.9,
        lon_min: -74.2,
        lon_max: -73.8,
    };

    pub fn validate(&self) -> HeatmapResult<()> {
        let all_finite = [self.lat_min, self.lat_max, self.lon_min, self.lon_max]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(HeatmapError::validation("geo bounds must be finite"));
        }
        if self.lat_min >= self.lat_max {
            return Err(HeatmapError::validation(
                "geo bounds lat_min must be < lat_max",
            ));
        }
        if self.lon_min >= self.lon_max {
            return Err(HeatmapError::validation(
                "geo bounds lon_min must be < lon_max",
            ));
        }
        Ok(())
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::NYC
    }
}

/// Linear lat/lon -> pixel transform. Latitude is inverted since screen y grows downward.
///
/// Coordinates outside `bounds` land outside the canvas; the surface clips them.
pub fn project(lat: f64, lon: f64, bounds: &GeoBounds, canvas: Canvas) -> Point {
    let x = (lon - bounds.lon_min) / (bounds.lon_max - bounds.lon_min) * f64::from(canvas.width);
    let y = (bounds.lat_max - lat) / (bounds.lat_max - bounds.lat_min) * f64::from(canvas.height);
    Point::new(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/projection.rs"]
mod tests;
