use crate::data::record::StationRecord;
use crate::foundation::error::{HeatmapError, HeatmapResult};

/// Dataset-wide ridership bounds used to normalize glyph radius and brightness.
///
/// Invariant: `min <= midpoint <= max`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RidershipStats {
    min: f64,
    max: f64,
    midpoint: f64,
}

impl RidershipStats {
    pub fn new(min: f64, max: f64, midpoint: f64) -> HeatmapResult<Self> {
        if !(min.is_finite() && max.is_finite() && midpoint.is_finite()) {
            return Err(HeatmapError::validation("ridership stats must be finite"));
        }
        if !(min <= midpoint && midpoint <= max) {
            return Err(HeatmapError::validation(format!(
                "ridership stats must satisfy min <= midpoint <= max (got {min}, {midpoint}, {max})"
            )));
        }
        Ok(Self { min, max, midpoint })
    }

    /// Min/max over all records; the midpoint sits halfway between them.
    ///
    /// An empty dataset yields all zeros, which [`RidershipStats::is_degenerate`] reports.
    pub fn compute(records: &[StationRecord]) -> Self {
        let mut bounds: Option<(f64, f64)> = None;
        for v in records.iter().map(|r| r.ridership) {
            if !v.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        let Some((min, max)) = bounds else {
            return Self {
                min: 0.0,
                max: 0.0,
                midpoint: 0.0,
            };
        };
        Self {
            min,
            max,
            midpoint: min + (max - min) / 2.0,
        }
    }

    /// Replace the midpoint, keeping it inside `[min, max]`.
    pub fn with_midpoint(self, midpoint: f64) -> HeatmapResult<Self> {
        Self::new(self.min, self.max, midpoint)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn midpoint(&self) -> f64 {
        self.midpoint
    }

    /// True when glyphs cannot be normalized (no positive maximum).
    pub fn is_degenerate(&self) -> bool {
        !(self.max.is_finite() && self.max > 0.0)
    }

    /// `ridership / max`, clamped to `[0, 1]`.
    pub fn normalized(&self, ridership: f64) -> HeatmapResult<f64> {
        if self.is_degenerate() {
            return Err(HeatmapError::degenerate_statistics(format!(
                "max ridership must be > 0 (got {})",
                self.max
            )));
        }
        Ok((ridership / self.max).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/stats.rs"]
mod tests;
