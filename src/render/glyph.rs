use smallvec::SmallVec;

use crate::data::record::StationRecord;
use crate::data::stats::RidershipStats;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{HeatmapError, HeatmapResult};
use crate::render::color::{Rgb, Rgba, interpolate};
use crate::render::projection::{GeoBounds, project};

/// Glyph sizing and warm-ramp colors.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlyphStyle {
    pub min_radius: f64,
    pub max_radius: f64,
    /// Warm color at zero ridership.
    pub low: Rgb,
    /// Warm color at the midpoint.
    pub high: Rgb,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            min_radius: 4.0,
            max_radius: 8.0,
            low: Rgb::new(0xFF, 0x8C, 0x00),
            high: Rgb::new(0xFF, 0xFF, 0x00),
        }
    }
}

/// Which styling branch produced a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphBranch {
    /// At or below the midpoint: warm, radius scales with ridership.
    Warm,
    /// Above the midpoint: overexposed white at the maximum radius.
    Hot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

pub type ColorStops = SmallVec<[ColorStop; 3]>;

/// Radial mark for one record: full-strength at the center, fading toward `radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphSpec {
    pub center: Point,
    pub radius: f64,
    pub stops: ColorStops,
    pub branch: GlyphBranch,
}

/// Warm ramp from `style.low` to `style.high` as ridership approaches the midpoint.
pub fn ridership_color(ridership: f64, midpoint: f64, alpha: f32, style: &GlyphStyle) -> Rgba {
    let ratio = if midpoint > 0.0 {
        (ridership / midpoint).clamp(0.0, 1.0)
    } else {
        1.0
    };
    interpolate(style.low, style.high, ratio).with_alpha(alpha)
}

pub fn render_glyph(
    record: &StationRecord,
    stats: &RidershipStats,
    bounds: &GeoBounds,
    canvas: Canvas,
    style: &GlyphStyle,
) -> HeatmapResult<GlyphSpec> {
    if stats.is_degenerate() {
        return Err(HeatmapError::degenerate_statistics(format!(
            "cannot size glyph for '{}' with max ridership {}",
            record.station_id,
            stats.max()
        )));
    }

    let center = project(record.latitude, record.longitude, bounds, canvas);
    let normalized = stats.normalized(record.ridership)?;

    if record.ridership <= stats.midpoint() {
        let radius = style.min_radius + normalized * (style.max_radius - style.min_radius);
        let color = |alpha| ridership_color(record.ridership, stats.midpoint(), alpha, style);
        let brightness = 0.8;
        Ok(GlyphSpec {
            center,
            radius,
            stops: SmallVec::from_buf([
                ColorStop::new(0.0, color(1.0)),
                ColorStop::new(0.5, color(brightness)),
                ColorStop::new(1.0, color(brightness * 0.01)),
            ]),
            branch: GlyphBranch::Warm,
        })
    } else {
        let brightness = (0.8 + normalized * 0.2) as f32;
        Ok(GlyphSpec {
            center,
            radius: style.max_radius,
            stops: SmallVec::from_buf([
                ColorStop::new(0.0, Rgb::WHITE.with_alpha(1.0)),
                ColorStop::new(0.5, Rgb::WHITE.with_alpha(brightness)),
                ColorStop::new(1.0, Rgb::WHITE.with_alpha(0.0)),
            ]),
            branch: GlyphBranch::Hot,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;
