use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::data::stats::RidershipStats;
use crate::foundation::core::Canvas;
use crate::foundation::error::{HeatmapError, HeatmapResult};
use crate::render::background::Palette;
use crate::render::color::Rgb;
use crate::render::frame::FrameStyle;
use crate::render::glyph::GlyphStyle;
use crate::render::projection::GeoBounds;

/// Largest canvas edge the CPU surface accepts.
pub const MAX_CANVAS_EDGE: u32 = u16::MAX as u32;

/// Session settings, as read from a JSON file.
///
/// Every field is optional; missing fields take the defaults below. Colors stay as strings
/// until [`HeatmapConfig::validate`] parses them, so a bad hex value reports as a color error.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapConfig {
    pub canvas: Canvas,
    pub bounds: GeoBounds,
    pub palette: PaletteConfig,
    pub gradient_span_px: f64,
    pub glyph: GlyphConfig,
    pub tick_period_ms: u64,
    /// Replaces the computed `(min + max) / 2` midpoint when set.
    pub midpoint_ridership: Option<f64>,
    /// Paint a second background-only surface alongside the main one.
    pub mirror_background: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub pink: String,
    pub orange: String,
    pub dark_blue: String,
    pub black: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlyphConfig {
    pub min_radius: f64,
    pub max_radius: f64,
    pub low: String,
    pub high: String,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            bounds: GeoBounds::default(),
            palette: PaletteConfig::default(),
            gradient_span_px: 100.0,
            glyph: GlyphConfig::default(),
            tick_period_ms: 1000,
            midpoint_ridership: None,
            mirror_background: false,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let p = Palette::default();
        Self {
            pink: p.pink.to_string(),
            orange: p.orange.to_string(),
            dark_blue: p.dark_blue.to_string(),
            black: p.black.to_string(),
        }
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        let g = GlyphStyle::default();
        Self {
            min_radius: g.min_radius,
            max_radius: g.max_radius,
            low: g.low.to_string(),
            high: g.high.to_string(),
        }
    }
}

impl PaletteConfig {
    pub fn resolve(&self) -> HeatmapResult<Palette> {
        Ok(Palette {
            pink: Rgb::from_hex(&self.pink)?,
            orange: Rgb::from_hex(&self.orange)?,
            dark_blue: Rgb::from_hex(&self.dark_blue)?,
            black: Rgb::from_hex(&self.black)?,
        })
    }
}

impl GlyphConfig {
    pub fn resolve(&self) -> HeatmapResult<GlyphStyle> {
        let radii_ok = self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius >= 0.0
            && self.min_radius <= self.max_radius;
        if !radii_ok {
            return Err(HeatmapError::validation(format!(
                "glyph radii must satisfy 0 <= min_radius <= max_radius, got {}..{}",
                self.min_radius, self.max_radius
            )));
        }
        Ok(GlyphStyle {
            min_radius: self.min_radius,
            max_radius: self.max_radius,
            low: Rgb::from_hex(&self.low)?,
            high: Rgb::from_hex(&self.high)?,
        })
    }
}

impl HeatmapConfig {
    /// Parse a config from a JSON reader. Does not validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> HeatmapResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HeatmapError::serde(format!("parse heatmap config JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> HeatmapResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| HeatmapError::serde(format!("parse heatmap config JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HeatmapError::validation(format!("open heatmap config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        self.frame_style().map(|_| ())?;
        if self.tick_period_ms == 0 {
            return Err(HeatmapError::validation("tick_period_ms must be > 0"));
        }
        if let Some(m) = self.midpoint_ridership
            && !m.is_finite()
        {
            return Err(HeatmapError::validation(
                "midpoint_ridership must be finite",
            ));
        }
        Ok(())
    }

    /// Resolve the drawing style, validating canvas, bounds, palette and glyph settings.
    pub fn frame_style(&self) -> HeatmapResult<FrameStyle> {
        let Canvas { width, height } = self.canvas;
        let canvas = Canvas::new(width, height)?;
        if width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
            return Err(HeatmapError::validation(format!(
                "canvas {width}x{height} exceeds {MAX_CANVAS_EDGE} px per edge"
            )));
        }
        self.bounds.validate()?;
        if !self.gradient_span_px.is_finite() || self.gradient_span_px <= 0.0 {
            return Err(HeatmapError::validation("gradient_span_px must be > 0"));
        }
        Ok(FrameStyle {
            canvas,
            bounds: self.bounds,
            palette: self.palette.resolve()?,
            glyph: self.glyph.resolve()?,
            gradient_span_px: self.gradient_span_px,
        })
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Apply the midpoint override, if any, to computed statistics.
    pub fn apply_to_stats(&self, stats: RidershipStats) -> HeatmapResult<RidershipStats> {
        match self.midpoint_ridership {
            Some(m) => stats.with_midpoint(m),
            None => Ok(stats),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
