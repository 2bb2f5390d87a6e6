use smallvec::smallvec;

use crate::data::record::Dataset;
use crate::data::stats::RidershipStats;
use crate::data::time_key::TimeKey;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::HeatmapResult;
use crate::render::background::{BackgroundSpec, Palette, select_background_for_hour_str};
use crate::render::color::Rgba;
use crate::render::glyph::{ColorStop, GlyphSpec, GlyphStyle, render_glyph};
use crate::render::projection::GeoBounds;
use crate::render::surface::{DrawSurface, FrameTargets, Paint};

/// Everything about a frame's look that stays fixed for a session.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStyle {
    pub canvas: Canvas,
    pub bounds: GeoBounds,
    pub palette: Palette,
    pub glyph: GlyphStyle,
    /// Height of the sunrise/sunset gradient, measured up from the bottom edge.
    pub gradient_span_px: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            bounds: GeoBounds::default(),
            palette: Palette::default(),
            glyph: GlyphStyle::default(),
            gradient_span_px: 100.0,
        }
    }
}

/// Backend-agnostic description of one frame: background first, then glyphs in dataset order.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub key: TimeKey,
    pub canvas: Canvas,
    pub background: BackgroundSpec,
    pub glyphs: Vec<GlyphSpec>,
}

/// Build the plan for `key`. Pure: no surface access.
///
/// Degenerate statistics produce a background-only plan.
#[tracing::instrument(skip(key, dataset, stats, style), fields(key = %key))]
pub fn compile_frame(
    key: &TimeKey,
    dataset: &Dataset,
    stats: &RidershipStats,
    style: &FrameStyle,
) -> HeatmapResult<FramePlan> {
    let background =
        select_background_for_hour_str(&key.hour, &style.palette, style.gradient_span_px);

    let glyphs = if stats.is_degenerate() {
        if !dataset.is_empty() {
            tracing::warn!(
                max = stats.max(),
                "ridership stats are degenerate, rendering background only"
            );
        }
        Vec::new()
    } else {
        dataset
            .at(&key.day, &key.hour)
            .map(|r| render_glyph(r, stats, &style.bounds, style.canvas, &style.glyph))
            .collect::<HeatmapResult<Vec<_>>>()?
    };

    tracing::debug!(glyphs = glyphs.len(), "compiled frame");
    Ok(FramePlan {
        key: key.clone(),
        canvas: style.canvas,
        background,
        glyphs,
    })
}

/// The single place a [`BackgroundSpec`] turns into paint.
pub fn background_paint(spec: &BackgroundSpec, canvas: Canvas) -> Paint {
    match *spec {
        BackgroundSpec::Solid(c) => Paint::Solid(Rgba::opaque(c)),
        BackgroundSpec::VerticalGradient {
            bottom,
            top,
            span_px,
        } => {
            let h = f64::from(canvas.height);
            Paint::Linear {
                start: Point::new(0.0, h),
                end: Point::new(0.0, h - span_px),
                stops: smallvec![
                    ColorStop::new(0.0, Rgba::opaque(bottom)),
                    ColorStop::new(1.0, Rgba::opaque(top)),
                ],
            }
        }
    }
}

pub fn glyph_paint(glyph: &GlyphSpec) -> Paint {
    Paint::Radial {
        center: glyph.center,
        radius: glyph.radius,
        stops: glyph.stops.clone(),
    }
}

fn paint_background(
    surface: &mut dyn DrawSurface,
    paint: &Paint,
    canvas: Canvas,
) -> HeatmapResult<()> {
    surface.clear();
    surface.fill_rect(canvas.rect(), paint)
}

/// Paint a compiled plan: full clear, background, then every glyph. The background is mirrored
/// onto `targets.background` when present.
pub fn execute_plan(plan: &FramePlan, targets: FrameTargets<'_>) -> HeatmapResult<()> {
    let FrameTargets { main, background } = targets;
    let paint = background_paint(&plan.background, plan.canvas);

    paint_background(main, &paint, plan.canvas)?;
    if let Some(bg) = background {
        paint_background(bg, &paint, plan.canvas)?;
        bg.finish()?;
    }

    for glyph in &plan.glyphs {
        main.fill_circle(glyph.center, glyph.radius, &glyph_paint(glyph))?;
    }
    main.finish()
}

/// Compiles and paints frames for one session's style.
#[derive(Clone, Debug, Default)]
pub struct FrameRenderer {
    style: FrameStyle,
}

impl FrameRenderer {
    pub fn new(style: FrameStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &FrameStyle {
        &self.style
    }

    /// Paint the frame for `key`; returns the number of glyphs drawn.
    pub fn render_frame(
        &self,
        targets: FrameTargets<'_>,
        key: &TimeKey,
        dataset: &Dataset,
        stats: &RidershipStats,
    ) -> HeatmapResult<usize> {
        let plan = compile_frame(key, dataset, stats, &self.style)?;
        execute_plan(&plan, targets)?;
        Ok(plan.glyphs.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
