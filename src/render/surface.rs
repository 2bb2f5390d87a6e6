use crate::data::time_key::TimeKey;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
use crate::foundation::error::HeatmapResult;
use crate::foundation::math::lerp_u8;
use crate::render::color::Rgba;
use crate::render::glyph::{ColorStop, ColorStops};

/// Fill style for rectangles and circles.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Gradient along the segment `start -> end`; padded with the end stops outside it.
    Linear {
        start: Point,
        end: Point,
        stops: ColorStops,
    },
    /// Gradient from `center` (offset 0) out to `radius` (offset 1).
    Radial {
        center: Point,
        radius: f64,
        stops: ColorStops,
    },
}

impl Paint {
    /// Premultiplied color of the paint at `p` (user-space pixel coordinates).
    pub fn sample(&self, p: Point) -> Rgba8Premul {
        match self {
            Paint::Solid(c) => c.to_premul(),
            Paint::Linear { start, end, stops } => {
                let d = *end - *start;
                let len2 = d.length_squared();
                let t = if len2 <= 0.0 {
                    0.0
                } else {
                    (p - *start).dot(d) / len2
                };
                sample_stops(stops, t)
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let t = if *radius <= 0.0 {
                    1.0
                } else {
                    (p - *center).length() / radius
                };
                sample_stops(stops, t)
            }
        }
    }
}

/// Piecewise-linear blend over ordered stops, interpolated in premultiplied space.
pub fn sample_stops(stops: &[ColorStop], t: f64) -> Rgba8Premul {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba8Premul::transparent();
    };
    let t = if t.is_finite() {
        t.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if t <= f64::from(first.offset) {
        return first.color.to_premul();
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (ao, bo) = (f64::from(a.offset), f64::from(b.offset));
        if t <= bo {
            let span = bo - ao;
            let local = if span <= 0.0 { 1.0 } else { (t - ao) / span };
            let ca = a.color.to_premul();
            let cb = b.color.to_premul();
            return Rgba8Premul {
                r: lerp_u8(ca.r, cb.r, local),
                g: lerp_u8(ca.g, cb.g, local),
                b: lerp_u8(ca.b, cb.b, local),
                a: lerp_u8(ca.a, cb.a, local),
            };
        }
    }
    last.color.to_premul()
}

/// 2D raster target the frame renderer paints onto.
///
/// Painting between [`DrawSurface::clear`] and [`DrawSurface::finish`] makes up one frame.
pub trait DrawSurface {
    fn canvas(&self) -> Canvas;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> HeatmapResult<()>;

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> HeatmapResult<()>;

    /// Commit everything painted since the last clear.
    fn finish(&mut self) -> HeatmapResult<()> {
        Ok(())
    }
}

/// Surfaces for one frame: the main target and an optional background-only mirror.
pub struct FrameTargets<'a> {
    pub main: &'a mut dyn DrawSurface,
    pub background: Option<&'a mut dyn DrawSurface>,
}

/// Hands out drawing surfaces per frame.
pub trait SurfaceProvider {
    /// Fails with [`crate::HeatmapError::SurfaceUnavailable`] when no surface can be acquired;
    /// the frame is then skipped.
    fn acquire(&mut self) -> HeatmapResult<FrameTargets<'_>>;

    /// Called after a frame completed on the acquired surfaces.
    fn present(&mut self, _key: &TimeKey, _index: usize) -> HeatmapResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
