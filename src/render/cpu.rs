use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use vello_cpu::kurbo::Shape as _;
use vello_cpu::peniko::color::PremulRgba8;

use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{HeatmapError, HeatmapResult};
use crate::render::surface::{DrawSurface, FrameTargets, Paint, SurfaceProvider};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Write the frame as a straight-alpha PNG, creating parent directories.
    pub fn save_png(&self, path: impl AsRef<Path>) -> HeatmapResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }

        let mut straight = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut straight);
        }
        image::save_buffer_with_format(
            path,
            &straight,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Raster surface backed by `vello_cpu`.
///
/// Solid fills map straight onto `vello_cpu` colors. Gradients are rasterized into premultiplied
/// image paints over the pixel-aligned bounds of the shape being filled.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    pending: bool,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> HeatmapResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| HeatmapError::surface_unavailable("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| HeatmapError::surface_unavailable("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(HeatmapError::surface_unavailable(
                "surface width and height must be > 0",
            ));
        }
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            pending: false,
        })
    }

    /// Read back the committed pixels (premultiplied).
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn fill_with(&mut self, rect: Rect, shape: Fill, paint: &Paint) -> HeatmapResult<()> {
        let bounds = rect.intersect(self.canvas.rect());
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Ok(());
        }

        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let origin = match paint {
            Paint::Solid(c) => {
                let [r, g, b, a] = c.to_straight_rgba8();
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                Point::ZERO
            }
            Paint::Linear { .. } | Paint::Radial { .. } => {
                let px = bounds.expand();
                let img = gradient_image(paint, px)?;
                self.ctx.set_paint(img);
                Point::new(px.x0, px.y0)
            }
        };
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

        match shape {
            Fill::Rect => {
                let (x0, y0) = (rect.x0 - origin.x, rect.y0 - origin.y);
                let (x1, y1) = (rect.x1 - origin.x, rect.y1 - origin.y);
                self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
            }
            Fill::Circle { center, radius } => {
                let circle = vello_cpu::kurbo::Circle::new(
                    (center.x - origin.x, center.y - origin.y),
                    radius,
                );
                self.ctx.fill_path(&circle.to_path(0.1));
            }
        }
        self.pending = true;
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Fill {
    Rect,
    Circle { center: Point, radius: f64 },
}

impl DrawSurface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ctx.reset();
        self.pending = false;
        clear_pixmap_to_transparent(&mut self.pixmap);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> HeatmapResult<()> {
        self.fill_with(rect, Fill::Rect, paint)
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> HeatmapResult<()> {
        if !(radius.is_finite() && radius > 0.0 && center.is_finite()) {
            return Ok(());
        }
        let bbox = Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        self.fill_with(bbox, Fill::Circle { center, radius }, paint)
    }

    fn finish(&mut self) -> HeatmapResult<()> {
        if !self.pending {
            return Ok(());
        }
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx.reset();
        self.pending = false;
        Ok(())
    }
}

/// One main surface plus an optional background-only mirror, all on the CPU.
pub struct CpuCanvases {
    main: CpuSurface,
    background: Option<CpuSurface>,
}

impl CpuCanvases {
    pub fn new(canvas: Canvas, mirror_background: bool) -> HeatmapResult<Self> {
        let background = if mirror_background {
            Some(CpuSurface::new(canvas)?)
        } else {
            None
        };
        Ok(Self {
            main: CpuSurface::new(canvas)?,
            background,
        })
    }

    pub fn main(&self) -> &CpuSurface {
        &self.main
    }

    pub fn background(&self) -> Option<&CpuSurface> {
        self.background.as_ref()
    }
}

impl SurfaceProvider for CpuCanvases {
    fn acquire(&mut self) -> HeatmapResult<FrameTargets<'_>> {
        let background = match &mut self.background {
            Some(s) => Some(s as &mut dyn DrawSurface),
            None => None,
        };
        Ok(FrameTargets {
            main: &mut self.main,
            background,
        })
    }
}

/// Sample `paint` at pixel centers over the integer rect `px` into an image paint.
fn gradient_image(paint: &Paint, px: Rect) -> HeatmapResult<vello_cpu::Image> {
    let w = px.width().max(1.0) as u32;
    let h = px.height().max(1.0) as u32;
    let len = (w as usize).saturating_mul(h as usize).saturating_mul(4);
    let mut bytes = vec![0u8; len];
    for y in 0..h {
        for x in 0..w {
            let p = Point::new(px.x0 + f64::from(x) + 0.5, px.y0 + f64::from(y) + 0.5);
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&paint.sample(p).to_array());
        }
    }
    rgba_premul_to_image(&bytes, w, h)
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> HeatmapResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| HeatmapError::surface_unavailable("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| HeatmapError::surface_unavailable("pixmap height exceeds u16"))?;
    let pixel_count = usize::from(w) * usize::from(h);
    if bytes.len() != pixel_count * 4 {
        return Err(HeatmapError::validation("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<PremulRgba8>::with_capacity(pixel_count);
    for px in bytes.chunks_exact(4) {
        pixels.push(PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> HeatmapResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
