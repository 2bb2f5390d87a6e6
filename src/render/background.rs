use crate::render::color::{Rgb, interpolate};

/// The four named colors the time-of-day bands blend between.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    pub pink: Rgb,
    pub orange: Rgb,
    pub dark_blue: Rgb,
    pub black: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            pink: Rgb::new(0xC6, 0x3C, 0xBC),
            orange: Rgb::new(0xFF, 0x45, 0x00),
            dark_blue: Rgb::new(0x14, 0x12, 0x33),
            black: Rgb::BLACK,
        }
    }
}

/// Background paint for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BackgroundSpec {
    /// Fill the whole canvas with one color.
    Solid(Rgb),
    /// Vertical gradient running upward from the canvas bottom edge.
    ///
    /// `bottom` is the color at offset 0 (the bottom edge) and `top` at offset 1, `span_px`
    /// above the bottom. Above the span the top color continues.
    VerticalGradient {
        bottom: Rgb,
        top: Rgb,
        span_px: f64,
    },
}

/// Map an hour of day to the background.
///
/// Bands: sunrise `(5, 7]`, day `[7, 14)` and `[15, 18)`, sunset `[18, 20)`, night otherwise.
/// Hours 14 and 20 match no band and fall through to night.
pub fn select_background(hour: i64, palette: &Palette, span_px: f64) -> BackgroundSpec {
    if hour > 5 && hour <= 7 {
        let ratio = (hour - 5) as f64 / 2.0;
        BackgroundSpec::VerticalGradient {
            bottom: interpolate(palette.pink, palette.orange, ratio),
            top: interpolate(palette.black, palette.dark_blue, ratio),
            span_px,
        }
    } else if (7..14).contains(&hour) || (15..18).contains(&hour) {
        BackgroundSpec::Solid(palette.dark_blue)
    } else if (18..20).contains(&hour) {
        let ratio = (hour - 18) as f64 / 2.0;
        BackgroundSpec::VerticalGradient {
            bottom: interpolate(palette.orange, palette.pink, ratio),
            top: interpolate(palette.dark_blue, palette.black, ratio),
            span_px,
        }
    } else {
        BackgroundSpec::Solid(palette.black)
    }
}

/// [`select_background`] for a raw hour string; unparsable hours get the night color.
pub fn select_background_for_hour_str(
    hour: &str,
    palette: &Palette,
    span_px: f64,
) -> BackgroundSpec {
    match hour.trim().parse::<i64>() {
        Ok(h) => select_background(h, palette, span_px),
        Err(_) => {
            tracing::debug!(hour, "hour is not an integer, using night background");
            BackgroundSpec::Solid(palette.black)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
