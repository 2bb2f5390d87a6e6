//! Time-scrubbable heatmap of transit-station ridership.
//!
//! A static dataset of per-station, per-hour ridership counts is projected onto a fixed
//! canvas, one radial glyph per record, over a background colored by time of day. A small
//! playback driver steps through the `(day, hour)` axis, either on demand or once per tick.
//!
//! - Load a [`Dataset`] and compute its [`RidershipStats`]
//! - Paint single frames with a [`FrameRenderer`] into any [`SurfaceProvider`]
//!   ([`CpuCanvases`] rasterizes on the CPU)
//! - Drive scrubbing and auto-play through a [`HeatmapView`]
#![forbid(unsafe_code)]

mod foundation;

/// Session configuration.
pub mod config;
pub(crate) mod data;
pub(crate) mod playback;
pub(crate) mod render;

pub use crate::config::{GlyphConfig, HeatmapConfig, PaletteConfig};
pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{HeatmapError, HeatmapResult};

pub use crate::data::record::{Dataset, StationRecord};
pub use crate::data::stats::RidershipStats;
pub use crate::data::time_key::{TimeKey, derive_keys};

pub use crate::render::background::{
    BackgroundSpec, Palette, select_background, select_background_for_hour_str,
};
pub use crate::render::color::{Rgb, Rgba, hex_to_channels, interpolate, interpolate_hex};
pub use crate::render::cpu::{CpuCanvases, CpuSurface, FrameRGBA};
pub use crate::render::frame::{
    FramePlan, FrameRenderer, FrameStyle, background_paint, compile_frame, execute_plan,
    glyph_paint,
};
pub use crate::render::glyph::{
    ColorStop, ColorStops, GlyphBranch, GlyphSpec, GlyphStyle, render_glyph, ridership_color,
};
pub use crate::render::projection::{GeoBounds, project};
pub use crate::render::surface::{DrawSurface, FrameTargets, Paint, SurfaceProvider};

pub use crate::playback::driver::TimeIndexDriver;
pub use crate::playback::state::{
    PlaybackEffect, PlaybackEvent, PlaybackState, Transition, transition,
};
pub use crate::playback::ticker::{Clock, ManualClock, SystemClock, Ticker};
pub use crate::playback::view::{FrameOutcome, HeatmapView, ViewCounters};
