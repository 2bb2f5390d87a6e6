use super::*;
use crate::data::record::StationRecord;
use crate::foundation::core::Rect;
use crate::render::color::Rgb;
use crate::render::glyph::GlyphBranch;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear,
    Rect(Rect, Paint),
    Circle(Point, f64),
    Finish,
}

struct Recording {
    canvas: Canvas,
    ops: Vec<Op>,
}

impl Recording {
    fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ops: Vec::new(),
        }
    }

    fn circles(&self) -> Vec<(Point, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Circle(p, r) => Some((*p, *r)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for Recording {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> HeatmapResult<()> {
        self.ops.push(Op::Rect(rect, paint.clone()));
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, _paint: &Paint) -> HeatmapResult<()> {
        self.ops.push(Op::Circle(center, radius));
        Ok(())
    }

    fn finish(&mut self) -> HeatmapResult<()> {
        self.ops.push(Op::Finish);
        Ok(())
    }
}

fn rec(id: &str, day: &str, hour: &str, ridership: f64, lat: f64, lon: f64) -> StationRecord {
    StationRecord {
        station_id: id.to_string(),
        day: day.to_string(),
        hour: hour.to_string(),
        station_name: format!("station {id}"),
        ridership,
        latitude: lat,
        longitude: lon,
        borough: "Manhattan".to_string(),
    }
}

fn style() -> FrameStyle {
    FrameStyle {
        canvas: Canvas {
            width: 120,
            height: 100,
        },
        ..FrameStyle::default()
    }
}

#[test]
fn single_busy_record_at_corner_renders_hot_glyph_on_day_background() {
    let b = GeoBounds::NYC;
    let ds = Dataset::new(vec![rec("1", "Mon", "8", 100.0, b.lat_max, b.lon_min)]);
    let stats = RidershipStats::new(0.0, 100.0, 50.0).unwrap();
    let key = TimeKey::new("Mon", "8");

    let plan = compile_frame(&key, &ds, &stats, &style()).unwrap();
    let dark_blue = Palette::default().dark_blue;
    assert_eq!(plan.background, BackgroundSpec::Solid(dark_blue));
    assert_eq!(plan.glyphs.len(), 1);
    let g = &plan.glyphs[0];
    assert_eq!(g.branch, GlyphBranch::Hot);
    assert_eq!(g.radius, GlyphStyle::default().max_radius);
    assert!(g.center.x.abs() < 1e-9 && g.center.y.abs() < 1e-9);

    let mut main = Recording::new(plan.canvas);
    FrameRenderer::new(style())
        .render_frame(
            FrameTargets {
                main: &mut main,
                background: None,
            },
            &key,
            &ds,
            &stats,
        )
        .unwrap();
    assert_eq!(main.ops[0], Op::Clear);
    assert!(matches!(
        &main.ops[1],
        Op::Rect(r, Paint::Solid(c)) if *r == plan.canvas.rect() && c.rgb == dark_blue
    ));
    assert_eq!(main.circles().len(), 1);
    assert_eq!(main.ops.last(), Some(&Op::Finish));
}

#[test]
fn only_matching_records_are_drawn_in_dataset_order() {
    let ds = Dataset::new(vec![
        rec("a", "Mon", "9", 10.0, 40.70, -74.00),
        rec("b", "Mon", "10", 10.0, 40.71, -74.01),
        rec("c", "Mon", "9", 90.0, 40.72, -74.02),
        rec("a", "Mon", "9", 5.0, 40.70, -74.00),
    ]);
    let stats = RidershipStats::compute(ds.records());
    let plan = compile_frame(&TimeKey::new("Mon", "9"), &ds, &stats, &style()).unwrap();
    assert_eq!(plan.glyphs.len(), 3);
    // Duplicates both render; the later low-ridership one is painted last.
    assert_eq!(plan.glyphs[0].center, plan.glyphs[2].center);
    assert_eq!(plan.glyphs[1].branch, GlyphBranch::Hot);
    assert_eq!(plan.glyphs[2].branch, GlyphBranch::Warm);
    assert!(plan.glyphs[2].radius < plan.glyphs[0].radius);
}

#[test]
fn empty_dataset_renders_background_only() {
    let ds = Dataset::default();
    let stats = RidershipStats::compute(ds.records());
    let mut main = Recording::new(style().canvas);
    let drawn = FrameRenderer::new(style())
        .render_frame(
            FrameTargets {
                main: &mut main,
                background: None,
            },
            &TimeKey::new("Mon", "22"),
            &ds,
            &stats,
        )
        .unwrap();
    assert_eq!(drawn, 0);
    assert_eq!(main.ops.len(), 3);
    assert!(main.circles().is_empty());
}

#[test]
fn zero_max_ridership_short_circuits_to_background() {
    let ds = Dataset::new(vec![rec("z", "Tue", "12", 0.0, 40.7, -74.0)]);
    let stats = RidershipStats::compute(ds.records());
    assert!(stats.is_degenerate());
    let plan = compile_frame(&TimeKey::new("Tue", "12"), &ds, &stats, &style()).unwrap();
    assert!(plan.glyphs.is_empty());
}

#[test]
fn background_is_mirrored_without_glyphs() {
    let ds = Dataset::new(vec![rec("1", "Wed", "19", 30.0, 40.75, -74.0)]);
    let stats = RidershipStats::compute(ds.records());
    let s = style();
    let mut main = Recording::new(s.canvas);
    let mut bg = Recording::new(s.canvas);
    FrameRenderer::new(s.clone())
        .render_frame(
            FrameTargets {
                main: &mut main,
                background: Some(&mut bg),
            },
            &TimeKey::new("Wed", "19"),
            &ds,
            &stats,
        )
        .unwrap();

    assert_eq!(main.circles().len(), 1);
    assert!(bg.circles().is_empty());
    assert_eq!(bg.ops.len(), 3);
    assert_eq!(bg.ops[1], main.ops[1]);
    assert!(matches!(&bg.ops[1], Op::Rect(_, Paint::Linear { .. })));
}

#[test]
fn gradient_background_spans_up_from_bottom_edge() {
    let canvas = Canvas {
        width: 10,
        height: 400,
    };
    let spec = BackgroundSpec::VerticalGradient {
        bottom: Rgb::new(255, 0, 0),
        top: Rgb::new(0, 0, 255),
        span_px: 100.0,
    };
    let Paint::Linear { start, end, stops } = background_paint(&spec, canvas) else {
        panic!("expected linear paint");
    };
    assert_eq!(start, Point::new(0.0, 400.0));
    assert_eq!(end, Point::new(0.0, 300.0));
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].color.rgb, Rgb::new(255, 0, 0));
    assert_eq!(stops[1].color.rgb, Rgb::new(0, 0, 255));
}

#[test]
fn non_numeric_hour_uses_night_background() {
    let ds = Dataset::default();
    let stats = RidershipStats::compute(ds.records());
    let plan = compile_frame(&TimeKey::new("Mon", "late"), &ds, &stats, &style()).unwrap();
    assert_eq!(plan.background, BackgroundSpec::Solid(Rgb::BLACK));
}
