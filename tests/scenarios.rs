//! End-to-end rendering properties checked through the public API.

use std::f64::consts::PI;

use draw2d_rust::conv_curve::flatten_path;
use draw2d_rust::conv_stroke::ConvStroke;
use draw2d_rust::math::calc_polygon_area;
use draw2d_rust::vcgen_dash::VcgenDash;
use draw2d_rust::{
    Draw2dError, FillRule, GraphicContext, LineCap, LineJoin, Path, PixfmtRgba32, PointD,
    RenderingBuffer, Rgba8,
};
use rstest::rstest;

const W: u32 = 256;
const H: u32 = 256;

fn render<F>(draw: F) -> Vec<u8>
where
    F: FnOnce(&mut GraphicContext<PixfmtRgba32<'_>>),
{
    let mut buf = vec![0u8; (W * H * 4) as usize];
    {
        let rbuf = RenderingBuffer::new_packed(&mut buf, W, H).unwrap();
        let mut gc = GraphicContext::new(PixfmtRgba32::new(rbuf));
        draw(&mut gc);
    }
    buf
}

fn px(buf: &[u8], x: u32, y: u32) -> [u8; 4] {
    let i = ((y * W + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

fn covered(buf: &[u8]) -> usize {
    buf.chunks_exact(4).filter(|p| p[3] != 0).count()
}

// ============================================================================
// Square scenario
// ============================================================================

#[test]
fn test_square_fill_stroke() {
    let buf = render(|gc| {
        gc.set_stroke_color(Rgba8::BLACK);
        gc.set_fill_color(Rgba8::WHITE);
        gc.move_to(10.0, 10.0);
        gc.line_to(100.0, 10.0);
        gc.line_to(100.0, 100.0);
        gc.line_to(10.0, 100.0);
        gc.line_to(10.0, 10.0);
        gc.fill_stroke(&[]);
    });

    let black = [0, 0, 0, 255];
    let white = [255, 255, 255, 255];
    for t in [20, 50, 90] {
        assert_eq!(px(&buf, t, 9), black, "top edge at x={}", t);
        assert_eq!(px(&buf, t, 99), black, "bottom edge at x={}", t);
        assert_eq!(px(&buf, 9, t), black, "left edge at y={}", t);
        assert_eq!(px(&buf, 99, t), black, "right edge at y={}", t);

        assert_eq!(px(&buf, t, 8)[3], 0, "above the square at x={}", t);
        assert_eq!(px(&buf, t, 100)[3], 0, "below the square at x={}", t);
        assert_eq!(px(&buf, 8, t)[3], 0, "left of the square at y={}", t);
        assert_eq!(px(&buf, 100, t)[3], 0, "right of the square at y={}", t);
    }
    for y in (12..98).step_by(7) {
        for x in (12..98).step_by(7) {
            assert_eq!(px(&buf, x, y), white, "interior at ({}, {})", x, y);
        }
    }
    assert_eq!(px(&buf, 200, 200)[3], 0);
}

// ============================================================================
// Fill rules
// ============================================================================

fn disc(cx: f64, sweep: f64) -> Path {
    let mut p = Path::new();
    p.arc_to(cx, 128.0, 50.0, 50.0, 0.0, sweep);
    p.close();
    p
}

#[rstest]
#[case::same_direction_winding(2.0 * PI, FillRule::Winding, true)]
#[case::same_direction_even_odd(2.0 * PI, FillRule::EvenOdd, false)]
#[case::opposite_direction_winding(-2.0 * PI, FillRule::Winding, false)]
#[case::opposite_direction_even_odd(-2.0 * PI, FillRule::EvenOdd, false)]
fn test_overlapping_discs(#[case] second_sweep: f64, #[case] rule: FillRule, #[case] overlap: bool) {
    let a = disc(100.0, 2.0 * PI);
    let b = disc(156.0, second_sweep);
    let buf = render(|gc| {
        gc.set_fill_color(Rgba8::new(0, 0, 255, 255));
        gc.set_fill_rule(rule);
        gc.fill(&[&a, &b]);
    });

    assert_eq!(px(&buf, 128, 128)[3] != 0, overlap, "overlap coverage");
    assert_ne!(px(&buf, 70, 128)[3], 0, "left disc body");
    assert_ne!(px(&buf, 186, 128)[3], 0, "right disc body");
    assert_eq!(px(&buf, 10, 128)[3], 0);
}

// ============================================================================
// Dashing
// ============================================================================

fn dash_line(phase: f64) -> Vec<Vec<PointD>> {
    let mut dash = VcgenDash::new();
    dash.set_pattern(&[50.0, 10.0, 10.0, 10.0], phase).unwrap();
    let line = draw2d_rust::array::Polyline::from_points(
        vec![PointD::new(0.0, 0.0), PointD::new(400.0, 0.0)],
        false,
    );
    let mut out = Vec::new();
    dash.generate(&line, &mut out);
    out.into_iter().map(|p| p.points).collect()
}

#[rstest]
#[case(30.0, -50.0)]
#[case(30.0, 110.0)]
#[case(30.0, 30.0 - 4.0 * 80.0)]
#[case(0.0, 80.0)]
#[case(12.5, -67.5)]
fn test_dash_phase_equivalence(#[case] phase: f64, #[case] equivalent: f64) {
    let a = dash_line(phase);
    let b = dash_line(equivalent);
    assert_eq!(a.len(), b.len(), "dash count for {} vs {}", phase, equivalent);
    for (da, db) in a.iter().zip(&b) {
        assert_eq!(da.len(), db.len());
        for (pa, pb) in da.iter().zip(db) {
            assert!(
                (pa.x - pb.x).abs() < 1e-9 && (pa.y - pb.y).abs() < 1e-9,
                "Expected {:?}, got {:?}",
                pa,
                pb
            );
        }
    }
}

#[test]
fn test_negative_phase_starts_mid_dash() {
    // Phase 30 of [50, 10, 10, 10] leaves 20 units of the first dash.
    let dashes = dash_line(-50.0);
    let first = &dashes[0];
    assert!((first[0].x - 0.0).abs() < 1e-9);
    assert!((first[first.len() - 1].x - 20.0).abs() < 1e-9);
    let second = &dashes[1];
    assert!((second[0].x - 30.0).abs() < 1e-9);
    assert!((second[second.len() - 1].x - 40.0).abs() < 1e-9);
}

// ============================================================================
// Flattening
// ============================================================================

#[rstest]
#[case(1.0, 2.0 * PI)]
#[case(10.0, 2.0 * PI)]
#[case(100.0, -2.0 * PI)]
#[case(200.0, 1.5 * PI)]
#[case(150.0, -PI / 3.0)]
#[case(1000.0, 2.0 * PI)]
#[case(2000.0, 2.0 * PI)]
#[case(5000.0, -2.0 * PI)]
fn test_arc_flattening_stays_near_circle(#[case] r: f64, #[case] sweep: f64) {
    let eps = 0.25;
    let (cx, cy) = (300.0, 300.0);
    let mut path = Path::new();
    path.arc_to(cx, cy, r, r, 0.3, sweep);
    let polylines = flatten_path(&path, eps);
    assert_eq!(polylines.len(), 1);

    let pts = &polylines[0].points;
    assert!(pts.len() >= 2);
    for w in pts.windows(2) {
        for p in [w[0], w[0].mid(&w[1])] {
            let d = (p.distance(&PointD::new(cx, cy)) - r).abs();
            assert!(d <= eps, "Expected deviation <= {}, got {}", eps, d);
        }
    }
}

/// Small deterministic generator for control points.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as f64 / (1u64 << 31) as f64) * 256.0
    }
}

#[test]
fn test_flattened_length_converges_monotonically() {
    let mut rng = Lcg(0x5eed);
    for _ in 0..200 {
        let mut path = Path::new();
        path.move_to(rng.next(), rng.next());
        path.cubic_curve_to(
            rng.next(),
            rng.next(),
            rng.next(),
            rng.next(),
            rng.next(),
            rng.next(),
        );

        let mut prev = 0.0;
        for eps in [2.0, 1.0, 0.5, 0.25, 0.125, 0.0625] {
            let len: f64 = flatten_path(&path, eps).iter().map(|p| p.length()).sum();
            assert!(
                len >= prev - 1e-9,
                "length shrank from {} to {} at tolerance {}",
                prev,
                len,
                eps
            );
            prev = len;
        }
    }
}

// ============================================================================
// Stroking
// ============================================================================

#[rstest]
#[case(10.0, 1.0)]
#[case(40.0, 4.0)]
#[case(100.0, 10.0)]
#[case(7.5, 3.0)]
fn test_closed_square_outline_area(#[case] s: f64, #[case] w: f64) {
    let mut path = Path::new();
    path.rect(50.0, 50.0, s, s);

    let mut stroke = ConvStroke::new();
    stroke.set_width(w);
    stroke.set_line_join(LineJoin::Miter);
    let outline = stroke.outline(&flatten_path(&path, 0.25));

    let area: f64 = outline.iter().map(|p| calc_polygon_area(&p.points)).sum();
    let expected = 4.0 * s * w;
    assert!(
        (area.abs() - expected).abs() < 1e-6,
        "Expected {}, got {}",
        expected,
        area
    );
}

#[test]
fn test_closed_square_stroke_pixels() {
    let buf = render(|gc| {
        gc.set_line_width(4.0).unwrap();
        gc.rect(20.0, 20.0, 40.0, 40.0);
        gc.stroke(&[]);
    });
    // Outer rail 18..62, inner rail 22..58.
    assert_eq!(covered(&buf), 44 * 44 - 36 * 36);
    assert_eq!(px(&buf, 40, 40)[3], 0);
    assert_eq!(px(&buf, 18, 18), [0, 0, 0, 255]);
}

#[test]
fn test_overlapping_subpath_strokes_do_not_cancel() {
    let buf = render(|gc| {
        gc.set_line_width(10.0).unwrap();
        gc.rect(40.0, 40.0, 60.0, 60.0);
        gc.move_to(100.0, 40.0);
        gc.line_to(100.0, 100.0);
        gc.line_to(40.0, 100.0);
        gc.line_to(40.0, 40.0);
        gc.close();
        gc.stroke(&[]);
    });
    assert_eq!(px(&buf, 100, 70), [0, 0, 0, 255]);
    assert_eq!(px(&buf, 70, 40), [0, 0, 0, 255]);
}

// ============================================================================
// Bounded work on extreme input
// ============================================================================

#[rstest]
#[case(&[1e-20, 1e-20])]
#[case(&[1e-20, 10.0])]
#[case(&[1e-3, 1e-3])]
#[case(&[f64::MIN_POSITIVE, f64::MIN_POSITIVE, 5.0])]
fn test_fine_dash_patterns_finish(#[case] pattern: &[f64]) {
    let buf = render(|gc| {
        gc.set_line_width(4.0).unwrap();
        gc.set_line_dash(pattern, 0.0).unwrap();
        gc.move_to(20.0, 128.0);
        gc.line_to(236.0, 128.0);
        gc.cubic_curve_to(236.0, 20.0, 20.0, 20.0, 20.0, 128.0);
        gc.stroke(&[]);
    });
    assert!(covered(&buf) < (W * H) as usize);
}

#[test]
fn test_subnormal_dash_strokes_solid() {
    let solid = render(|gc| {
        gc.set_line_width(4.0).unwrap();
        gc.move_to(20.0, 128.0);
        gc.line_to(236.0, 128.0);
        gc.stroke(&[]);
    });
    let dashed = render(|gc| {
        gc.set_line_width(4.0).unwrap();
        gc.set_line_dash(&[1e-20, 1e-20], 0.0).unwrap();
        gc.move_to(20.0, 128.0);
        gc.line_to(236.0, 128.0);
        gc.stroke(&[]);
    });
    assert!(solid == dashed);
}

#[rstest]
#[case(LineCap::Round, LineJoin::Round)]
#[case(LineCap::Square, LineJoin::Miter)]
#[case(LineCap::Butt, LineJoin::Bevel)]
fn test_huge_line_width_finishes(#[case] cap: LineCap, #[case] join: LineJoin) {
    let buf = render(|gc| {
        gc.set_line_width(1e20).unwrap();
        gc.set_line_cap(cap);
        gc.set_line_join(join);
        gc.move_to(100.0, 100.0);
        gc.line_to(200.0, 100.0);
        gc.line_to(200.0, 200.0);
        gc.stroke(&[]);
    });
    assert_eq!(buf.len(), (W * H * 4) as usize);
}

#[test]
fn test_huge_round_cap_outline_is_bounded() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0);
    path.line_to(100.0, 0.0);
    let mut stroke = ConvStroke::new();
    stroke.set_width(1e20);
    stroke.set_line_cap(LineCap::Round);
    let outline = stroke.outline(&flatten_path(&path, 0.25));
    let points: usize = outline.iter().map(|p| p.points.len()).sum();
    assert!(points <= 2 * (draw2d_rust::math_stroke::MAX_ARC_STEPS + 2) + 4);
    assert!(outline.iter().flat_map(|p| &p.points).all(|p| p.is_finite()));
}

// ============================================================================
// Determinism
// ============================================================================

fn busy_drawing(gc: &mut GraphicContext<PixfmtRgba32<'_>>) {
    gc.set_line_width(6.0).unwrap();
    gc.set_line_join(LineJoin::Round);
    gc.set_line_cap(LineCap::Square);
    gc.set_fill_color(Rgba8::new(0x80, 0x80, 0xFF, 0xFF));
    gc.set_stroke_color(Rgba8::new(0x80, 0, 0, 0x80));
    gc.move_to(25.6, 128.0);
    gc.cubic_curve_to(102.4, 230.4, 153.6, 25.6, 230.4, 128.0);
    gc.arc_to(128.0, 128.0, 60.0, 40.0, 0.0, 1.5 * PI);
    gc.close();
    gc.set_line_dash(&[12.0, 4.0], 3.0).unwrap();
    gc.fill_stroke(&[]);
}

#[test]
fn test_rerender_is_bit_identical() {
    let a = render(busy_drawing);
    let b = render(busy_drawing);
    assert!(covered(&a) > 0);
    assert!(a == b, "two renders of the same drawing differ");
}

#[test]
fn test_opaque_redraw_is_stable() {
    fn draw(gc: &mut GraphicContext<PixfmtRgba32<'_>>) {
        gc.begin_path();
        gc.set_fill_color(Rgba8::new(10, 200, 30, 255));
        gc.arc_to(128.0, 128.0, 70.0, 70.0, 0.0, 2.0 * PI);
        gc.fill(&[]);
    }
    let once = render(draw);
    let twice = render(|gc| {
        draw(gc);
        draw(gc);
    });
    assert!(once == twice);
}

// ============================================================================
// Enum parsing
// ============================================================================

#[rstest]
#[case("butt", LineCap::Butt)]
#[case("Round", LineCap::Round)]
#[case("SQUARE", LineCap::Square)]
fn test_parse_line_cap(#[case] name: &str, #[case] expected: LineCap) {
    assert_eq!(name.parse::<LineCap>().unwrap(), expected);
}

#[rstest]
#[case("miter", LineJoin::Miter)]
#[case("round", LineJoin::Round)]
#[case("Bevel", LineJoin::Bevel)]
fn test_parse_line_join(#[case] name: &str, #[case] expected: LineJoin) {
    assert_eq!(name.parse::<LineJoin>().unwrap(), expected);
}

#[rstest]
#[case("evenodd", FillRule::EvenOdd)]
#[case("even-odd", FillRule::EvenOdd)]
#[case("winding", FillRule::Winding)]
#[case("nonzero", FillRule::Winding)]
fn test_parse_fill_rule(#[case] name: &str, #[case] expected: FillRule) {
    assert_eq!(name.parse::<FillRule>().unwrap(), expected);
}

#[rstest]
#[case(0, LineCap::Round, LineJoin::Bevel, FillRule::EvenOdd)]
#[case(1, LineCap::Butt, LineJoin::Round, FillRule::Winding)]
fn test_enum_codes(
    #[case] code: u8,
    #[case] cap: LineCap,
    #[case] join: LineJoin,
    #[case] rule: FillRule,
) {
    assert_eq!(LineCap::try_from(code).unwrap(), cap);
    assert_eq!(LineJoin::try_from(code).unwrap(), join);
    assert_eq!(FillRule::try_from(code).unwrap(), rule);
}

#[test]
fn test_invalid_enum_values() {
    assert!(matches!("zigzag".parse::<LineCap>(), Err(Draw2dError::InvalidLineCap(_))));
    assert!(matches!("spiky".parse::<LineJoin>(), Err(Draw2dError::InvalidLineJoin(_))));
    assert!(matches!("odd".parse::<FillRule>(), Err(Draw2dError::InvalidFillRule(_))));
    assert!(LineCap::try_from(3).is_err());
    assert!(LineJoin::try_from(7).is_err());
    assert!(FillRule::try_from(2).is_err());
}
