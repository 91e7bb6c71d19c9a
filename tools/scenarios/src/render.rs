// The demonstration scenarios. Each one draws into a fresh 256x256
// transparent canvas with a black stroke color and a white fill color.

use anyhow::{bail, Result};
use draw2d_rust::{
    FillRule, GraphicContext, LineCap, LineJoin, Path, PixfmtRgba32, RenderConfig,
    RenderingBuffer, Rgba8,
};
use std::f64::consts::PI;

use crate::PixelBuffer;

pub const WIDTH: u32 = 256;
pub const HEIGHT: u32 = 256;

type Gc<'a> = GraphicContext<PixfmtRgba32<'a>>;

const SCENARIOS: &[(&str, fn(&mut Gc<'_>) -> Result<()>)] = &[
    ("Path", path),
    ("DrawArc", draw_arc),
    ("DrawArcNegative", draw_arc_negative),
    ("DrawCubicCurve", draw_cubic_curve),
    ("CurveRectangle", curve_rectangle),
    ("Dash", dash),
    ("FillStroke", fill_stroke),
    ("FillStyle", fill_style),
    ("MultiSegmentCaps", multi_segment_caps),
    ("RoundRectangle", round_rectangle),
    ("LineCap", line_cap),
    ("LineJoin", line_join),
];

/// Names of every scenario, in rendering order.
pub fn available_scenarios() -> Vec<&'static str> {
    SCENARIOS.iter().map(|(name, _)| *name).collect()
}

/// Render the scenario called `name` (case-insensitive).
pub fn render(name: &str, config: &RenderConfig) -> Result<PixelBuffer> {
    let Some((_, scenario)) = SCENARIOS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
    else {
        bail!("unknown scenario: {}", name);
    };
    let mut buf = PixelBuffer::new(WIDTH, HEIGHT);
    {
        let rbuf = RenderingBuffer::new_packed(&mut buf.data, WIDTH, HEIGHT)?;
        let mut gc = GraphicContext::with_config(PixfmtRgba32::new(rbuf), config.clone())?;
        gc.set_stroke_color(Rgba8::BLACK);
        gc.set_fill_color(Rgba8::WHITE);
        scenario(&mut gc)?;
    }
    Ok(buf)
}

fn path(gc: &mut Gc<'_>) -> Result<()> {
    gc.move_to(10.0, 10.0);
    gc.line_to(100.0, 10.0);
    gc.line_to(100.0, 100.0);
    gc.line_to(10.0, 100.0);
    gc.line_to(10.0, 10.0);
    gc.fill_stroke(&[]);
    Ok(())
}

/// Shared body of the two arc scenarios.
fn arc_with_spokes(gc: &mut Gc<'_>, sweep_degrees: f64) -> Result<()> {
    let (xc, yc) = (128.0, 128.0);
    let (rx, ry) = (100.0, 100.0);
    let start = 45.0_f64.to_radians();
    gc.set_line_width(10.0)?;
    gc.set_line_cap(LineCap::Butt);
    gc.set_stroke_color(Rgba8::BLACK);
    gc.arc_to(xc, yc, rx, ry, start, sweep_degrees.to_radians());
    gc.stroke(&[]);

    let translucent = Rgba8::new(255, 0x33, 0x33, 0x80);
    gc.set_stroke_color(translucent);
    gc.set_fill_color(translucent);
    gc.set_line_width(6.0)?;
    gc.move_to(xc, yc);
    gc.line_to(xc + start.cos() * rx, yc + start.sin() * ry);
    gc.move_to(xc, yc);
    gc.line_to(xc - rx, yc);
    gc.stroke(&[]);

    gc.arc_to(xc, yc, 10.0, 10.0, 0.0, 2.0 * PI);
    gc.fill(&[]);
    Ok(())
}

fn draw_arc(gc: &mut Gc<'_>) -> Result<()> {
    arc_with_spokes(gc, 135.0)
}

fn draw_arc_negative(gc: &mut Gc<'_>) -> Result<()> {
    arc_with_spokes(gc, -225.0)
}

fn draw_cubic_curve(gc: &mut Gc<'_>) -> Result<()> {
    let (x, y) = (25.6, 128.0);
    let (x1, y1) = (102.4, 230.4);
    let (x2, y2) = (153.6, 25.6);
    let (x3, y3) = (230.4, 128.0);

    gc.set_fill_color(Rgba8::new(0xAA, 0xAA, 0xAA, 0xFF));
    gc.set_line_width(10.0)?;
    gc.move_to(x, y);
    gc.cubic_curve_to(x1, y1, x2, y2, x3, y3);
    gc.stroke(&[]);

    gc.set_stroke_color(Rgba8::new(0xFF, 0x33, 0x33, 0x88));
    gc.set_line_width(6.0)?;
    gc.move_to(x, y);
    gc.line_to(x1, y1);
    gc.line_to(x2, y2);
    gc.line_to(x3, y3);
    gc.stroke(&[]);
    Ok(())
}

fn curve_rectangle(gc: &mut Gc<'_>) -> Result<()> {
    let (x0, y0) = (25.6, 25.6);
    let (width, height) = (204.8, 204.8);
    let radius = 102.4;
    let (x1, y1) = (x0 + width, y0 + height);

    match (width / 2.0 < radius, height / 2.0 < radius) {
        (true, true) => {
            gc.move_to(x0, (y0 + y1) / 2.0);
            gc.cubic_curve_to(x0, y0, x0, y0, (x0 + x1) / 2.0, y0);
            gc.cubic_curve_to(x1, y0, x1, y0, x1, (y0 + y1) / 2.0);
            gc.cubic_curve_to(x1, y1, x1, y1, (x1 + x0) / 2.0, y1);
            gc.cubic_curve_to(x0, y1, x0, y1, x0, (y0 + y1) / 2.0);
        }
        (true, false) => {
            gc.move_to(x0, y0 + radius);
            gc.cubic_curve_to(x0, y0, x0, y0, (x0 + x1) / 2.0, y0);
            gc.cubic_curve_to(x1, y0, x1, y0, x1, y0 + radius);
            gc.line_to(x1, y1 - radius);
            gc.cubic_curve_to(x1, y1, x1, y1, (x1 + x0) / 2.0, y1);
            gc.cubic_curve_to(x0, y1, x0, y1, x0, y1 - radius);
        }
        (false, true) => {
            gc.move_to(x0, (y0 + y1) / 2.0);
            gc.cubic_curve_to(x0, y0, x0, y0, x0 + radius, y0);
            gc.line_to(x1 - radius, y0);
            gc.cubic_curve_to(x1, y0, x1, y0, x1, (y0 + y1) / 2.0);
            gc.cubic_curve_to(x1, y1, x1, y1, x1 - radius, y1);
            gc.line_to(x0 + radius, y1);
            gc.cubic_curve_to(x0, y1, x0, y1, x0, (y0 + y1) / 2.0);
        }
        (false, false) => {
            gc.move_to(x0, y0 + radius);
            gc.cubic_curve_to(x0, y0, x0, y0, x0 + radius, y0);
            gc.line_to(x1 - radius, y0);
            gc.cubic_curve_to(x1, y0, x1, y0, x1, y0 + radius);
            gc.line_to(x1, y1 - radius);
            gc.cubic_curve_to(x1, y1, x1, y1, x1 - radius, y1);
            gc.line_to(x0 + radius, y1);
            gc.cubic_curve_to(x0, y1, x0, y1, x0, y1 - radius);
        }
    }
    gc.close();

    gc.set_fill_color(Rgba8::new(0x80, 0x80, 0xFF, 0xFF));
    gc.set_stroke_color(Rgba8::new(0x80, 0, 0, 0x80));
    gc.set_line_width(10.0)?;
    gc.fill_stroke(&[]);
    Ok(())
}

fn dash(gc: &mut Gc<'_>) -> Result<()> {
    gc.set_line_dash(&[50.0, 10.0, 10.0, 10.0], -50.0)?;
    gc.set_line_cap(LineCap::Butt);
    gc.set_line_join(LineJoin::Bevel);
    gc.set_line_width(10.0)?;

    gc.move_to(128.0, 25.6);
    gc.line_to(128.0, 25.6);
    gc.line_to(230.4, 230.4);
    gc.rline_to(-102.4, 0.0);
    gc.cubic_curve_to(51.2, 230.4, 51.2, 128.0, 128.0, 128.0);
    gc.stroke(&[]);
    gc.set_line_dash(&[], 0.0)?;
    Ok(())
}

fn fill_stroke(gc: &mut Gc<'_>) -> Result<()> {
    gc.move_to(128.0, 25.6);
    gc.line_to(230.4, 230.4);
    gc.rline_to(-102.4, 0.0);
    gc.cubic_curve_to(51.2, 230.4, 51.2, 128.0, 128.0, 128.0);
    gc.close();

    gc.move_to(64.0, 25.6);
    gc.rline_to(51.2, 51.2);
    gc.rline_to(-51.2, 51.2);
    gc.rline_to(-51.2, -51.2);
    gc.close();

    gc.set_line_width(10.0)?;
    gc.set_fill_color(Rgba8::new(0, 0, 0xFF, 0xFF));
    gc.set_stroke_color(Rgba8::BLACK);
    gc.fill_stroke(&[]);
    Ok(())
}

/// The harness passes rectangles as two corners.
fn corner_rect(gc: &mut Gc<'_>, x1: f64, y1: f64, x2: f64, y2: f64) {
    gc.rect(x1, y1, x2 - x1, y2 - y1);
}

fn wheel(cx: f64, cy: f64, sweep: f64) -> Path {
    let mut p = Path::new();
    p.arc_to(cx, cy, 40.0, 40.0, 0.0, sweep);
    p
}

fn fill_style(gc: &mut Gc<'_>) -> Result<()> {
    gc.set_line_width(6.0)?;

    corner_rect(gc, 12.0, 12.0, 244.0, 70.0);
    let wheel1 = wheel(64.0, 64.0, 2.0 * PI);
    let wheel2 = wheel(192.0, 64.0, 2.0 * PI);
    gc.set_fill_rule(FillRule::EvenOdd);
    gc.set_fill_color(Rgba8::new(0, 0xB2, 0, 0xFF));
    gc.set_stroke_color(Rgba8::BLACK);
    gc.fill_stroke(&[&wheel1, &wheel2]);

    corner_rect(gc, 12.0, 140.0, 244.0, 198.0);
    let wheel1 = wheel(64.0, 192.0, 2.0 * PI);
    let wheel2 = wheel(192.0, 192.0, -2.0 * PI);
    gc.set_fill_rule(FillRule::Winding);
    gc.set_fill_color(Rgba8::new(0, 0, 0xE5, 0xFF));
    gc.fill_stroke(&[&wheel1, &wheel2]);
    Ok(())
}

fn multi_segment_caps(gc: &mut Gc<'_>) -> Result<()> {
    for y in [75.0, 125.0, 175.0] {
        gc.move_to(50.0, y);
        gc.line_to(200.0, y);
    }
    gc.set_line_width(30.0)?;
    gc.set_line_cap(LineCap::Round);
    gc.stroke(&[]);
    Ok(())
}

fn round_rectangle(gc: &mut Gc<'_>) -> Result<()> {
    let (x, y) = (25.6, 25.6);
    let (width, height) = (204.8, 204.8);
    let aspect = 1.0;
    let radius = height / 10.0 / aspect;
    let deg = PI / 180.0;

    gc.arc_to(x + width - radius, y + radius, radius, radius, -90.0 * deg, 90.0 * deg);
    gc.arc_to(x + width - radius, y + height - radius, radius, radius, 0.0, 90.0 * deg);
    gc.arc_to(x + radius, y + height - radius, radius, radius, 90.0 * deg, 90.0 * deg);
    gc.arc_to(x + radius, y + radius, radius, radius, 180.0 * deg, 90.0 * deg);
    gc.close();

    gc.set_fill_color(Rgba8::new(0x80, 0x80, 0xFF, 0xFF));
    gc.set_stroke_color(Rgba8::new(0x80, 0, 0, 0x80));
    gc.set_line_width(10.0)?;
    gc.fill_stroke(&[]);
    Ok(())
}

fn line_cap(gc: &mut Gc<'_>) -> Result<()> {
    gc.set_line_width(30.0)?;
    for (x, cap) in [(64.0, LineCap::Butt), (128.0, LineCap::Round), (192.0, LineCap::Square)] {
        gc.set_line_cap(cap);
        gc.move_to(x, 50.0);
        gc.line_to(x, 200.0);
        gc.stroke(&[]);
    }

    // Helping lines
    gc.set_stroke_color(Rgba8::new(0xFF, 0x33, 0x33, 0xFF));
    gc.set_line_width(2.56)?;
    for x in [64.0, 128.0, 192.0] {
        gc.move_to(x, 50.0);
        gc.line_to(x, 200.0);
    }
    gc.stroke(&[]);
    Ok(())
}

fn line_join(gc: &mut Gc<'_>) -> Result<()> {
    gc.set_line_width(40.96)?;
    for (y, join) in [
        (84.48, LineJoin::Miter),
        (161.28, LineJoin::Bevel),
        (238.08, LineJoin::Round),
    ] {
        gc.move_to(76.8, y);
        gc.rline_to(51.2, -51.2);
        gc.rline_to(51.2, 51.2);
        gc.set_line_join(join);
        gc.stroke(&[]);
    }
    Ok(())
}
