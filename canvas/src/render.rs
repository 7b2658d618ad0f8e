//! Rendering: redraws the annotation layer of the pitch from scratch.
//!
//! Drawing goes through the [`Painter`] trait so the scene logic (what to draw,
//! in which order, with which arrowhead geometry) is testable natively. The
//! browser implementation, [`CanvasPainter`], is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`].
//!
//! Points are stored as percentages but arrowhead angles are computed in pixel
//! space, so heads stay visually correct on a non-square pitch.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH_PX};
use crate::doc::{Path, PathKind};
use crate::surface::{Point, Rect};

/// Minimal 2D drawing surface used by the scene renderer.
pub trait Painter {
    type Error;

    /// Wipe the whole surface.
    ///
    /// # Errors
    ///
    /// Backend-specific failure.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Stroke an open polyline with round caps and joins.
    ///
    /// # Errors
    ///
    /// Backend-specific failure.
    fn stroke_polyline(&mut self, points: &[Point], color: &str, width: f64) -> Result<(), Self::Error>;

    /// Fill a closed triangle.
    ///
    /// # Errors
    ///
    /// Backend-specific failure.
    fn fill_triangle(&mut self, vertices: [Point; 3], color: &str) -> Result<(), Self::Error>;
}

/// Arrowhead triangle for a stroke ending at `tip` and arriving from `tail`,
/// both in pixels. Returns `[tip, left base, right base]`.
#[must_use]
pub fn arrow_head(tail: Point, tip: Point) -> [Point; 3] {
    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    let base = |a: f64| Point {
        x: tip.x - ARROW_HEAD_LENGTH_PX * a.cos(),
        y: tip.y - ARROW_HEAD_LENGTH_PX * a.sin(),
    };
    [tip, base(angle - ARROW_HEAD_ANGLE), base(angle + ARROW_HEAD_ANGLE)]
}

/// Draw the full annotation layer: clear, committed paths bottom to top, then
/// the live stroke if any.
///
/// `width`/`height` are the pitch size in CSS pixels. A collapsed pitch draws
/// nothing.
///
/// # Errors
///
/// Propagates the first painter failure.
pub fn draw<P: Painter>(
    painter: &mut P,
    drawings: &[Path],
    live: Option<&Path>,
    width: f64,
    height: f64,
) -> Result<(), P::Error> {
    let surface = Rect::new(0.0, 0.0, width, height);
    if surface.is_degenerate() {
        return Ok(());
    }
    painter.clear(width, height)?;
    for path in drawings.iter().chain(live) {
        draw_path(painter, path, &surface)?;
    }
    Ok(())
}

/// Draw one path. Paths with fewer than two points are skipped.
///
/// # Errors
///
/// Propagates painter failures.
pub fn draw_path<P: Painter>(painter: &mut P, path: &Path, surface: &Rect) -> Result<(), P::Error> {
    if path.is_degenerate() {
        return Ok(());
    }
    let pixels: Vec<Point> = path.points.iter().filter_map(|p| surface.to_pixels(*p)).collect();
    if pixels.len() < path.points.len() {
        return Ok(());
    }
    painter.stroke_polyline(&pixels, &path.color, path.width)?;

    if path.kind == PathKind::Arrow {
        let head = path.last_segment().and_then(|(tail, tip)| Some((surface.to_pixels(tail)?, surface.to_pixels(tip)?)));
        if let Some((tail, tip)) = head {
            painter.fill_triangle(arrow_head(tail, tip), &path.color)?;
        }
    }
    Ok(())
}

// =============================================================
// Browser backend
// =============================================================

/// [`Painter`] over a browser 2D context, scaled for the device pixel ratio.
pub struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
    dpr: f64,
}

impl<'a> CanvasPainter<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d, dpr: f64) -> Self {
        Self { ctx, dpr }
    }
}

impl Painter for CanvasPainter<'_> {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], color: &str, width: f64) -> Result<(), JsValue> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");

        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.stroke();
        Ok(())
    }

    fn fill_triangle(&mut self, vertices: [Point; 3], color: &str) -> Result<(), JsValue> {
        let [a, b, c] = vertices;
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(a.x, a.y);
        self.ctx.line_to(b.x, b.y);
        self.ctx.line_to(c.x, c.y);
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }
}
