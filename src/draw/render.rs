//! Cairo-based rendering functions for strokes.

use super::color::Color;
use super::stroke::{Point, Stroke, StrokePaint};

/// Fills the whole target with the background color.
///
/// Replaces existing pixels, so a transparent background erases the target.
pub fn render_background(ctx: &cairo::Context, background: Color) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    if let Err(err) = ctx.paint() {
        log::warn!("Failed to paint surface background: {err}");
    }
    let _ = ctx.restore();
}

/// Renders all strokes in order (first stroke = bottom layer).
pub fn render_strokes<'a>(ctx: &cairo::Context, strokes: impl IntoIterator<Item = &'a Stroke>) {
    for stroke in strokes {
        render_stroke(ctx, stroke);
    }
}

/// Renders a single finished stroke.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) {
    render_path(ctx, stroke.points(), stroke.paint());
}

/// Renders a polyline through `points` with the given paint.
///
/// A path that never leaves its first point is drawn as a filled circle
/// with diameter equal to the width.
pub fn render_path(ctx: &cairo::Context, points: &[Point], paint: &StrokePaint) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if paint.alpha == 0 {
        return;
    }

    let color = paint.source_color();
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Over);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);

    let result = if rest.iter().all(|p| p == first) {
        ctx.new_path();
        ctx.arc(
            first.x,
            first.y,
            paint.width / 2.0,
            0.0,
            std::f64::consts::PI * 2.0,
        );
        ctx.fill()
    } else {
        ctx.set_line_width(paint.width);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.set_line_join(cairo::LineJoin::Round);

        ctx.move_to(first.x, first.y);
        for p in rest {
            ctx.line_to(p.x, p.y);
        }
        ctx.stroke()
    };

    if let Err(err) = result {
        log::warn!("Failed to render stroke: {err}");
    }
    let _ = ctx.restore();
}
