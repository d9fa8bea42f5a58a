//! Cairo-based rendering functions for card decorations.

use super::color::Color;

/// Fills the whole surface with a solid color.
///
/// Should be called first; everything else is painted on top.
pub fn fill_background(ctx: &cairo::Context, color: Color) {
    ctx.save().ok();
    color.apply(ctx);
    let _ = ctx.paint(); // A failed paint leaves the surface blank, which is still a valid card
    ctx.restore().ok();
}

/// Fills a closed polygon through `points`.
///
/// Fewer than three points draw nothing.
pub fn fill_polygon(ctx: &cairo::Context, points: &[(f64, f64)], color: Color) {
    if points.len() < 3 {
        return;
    }

    ctx.save().ok();
    color.apply(ctx);

    let (x0, y0) = points[0];
    ctx.move_to(x0, y0);
    for &(x, y) in &points[1..] {
        ctx.line_to(x, y);
    }
    ctx.close_path();
    let _ = ctx.fill();

    ctx.restore().ok();
}

/// Render a straight line with butt caps.
pub fn draw_line(
    ctx: &cairo::Context,
    from: (f64, f64),
    to: (f64, f64),
    color: Color,
    thick: f64,
) {
    ctx.save().ok();
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Butt);

    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    let _ = ctx.stroke();

    ctx.restore().ok();
}

/// Paints a top-to-bottom gradient over the first `height` rows.
///
/// Each row gets a flat color interpolated from `top` (row 0) towards
/// `bottom`; rows below `height` are untouched.
pub fn fill_vertical_gradient(
    ctx: &cairo::Context,
    width: f64,
    height: u32,
    top: Color,
    bottom: Color,
) {
    if height == 0 {
        return;
    }

    ctx.save().ok();
    for row in 0..height {
        let ratio = row as f64 / height as f64;
        top.lerp(bottom, ratio).apply(ctx);
        ctx.rectangle(0.0, row as f64, width, 1.0);
        let _ = ctx.fill();
    }
    ctx.restore().ok();
}
