//! Feed card: image on top, inclined banner, text below.

use super::content::{self, DescriptionSlot};
use super::{BannerGeometry, CardSize, CardStyle, banner_color, paint_banner};
use crate::config::Config;
use crate::draw::{self, PangoMeasure};
use crate::error::Result;
use crate::event::EventRecord;
use crate::source::fit_image;
use image::RgbImage;

pub(super) fn draw(
    ctx: &cairo::Context,
    event: &EventRecord,
    image: &RgbImage,
    size: CardSize,
    config: &Config,
    style: &CardStyle,
) -> Result<()> {
    let layout = &config.layout;
    draw::fill_background(ctx, style.background);

    let fitted = fit_image(image, size.width, layout.max_image_height, layout.image_fit);
    let x = (size.width.saturating_sub(fitted.width()) / 2) as f64;
    draw::paint_image(ctx, &fitted, x, 0.0)?;

    let banner = BannerGeometry::new(
        fitted.height(),
        size.width,
        layout.banner_margin,
        layout.banner_height,
        layout.angle_offset,
    );
    let color = banner_color(&event.date, &config.days);
    paint_banner(ctx, &banner, color, &event.date, layout.banner_font_size, style);

    let measure = PangoMeasure::new(ctx);
    let plan = content::plan_content(
        event,
        DescriptionSlot {
            text: event.short_description(),
            max_lines: layout.max_description_lines,
        },
        layout,
        size.width,
        banner.content_start(),
        &measure,
        &style.regular,
    );
    content::paint(ctx, &plan.commands, style);

    if plan.end_y > size.height as f64 {
        log::warn!(
            "Content for '{}' overflows the {} card by {:.0}px",
            event.title,
            size,
            plan.end_y - size.height as f64
        );
    }

    Ok(())
}
