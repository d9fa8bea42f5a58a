//! Story card: gradient header, flat banner, text, then the image.

use super::content::{self, DescriptionSlot};
use super::{BannerGeometry, CardSize, CardStyle, banner_color, paint_banner};
use crate::config::{Config, LayoutConfig};
use crate::draw::{self, PangoMeasure};
use crate::error::Result;
use crate::event::EventRecord;
use crate::source::fit_image;
use image::RgbImage;

/// Gap between the last text section and the image.
const IMAGE_GAP: f64 = 20.0;

/// `layout` is the standard layout with the story banner and description
/// overrides already applied.
pub(super) fn draw(
    ctx: &cairo::Context,
    event: &EventRecord,
    image: &RgbImage,
    size: CardSize,
    layout: &LayoutConfig,
    config: &Config,
    style: &CardStyle,
) -> Result<()> {
    let story = &config.story;
    let color = banner_color(&event.date, &config.days);

    draw::fill_background(ctx, style.background);
    let gradient_height = (size.height as f64 * story.gradient_height_ratio) as u32;
    draw::fill_vertical_gradient(
        ctx,
        size.width as f64,
        gradient_height,
        color,
        style.background,
    );

    let banner = BannerGeometry::new(
        story.start_y,
        size.width,
        layout.banner_margin,
        layout.banner_height,
        layout.angle_offset,
    );
    paint_banner(ctx, &banner, color, &event.date, layout.banner_font_size, style);

    let measure = PangoMeasure::new(ctx);
    let plan = content::plan_content(
        event,
        DescriptionSlot {
            text: event.long_description(),
            max_lines: layout.max_description_lines,
        },
        layout,
        size.width,
        banner.content_start(),
        &measure,
        &style.regular,
    );
    content::paint(ctx, &plan.commands, style);

    let image_y = plan.end_y + IMAGE_GAP;
    let available = size.height.saturating_sub(story.bottom_margin) as f64 - image_y;
    if available < 1.0 {
        log::warn!(
            "No room left for the image of '{}' on the {} story card",
            event.title,
            size
        );
        return Ok(());
    }

    let fitted = fit_image(image, size.width, available as u32, layout.image_fit);
    let x = (size.width.saturating_sub(fitted.width()) / 2) as f64;
    draw::paint_image(ctx, &fitted, x, image_y.floor())?;

    Ok(())
}
