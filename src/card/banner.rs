//! Day-colored date banner.

use super::CardStyle;
use crate::config::DayColors;
use crate::draw::{self, Color};

/// Gap between the banner's lowest edge and the content below it.
const CONTENT_GAP: u32 = 30;

/// Day names recognized in the date line, checked in this order.
const FRIDAY: &[&str] = &["VENDREDI", "VIERNES", "FRIDAY"];
const THURSDAY: &[&str] = &["JEUDI", "JUEVES", "THURSDAY"];
const WEDNESDAY: &[&str] = &["MERCREDI", "MIERCOLES", "MIÉRCOLES", "WEDNESDAY"];

/// Picks the banner color from the weekday mentioned in `date`.
///
/// Matching is a case-insensitive substring search (French, Spanish, and
/// English names); dates without a known day get the `other` color.
pub fn banner_color(date: &str, days: &DayColors) -> Color {
    let day = date.to_uppercase();
    let mentions = |names: &[&str]| names.iter().any(|name| day.contains(name));

    let spec = if mentions(FRIDAY) {
        &days.friday
    } else if mentions(THURSDAY) {
        &days.thursday
    } else if mentions(WEDNESDAY) {
        &days.wednesday
    } else {
        &days.other
    };
    spec.to_color()
}

/// Placement of the (optionally inclined) banner band.
///
/// With a non-zero `angle_offset` the left edge sits lower than the right,
/// giving the band a slight tilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerGeometry {
    pub start_y: u32,
    pub card_width: u32,
    pub margin: u32,
    pub height: u32,
    pub angle_offset: u32,
}

impl BannerGeometry {
    pub fn new(start_y: u32, card_width: u32, margin: u32, height: u32, angle_offset: u32) -> Self {
        Self {
            start_y,
            card_width,
            margin,
            height,
            angle_offset,
        }
    }

    /// Corner points: top-left, top-right, bottom-right, bottom-left.
    pub fn points(&self) -> [(f64, f64); 4] {
        let left = self.margin as f64;
        let right = self.card_width.saturating_sub(self.margin) as f64;
        let top = self.start_y as f64;
        let height = self.height as f64;
        let offset = self.angle_offset as f64;

        [
            (left, top + offset),
            (right, top),
            (right, top + height),
            (left, top + height + offset),
        ]
    }

    /// First y coordinate available to the content below the banner.
    pub fn content_start(&self) -> u32 {
        self.start_y + self.height + self.angle_offset + CONTENT_GAP
    }

    /// Top of the date text for a font of `font_size` pixels.
    pub fn text_y(&self, font_size: f64) -> f64 {
        let inner = (self.height as f64 - font_size) / 2.0;
        self.start_y as f64 + inner.floor() + (self.angle_offset / 2) as f64
    }
}

/// Fills the band in `color` and centers the date on it.
pub fn paint_banner(
    ctx: &cairo::Context,
    geometry: &BannerGeometry,
    color: Color,
    date: &str,
    font_size: f64,
    style: &CardStyle,
) {
    draw::fill_polygon(ctx, &geometry.points(), color);
    draw::draw_text_centered(
        ctx,
        geometry.text_y(font_size),
        geometry.card_width as f64,
        date.trim(),
        style.banner_text,
        &style.bold,
        font_size,
    );
}
