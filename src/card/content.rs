//! Text sections below the banner.
//!
//! Layout is planned first as a list of positioned commands, then painted.
//! Planning only needs a [`TextMeasure`], which keeps positions testable
//! without a font stack.

use super::CardStyle;
use crate::config::LayoutConfig;
use crate::draw::{self, FontDescriptor, TextMeasure};
use crate::event::EventRecord;

/// Padding between the banner gap and the first section.
const TOP_PADDING: f64 = 20.0;
/// Advance after the cost and location lines.
const COMPACT_SPACING: f64 = 50.0;
/// Advance after the separator line.
const SEPARATOR_SPACING: f64 = 30.0;

const CATEGORY_ICON: &str = "🎉";
const COST_ICON: &str = "🎫";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// One positioned drawing step.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Text {
        x: f64,
        y: f64,
        text: String,
        weight: Weight,
        size: f64,
    },
    Separator {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
    },
}

/// Planned content and where it ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPlan {
    pub commands: Vec<PaintCommand>,
    pub end_y: f64,
}

/// Which description and how many lines of it a card shows.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionSlot<'a> {
    pub text: Option<&'a str>,
    pub max_lines: usize,
}

/// Lays out category, title, description, cost, separator, and location.
///
/// Sections whose field is absent are skipped without consuming space. The
/// separator is only placed when a location follows it.
pub fn plan_content(
    event: &EventRecord,
    description: DescriptionSlot<'_>,
    layout: &LayoutConfig,
    card_width: u32,
    start_y: u32,
    measure: &dyn TextMeasure,
    regular: &FontDescriptor,
) -> ContentPlan {
    let left = layout.left_margin as f64;
    let right = card_width.saturating_sub(layout.right_margin) as f64;
    let section = layout.section_spacing as f64;
    let mut commands = Vec::new();
    let mut y = start_y as f64 + TOP_PADDING;

    let mut text = |y: f64, text: String, weight: Weight, size: f64| {
        commands.push(PaintCommand::Text {
            x: left,
            y,
            text,
            weight,
            size,
        });
    };

    if let Some(category) = event.category() {
        text(
            y,
            format!("{CATEGORY_ICON} {category}"),
            Weight::Regular,
            layout.category_font_size,
        );
        y += section;
    }

    if !event.title.trim().is_empty() {
        text(
            y,
            event.title.trim().to_string(),
            Weight::Bold,
            layout.title_font_size,
        );
        y += section;
    }

    if let Some(desc) = description.text {
        let max_width = (right - left).max(0.0);
        let lines = draw::wrap_text(
            desc,
            measure,
            regular,
            layout.description_font_size,
            max_width,
            description.max_lines,
        );
        let spacing = layout.line_spacing as f64;
        for (i, line) in lines.iter().enumerate() {
            text(
                y + i as f64 * spacing,
                line.clone(),
                Weight::Regular,
                layout.description_font_size,
            );
        }
        y += lines.len() as f64 * spacing + section;
    }

    if let Some(cost) = &event.cost {
        text(
            y,
            format!("{COST_ICON} {cost}"),
            Weight::Bold,
            layout.cost_font_size,
        );
        y += COMPACT_SPACING;
    }

    if let Some(location) = event.location_line() {
        commands.push(PaintCommand::Separator {
            from: (left, y),
            to: (right, y),
            width: layout.separator_width,
        });
        y += SEPARATOR_SPACING;

        commands.push(PaintCommand::Text {
            x: left,
            y,
            text: location,
            weight: Weight::Regular,
            size: layout.location_font_size,
        });
        y += COMPACT_SPACING;
    }

    ContentPlan {
        commands,
        end_y: y,
    }
}

/// Paints planned commands in order.
pub fn paint(ctx: &cairo::Context, commands: &[PaintCommand], style: &CardStyle) {
    for command in commands {
        match command {
            PaintCommand::Text {
                x,
                y,
                text,
                weight,
                size,
            } => {
                let font = match weight {
                    Weight::Regular => &style.regular,
                    Weight::Bold => &style.bold,
                };
                draw::draw_text(ctx, *x, *y, text, style.text, font, *size);
            }
            PaintCommand::Separator { from, to, width } => {
                draw::draw_line(ctx, *from, *to, style.separator, *width);
            }
        }
    }
}
