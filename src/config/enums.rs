//! Configuration enum types.

use crate::draw::{BLACK, Color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// text = "black"
///
/// # Custom RGB color (0-255 per component)
/// friday = [67, 160, 71]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names default to black with a warning. RGB arrays are
    /// converted from 0-255 range to 0.0-1.0 range with full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => Color::from_name(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

/// Encoding of the written card.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl OutputFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Parses a format name or file extension (`png`, `jpg`, `jpeg`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

/// How a source image wider than the card is fitted into the image slot.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFit {
    /// Scale down to the card width, then cut to the slot height
    Scale,
    /// Keep the original scale and cut a centered window
    Crop,
}
