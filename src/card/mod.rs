//! Event card composition.
//!
//! A card is rendered in one of two formats:
//! - [`CardFormat::Standard`]: feed card with the image on top, an inclined
//!   day-colored banner carrying the date, and the text sections below
//! - [`CardFormat::Story`]: tall card with a day-colored gradient header,
//!   a flat banner, the text sections, and the image at the bottom
//!
//! The source image is loaded before anything is drawn, so fetch and decode
//! failures never produce a partial card.

pub mod banner;
pub mod content;
mod standard;
mod story;

pub use banner::{BannerGeometry, banner_color, paint_banner};

use crate::config::{Config, LayoutConfig, OutputFormat};
use crate::draw::{self, Color, FontDescriptor};
use crate::error::{CardError, Result};
use crate::event::EventRecord;
use crate::output;
use crate::source::{ImageLoader, ImageSource};
use image::RgbImage;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Largest edge Cairo image surfaces support.
const MAX_DIMENSION: u32 = 32767;

/// Card layout family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFormat {
    Standard,
    Story,
}

impl CardFormat {
    /// Story layout for cards at least `story_min_height` tall.
    pub fn for_size(size: CardSize, story_min_height: u32) -> Self {
        if size.height >= story_min_height {
            CardFormat::Story
        } else {
            CardFormat::Standard
        }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSize {
    pub width: u32,
    pub height: u32,
}

impl CardSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for CardSize {
    type Err = CardError;

    /// Parses `"1080x1350"` (an upper-case `X` is accepted too).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CardError::InvalidSize(s.to_string());
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;

        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(invalid());
        }

        Ok(Self { width, height })
    }
}

impl fmt::Display for CardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Fonts and colors resolved from the configuration.
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub regular: FontDescriptor,
    pub bold: FontDescriptor,
    pub background: Color,
    pub text: Color,
    pub banner_text: Color,
    pub separator: Color,
}

impl CardStyle {
    pub fn from_config(config: &Config) -> Self {
        let regular = FontDescriptor::new(
            config.fonts.family.clone(),
            config.fonts.regular_weight.clone(),
            config.fonts.style.clone(),
        );
        let bold = regular.with_weight(&config.fonts.bold_weight);

        Self {
            regular,
            bold,
            background: config.colors.background.to_color(),
            text: config.colors.text.to_color(),
            banner_text: config.colors.banner_text.to_color(),
            separator: config.colors.separator.to_color(),
        }
    }
}

/// A finished card held in memory.
pub struct RenderedCard {
    pub format: CardFormat,
    surface: cairo::ImageSurface,
}

impl RenderedCard {
    pub fn width(&self) -> u32 {
        self.surface.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.surface.height() as u32
    }

    /// Copies the pixels out as an RGB image.
    pub fn to_rgb(&mut self) -> Result<RgbImage> {
        draw::rgb_from_surface(&mut self.surface)
    }

    /// Encodes and writes the card.
    pub fn save(&mut self, path: &Path, format: OutputFormat, jpeg_quality: u8) -> Result<()> {
        output::save_surface(&mut self.surface, path, format, jpeg_quality)
    }
}

/// Renders event cards according to a [`Config`].
pub struct CardRenderer {
    config: Config,
    style: CardStyle,
    loader: ImageLoader,
}

impl CardRenderer {
    /// Creates a renderer, failing early when the configured font is missing.
    pub fn new(config: Config) -> Result<Self> {
        draw::ensure_font_available(&config.fonts.family)?;
        let loader = ImageLoader::new(&config.fetch)?;
        let style = CardStyle::from_config(&config);
        Ok(Self {
            config,
            style,
            loader,
        })
    }

    /// Layout family used for a given size.
    pub fn format_for(&self, size: CardSize) -> CardFormat {
        CardFormat::for_size(size, self.config.story.min_height)
    }

    /// Loads the event's image and renders the card in memory.
    pub fn render(&self, event: &EventRecord, size: CardSize) -> Result<RenderedCard> {
        let source = ImageSource::parse(&event.image);
        let image = self.loader.load(&source)?;
        self.render_with_image(event, &image, size)
    }

    /// Renders the card from an already decoded source image.
    pub fn render_with_image(
        &self,
        event: &EventRecord,
        image: &RgbImage,
        size: CardSize,
    ) -> Result<RenderedCard> {
        let format = self.format_for(size);
        let surface = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            size.width as i32,
            size.height as i32,
        )?;

        {
            let ctx = cairo::Context::new(&surface)?;
            match format {
                CardFormat::Standard => {
                    standard::draw(&ctx, event, image, size, &self.config, &self.style)?
                }
                CardFormat::Story => {
                    let layout = self.story_layout();
                    story::draw(&ctx, event, image, size, &layout, &self.config, &self.style)?
                }
            }
        }

        log::debug!("Rendered {:?} card {} for '{}'", format, size, event.title);
        Ok(RenderedCard { format, surface })
    }

    /// Renders and writes one card; the encoding follows the file extension.
    pub fn render_to_file(&self, event: &EventRecord, size: CardSize, path: &Path) -> Result<()> {
        let mut card = self.render(event, size)?;
        let format = output::format_for_path(path, self.config.output.format);
        card.save(path, format, self.config.output.jpeg_quality)?;
        log::info!("Saved card at {}", path.display());
        Ok(())
    }

    /// Standard layout with the story overrides applied.
    fn story_layout(&self) -> LayoutConfig {
        let story = &self.config.story;
        LayoutConfig {
            banner_height: story.banner_height,
            angle_offset: story.angle_offset,
            max_description_lines: story.max_description_lines,
            ..self.config.layout.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes() {
        assert_eq!("1080x1350".parse::<CardSize>().unwrap(), CardSize::new(1080, 1350));
        assert_eq!(" 800X600 ".parse::<CardSize>().unwrap(), CardSize::new(800, 600));
        assert_eq!(CardSize::new(1080, 1920).to_string(), "1080x1920");
    }

    #[test]
    fn rejects_bad_sizes() {
        for bad in ["", "1080", "0x100", "100x0", "axb", "1080x-1", "40000x10"] {
            assert!(
                matches!(bad.parse::<CardSize>(), Err(CardError::InvalidSize(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn tall_sizes_use_story_format() {
        assert_eq!(
            CardFormat::for_size(CardSize::new(1080, 1350), 1900),
            CardFormat::Standard
        );
        assert_eq!(
            CardFormat::for_size(CardSize::new(1080, 1900), 1900),
            CardFormat::Story
        );
    }

    #[test]
    fn style_uses_configured_weights() {
        let mut config = Config::default();
        config.fonts.bold_weight = "heavy".into();
        let style = CardStyle::from_config(&config);
        assert_eq!(style.regular.weight, "normal");
        assert_eq!(style.bold.weight, "heavy");
        assert_eq!(style.bold.family, style.regular.family);
        assert_eq!(style.banner_text, crate::draw::WHITE);
    }
}
