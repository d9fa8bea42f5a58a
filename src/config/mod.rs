//! Configuration file support for eventcard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/eventcard/config.toml`, or from an explicit path. Settings
//! include fonts, colors, the day-to-banner palette, card geometry, image download
//! options, and output encoding.
//!
//! If no config file exists, the defaults reproduce the classic card design.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, ImageFit, OutputFormat};
pub use types::{
    ColorConfig, DayColors, FetchConfig, FontConfig, LayoutConfig, OutputConfig, StoryConfig,
};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Font weights accepted in `[fonts]`.
const FONT_WEIGHTS: &[&str] = &[
    "thin",
    "ultralight",
    "light",
    "book",
    "normal",
    "medium",
    "semibold",
    "bold",
    "ultrabold",
    "heavy",
];

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [fonts]
/// family = "DejaVu Sans"
///
/// [days]
/// friday = [67, 160, 71]
/// other = "orange"
///
/// [layout]
/// max_image_height = 600
/// image_fit = "scale"
///
/// [story]
/// gradient_height_ratio = 0.2
///
/// [output]
/// directory = "~/Pictures/events"
/// format = "jpg"
/// sizes = ["1080x1350", "1080x1920"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, schemars::JsonSchema)]
pub struct Config {
    /// Font family and weights
    #[serde(default)]
    pub fonts: FontConfig,

    /// Background, text, and separator colors
    #[serde(default)]
    pub colors: ColorConfig,

    /// Banner color per weekday
    #[serde(default)]
    pub days: DayColors,

    /// Standard card geometry and typography
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Story card overrides
    #[serde(default)]
    pub story: StoryConfig,

    /// Image download options
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Output directory, encoding, and card sizes
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// the default) and a warning is logged. Non-finite floats (`nan`, `inf`)
    /// are replaced by the field's default before clamping.
    ///
    /// Validated ranges:
    /// - font sizes: 8.0 - 200.0
    /// - `layout.separator_width`: finite and not negative
    /// - `max_description_lines`: at least 1
    /// - `story.gradient_height_ratio`: 0.0 - 1.0
    /// - `output.jpeg_quality`: 1 - 100 (values above 255 are rejected when parsing)
    /// - `fetch.timeout_secs`: at least 1
    fn validate_and_clamp(&mut self) {
        let layout_defaults = LayoutConfig::default();
        let layout = &mut self.layout;
        for (name, size, default) in [
            (
                "banner_font_size",
                &mut layout.banner_font_size,
                layout_defaults.banner_font_size,
            ),
            (
                "category_font_size",
                &mut layout.category_font_size,
                layout_defaults.category_font_size,
            ),
            (
                "title_font_size",
                &mut layout.title_font_size,
                layout_defaults.title_font_size,
            ),
            (
                "description_font_size",
                &mut layout.description_font_size,
                layout_defaults.description_font_size,
            ),
            (
                "cost_font_size",
                &mut layout.cost_font_size,
                layout_defaults.cost_font_size,
            ),
            (
                "location_font_size",
                &mut layout.location_font_size,
                layout_defaults.location_font_size,
            ),
        ] {
            if !size.is_finite() {
                log::warn!("Invalid {} {}, using default {:.1}", name, size, default);
                *size = default;
            } else if !(8.0..=200.0).contains(&*size) {
                log::warn!("Invalid {} {:.1}, clamping to 8.0-200.0 range", name, size);
                *size = size.clamp(8.0, 200.0);
            }
        }

        if !layout.separator_width.is_finite() || layout.separator_width < 0.0 {
            log::warn!(
                "Invalid separator_width {}, using default {:.1}",
                layout.separator_width,
                layout_defaults.separator_width
            );
            layout.separator_width = layout_defaults.separator_width;
        }

        if layout.max_description_lines == 0 {
            log::warn!("Invalid layout max_description_lines 0, using 1");
            layout.max_description_lines = 1;
        }

        if self.story.max_description_lines == 0 {
            log::warn!("Invalid story max_description_lines 0, using 1");
            self.story.max_description_lines = 1;
        }

        if !self.story.gradient_height_ratio.is_finite() {
            let default = StoryConfig::default().gradient_height_ratio;
            log::warn!(
                "Invalid gradient_height_ratio {}, using default {:.2}",
                self.story.gradient_height_ratio,
                default
            );
            self.story.gradient_height_ratio = default;
        } else if !(0.0..=1.0).contains(&self.story.gradient_height_ratio) {
            log::warn!(
                "Invalid gradient_height_ratio {:.2}, clamping to 0.0-1.0 range",
                self.story.gradient_height_ratio
            );
            self.story.gradient_height_ratio = self.story.gradient_height_ratio.clamp(0.0, 1.0);
        }

        if !(1..=100).contains(&self.output.jpeg_quality) {
            log::warn!(
                "Invalid jpeg_quality {}, clamping to 1-100 range",
                self.output.jpeg_quality
            );
            self.output.jpeg_quality = self.output.jpeg_quality.clamp(1, 100);
        }

        if self.fetch.timeout_secs == 0 {
            log::warn!("Invalid fetch timeout_secs 0, using 1");
            self.fetch.timeout_secs = 1;
        }

        for (label, weight, fallback) in [
            ("regular_weight", &mut self.fonts.regular_weight, "normal"),
            ("bold_weight", &mut self.fonts.bold_weight, "bold"),
        ] {
            if !FONT_WEIGHTS.contains(&weight.to_lowercase().as_str()) {
                log::warn!("Invalid {} '{}', falling back to '{}'", label, weight, fallback);
                *weight = fallback.to_string();
            }
        }

        if !matches!(
            self.fonts.style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font style '{}', falling back to 'normal'",
                self.fonts.style
            );
            self.fonts.style = "normal".to_string();
        }
    }

    /// Returns the path to the default configuration file.
    ///
    /// The config file is located at `~/.config/eventcard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("eventcard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses TOML without validation.
    fn from_toml(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// Returns the JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.fonts.family, "DejaVu Sans");
        assert_eq!(config.layout.max_image_height, 600);
        assert_eq!(config.layout.banner_height, 90);
        assert_eq!(config.story.banner_height, 120);
        assert_eq!(config.story.min_height, 1900);
        assert_eq!(config.output.format, OutputFormat::Jpeg);
        assert_eq!(config.output.jpeg_quality, 95);
        assert_eq!(config.output.sizes, vec!["1080x1350", "1080x1920"]);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [days]
            friday = "pink"

            [layout]
            image_fit = "crop"
            max_description_lines = 5

            [output]
            format = "png"
            "#,
        )
        .unwrap();
        assert_eq!(config.days.friday, ColorSpec::Name("pink".into()));
        assert_eq!(config.days.other, ColorSpec::Rgb([255, 193, 7]));
        assert_eq!(config.layout.image_fit, ImageFit::Crop);
        assert_eq!(config.layout.max_description_lines, 5);
        assert_eq!(config.layout.line_spacing, 45);
        assert_eq!(config.output.format, OutputFormat::Png);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [fonts]
            bold_weight = "extra-chunky"
            style = "wavy"

            [layout]
            title_font_size = 500.0
            max_description_lines = 0

            [story]
            gradient_height_ratio = 1.5

            [output]
            jpeg_quality = 0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.fonts.bold_weight, "bold");
        assert_eq!(config.fonts.style, "normal");
        assert_eq!(config.layout.title_font_size, 200.0);
        assert_eq!(config.layout.max_description_lines, 1);
        assert_eq!(config.story.gradient_height_ratio, 1.0);
        assert_eq!(config.output.jpeg_quality, 1);
    }

    #[test]
    fn non_finite_floats_fall_back_to_defaults() {
        let mut config = Config::from_toml(
            r#"
            [layout]
            title_font_size = nan
            cost_font_size = inf
            separator_width = -inf

            [story]
            gradient_height_ratio = nan
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.layout.title_font_size, 35.0);
        assert_eq!(config.layout.cost_font_size, 30.0);
        assert_eq!(config.layout.separator_width, 2.0);
        assert_eq!(config.story.gradient_height_ratio, 0.2);
    }

    #[test]
    fn jpeg_quality_above_byte_range_is_a_parse_error() {
        assert!(Config::from_toml("[output]\njpeg_quality = 300\n").is_err());
        let mut config = Config::from_toml("[output]\njpeg_quality = 250\n").unwrap();
        config.validate_and_clamp();
        assert_eq!(config.output.jpeg_quality, 100);
    }

    #[test]
    fn load_from_reports_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/eventcard.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[fetch]\ntimeout_secs = 5\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.fetch.timeout_secs, 5);
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("\"story\""));
        assert!(schema.contains("\"output\""));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed.days.thursday, config.days.thursday);
        assert_eq!(parsed.output.sizes, config.output.sizes);
    }
}
