//! Configuration type definitions.

use super::enums::{ColorSpec, ImageFit, OutputFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Font families and weights used on the card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FontConfig {
    /// Font family name (e.g., "DejaVu Sans", "Noto Sans", "Sans")
    /// The family must be installed; generic aliases like "Sans" always resolve
    #[serde(default = "default_font_family")]
    pub family: String,

    /// Weight for body text (e.g., "normal", "light")
    #[serde(default = "default_regular_weight")]
    pub regular_weight: String,

    /// Weight for the banner, title, and cost (e.g., "bold", "heavy")
    #[serde(default = "default_bold_weight")]
    pub bold_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub style: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            regular_weight: default_regular_weight(),
            bold_weight: default_bold_weight(),
            style: default_font_style(),
        }
    }
}

/// Base colors of the card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColorConfig {
    /// Canvas background
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Body text
    #[serde(default = "default_text")]
    pub text: ColorSpec,

    /// Date text on the banner
    #[serde(default = "default_banner_text")]
    pub banner_text: ColorSpec,

    /// Line between cost and location
    #[serde(default = "default_text")]
    pub separator: ColorSpec,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            text: default_text(),
            banner_text: default_banner_text(),
            separator: default_text(),
        }
    }
}

/// Banner colors keyed by the weekday found in the event date.
///
/// Day names are matched in French, Spanish, and English.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DayColors {
    #[serde(default = "default_friday")]
    pub friday: ColorSpec,

    #[serde(default = "default_thursday")]
    pub thursday: ColorSpec,

    #[serde(default = "default_wednesday")]
    pub wednesday: ColorSpec,

    /// Any other day, or dates without a recognizable day name
    #[serde(default = "default_other_day")]
    pub other: ColorSpec,
}

impl Default for DayColors {
    fn default() -> Self {
        Self {
            friday: default_friday(),
            thursday: default_thursday(),
            wednesday: default_wednesday(),
            other: default_other_day(),
        }
    }
}

/// Geometry and typography of the standard (feed) card, in pixels.
///
/// The story card starts from these values and applies [`StoryConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LayoutConfig {
    /// Tallest image slot at the top of the card
    #[serde(default = "default_max_image_height")]
    pub max_image_height: u32,

    /// How source images wider than the card are fitted
    #[serde(default = "default_image_fit")]
    pub image_fit: ImageFit,

    /// Banner height (excluding the incline)
    #[serde(default = "default_banner_height")]
    pub banner_height: u32,

    /// Horizontal inset of the banner from the card edges
    #[serde(default = "default_banner_margin")]
    pub banner_margin: u32,

    /// Vertical drop of the banner's left edge; 0 draws a plain rectangle
    #[serde(default = "default_angle_offset")]
    pub angle_offset: u32,

    /// Left text margin
    #[serde(default = "default_text_margin")]
    pub left_margin: u32,

    /// Right text margin
    #[serde(default = "default_text_margin")]
    pub right_margin: u32,

    #[serde(default = "default_banner_font_size")]
    pub banner_font_size: f64,

    #[serde(default = "default_category_font_size")]
    pub category_font_size: f64,

    #[serde(default = "default_title_font_size")]
    pub title_font_size: f64,

    #[serde(default = "default_body_font_size")]
    pub description_font_size: f64,

    #[serde(default = "default_body_font_size")]
    pub cost_font_size: f64,

    #[serde(default = "default_body_font_size")]
    pub location_font_size: f64,

    /// Distance between wrapped description lines
    #[serde(default = "default_line_spacing")]
    pub line_spacing: u32,

    /// Distance after the category, title, and description sections
    #[serde(default = "default_section_spacing")]
    pub section_spacing: u32,

    /// Description lines kept on the standard card
    #[serde(default = "default_max_description_lines")]
    pub max_description_lines: usize,

    /// Separator line thickness
    #[serde(default = "default_separator_width")]
    pub separator_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_image_height: default_max_image_height(),
            image_fit: default_image_fit(),
            banner_height: default_banner_height(),
            banner_margin: default_banner_margin(),
            angle_offset: default_angle_offset(),
            left_margin: default_text_margin(),
            right_margin: default_text_margin(),
            banner_font_size: default_banner_font_size(),
            category_font_size: default_category_font_size(),
            title_font_size: default_title_font_size(),
            description_font_size: default_body_font_size(),
            cost_font_size: default_body_font_size(),
            location_font_size: default_body_font_size(),
            line_spacing: default_line_spacing(),
            section_spacing: default_section_spacing(),
            max_description_lines: default_max_description_lines(),
            separator_width: default_separator_width(),
        }
    }
}

/// Overrides applied to [`LayoutConfig`] for the tall story card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StoryConfig {
    /// Cards at least this tall use the story layout
    #[serde(default = "default_story_min_height")]
    pub min_height: u32,

    /// Top of the banner
    #[serde(default = "default_story_start_y")]
    pub start_y: u32,

    #[serde(default = "default_story_banner_height")]
    pub banner_height: u32,

    #[serde(default = "default_story_angle_offset")]
    pub angle_offset: u32,

    /// Fraction of the card height covered by the header gradient (0.0 - 1.0)
    #[serde(default = "default_gradient_height_ratio")]
    pub gradient_height_ratio: f64,

    /// Description lines kept on the story card
    #[serde(default = "default_story_description_lines")]
    pub max_description_lines: usize,

    /// Space kept free below the image
    #[serde(default = "default_story_bottom_margin")]
    pub bottom_margin: u32,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            min_height: default_story_min_height(),
            start_y: default_story_start_y(),
            banner_height: default_story_banner_height(),
            angle_offset: default_story_angle_offset(),
            gradient_height_ratio: default_gradient_height_ratio(),
            max_description_lines: default_story_description_lines(),
            bottom_margin: default_story_bottom_margin(),
        }
    }
}

/// Source image download settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with image requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Where and how cards are written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Output directory (supports `~/`)
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Encoding of written cards ("jpg" or "png")
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,

    /// JPEG quality (1 - 100); values above 255 fail to parse
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Card sizes rendered for every event, as "WIDTHxHEIGHT"
    #[serde(default = "default_sizes")]
    pub sizes: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            format: default_output_format(),
            jpeg_quality: default_jpeg_quality(),
            sizes: default_sizes(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_font_family() -> String {
    "DejaVu Sans".to_string()
}

fn default_regular_weight() -> String {
    "normal".to_string()
}

fn default_bold_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_text() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_banner_text() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_friday() -> ColorSpec {
    ColorSpec::Rgb([67, 160, 71])
}

fn default_thursday() -> ColorSpec {
    ColorSpec::Rgb([66, 165, 245])
}

fn default_wednesday() -> ColorSpec {
    ColorSpec::Rgb([102, 187, 106])
}

fn default_other_day() -> ColorSpec {
    ColorSpec::Rgb([255, 193, 7])
}

fn default_max_image_height() -> u32 {
    600
}

fn default_image_fit() -> ImageFit {
    ImageFit::Scale
}

fn default_banner_height() -> u32 {
    90
}

fn default_banner_margin() -> u32 {
    40
}

fn default_angle_offset() -> u32 {
    20
}

fn default_text_margin() -> u32 {
    40
}

fn default_banner_font_size() -> f64 {
    42.0
}

fn default_category_font_size() -> f64 {
    33.0
}

fn default_title_font_size() -> f64 {
    35.0
}

fn default_body_font_size() -> f64 {
    30.0
}

fn default_line_spacing() -> u32 {
    45
}

fn default_section_spacing() -> u32 {
    80
}

fn default_max_description_lines() -> usize {
    3
}

fn default_separator_width() -> f64 {
    2.0
}

fn default_story_min_height() -> u32 {
    1900
}

fn default_story_start_y() -> u32 {
    20
}

fn default_story_banner_height() -> u32 {
    120
}

fn default_story_angle_offset() -> u32 {
    0
}

fn default_gradient_height_ratio() -> f64 {
    0.2
}

fn default_story_description_lines() -> usize {
    20
}

fn default_story_bottom_margin() -> u32 {
    20
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("eventcard/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_output_directory() -> String {
    "images".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Jpeg
}

fn default_jpeg_quality() -> u8 {
    95
}

fn default_sizes() -> Vec<String> {
    vec!["1080x1350".to_string(), "1080x1920".to_string()]
}
