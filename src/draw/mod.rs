//! Rendering primitives (Cairo/Pango-based).
//!
//! This module defines the drawing building blocks used by card layouts:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`FontDescriptor`]: family/weight/style, sized in pixels at draw time
//! - Text drawing, measurement, and word wrapping through Pango
//! - Background, polygon, line, and gradient fills
//! - Conversion of decoded images to and from Cairo surfaces

pub mod color;
pub mod font;
pub mod raster;
pub mod render;
pub mod text;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::{FontDescriptor, ensure_font_available};
pub use raster::{paint_image, rgb_from_surface, surface_from_rgb};
pub use render::{draw_line, fill_background, fill_polygon, fill_vertical_gradient};
pub use text::{PangoMeasure, TextMeasure, draw_text, draw_text_centered, wrap_text};

pub use color::{BLACK, WHITE};
