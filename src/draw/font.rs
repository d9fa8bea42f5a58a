//! Font descriptor for text rendering.

use crate::error::{CardError, Result};
use pango::prelude::*;

/// Generic family aliases that fontconfig always resolves to something.
const GENERIC_FAMILIES: &[&str] = &["sans", "sans-serif", "serif", "monospace"];

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, and style.
/// Sizes are not part of the descriptor; they are given in pixels when the
/// Pango description is built so one descriptor serves every text section.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "DejaVu Sans", "Sans")
    pub family: String,

    /// Font weight name (e.g., "normal", "bold", "light", "heavy")
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Returns a copy of this descriptor with a different weight.
    pub fn with_weight(&self, weight: &str) -> Self {
        Self {
            weight: weight.to_string(),
            ..self.clone()
        }
    }

    /// Converts this descriptor to a Pango font description string without size.
    ///
    /// Format: "Family Style Weight"
    /// Example: "DejaVu Sans Bold" or "Serif Italic"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.join(" ")
    }

    /// Builds a Pango description with an absolute size in pixels.
    ///
    /// Pango sizes given in the description string are points; card layouts
    /// are specified in pixels so the absolute size is set explicitly.
    pub fn to_pango_description(&self, size_px: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.to_pango_string());
        desc.set_family(&self.family);
        desc.set_absolute_size(size_px * pango::SCALE as f64);
        desc
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "DejaVu Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

/// Fails when fontconfig has no family with the given name.
///
/// Generic aliases such as "Sans" are always accepted.
pub fn ensure_font_available(family: &str) -> Result<()> {
    if GENERIC_FAMILIES.contains(&family.to_lowercase().as_str()) {
        return Ok(());
    }

    let font_map = pangocairo::FontMap::default();
    let found = font_map
        .list_families()
        .iter()
        .any(|f| f.name().as_str().eq_ignore_ascii_case(family));

    if found {
        log::debug!("Font family '{}' is available", family);
        Ok(())
    } else {
        Err(CardError::FontUnavailable(family.to_string()))
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
