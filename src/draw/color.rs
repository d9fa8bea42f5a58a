//! RGBA color type and predefined color constants.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum), matching
/// what Cairo expects in `set_source_rgba`.
///
/// # Examples
///
/// ```
/// use eventcard::draw::Color;
/// let green = Color::from_rgb8(67, 160, 71);
/// assert_eq!(green.to_rgb8(), [67, 160, 71]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Returns the 8-bit RGB channels, ignoring alpha.
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Linear interpolation towards `other`; `t` is clamped to 0.0 - 1.0.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a * (1.0 - t) + b * t;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Looks up a named color (case-insensitive).
    ///
    /// Supported names: red, green, blue, yellow, orange, pink, white, black.
    pub fn from_name(name: &str) -> Option<Color> {
        match name.to_lowercase().as_str() {
            "red" => Some(RED),
            "green" => Some(GREEN),
            "blue" => Some(BLUE),
            "yellow" => Some(YELLOW),
            "orange" => Some(ORANGE),
            "pink" => Some(PINK),
            "white" => Some(WHITE),
            "black" => Some(BLACK),
            _ => None,
        }
    }

    /// Sets this color as the current Cairo source.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

pub const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

pub const YELLOW: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

pub const ORANGE: Color = Color {
    r: 1.0,
    g: 0.5,
    b: 0.0,
    a: 1.0,
};

pub const PINK: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
