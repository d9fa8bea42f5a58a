//! Pango text drawing, measurement, and word wrapping.

use super::color::Color;
use super::font::FontDescriptor;

/// Measures rendered text width for a font at a pixel size.
///
/// Wrapping only depends on this trait so layouts can be computed without
/// a real font stack.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: &FontDescriptor, size: f64) -> f64;
}

/// [`TextMeasure`] backed by Pango layouts on a Cairo context.
pub struct PangoMeasure<'a> {
    ctx: &'a cairo::Context,
}

impl<'a> PangoMeasure<'a> {
    pub fn new(ctx: &'a cairo::Context) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for PangoMeasure<'_> {
    fn text_width(&self, text: &str, font: &FontDescriptor, size: f64) -> f64 {
        let layout = create_layout(self.ctx, text, font, size);
        let (_ink, logical) = layout.extents();
        logical.width() as f64 / pango::SCALE as f64
    }
}

fn create_layout(
    ctx: &cairo::Context,
    text: &str,
    font: &FontDescriptor,
    size: f64,
) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = font.to_pango_description(size);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    layout
}

/// Draws a single layout with its top-left corner at (x, y).
///
/// Emoji are resolved through fontconfig fallback, so a color emoji font
/// (e.g. Noto Color Emoji) is picked up automatically when installed.
/// Missing glyphs render as boxes rather than failing.
pub fn draw_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    font: &FontDescriptor,
    size: f64,
) {
    if text.is_empty() {
        return;
    }

    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = create_layout(ctx, text, font, size);
    color.apply(ctx);
    ctx.move_to(x, y);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Draws text horizontally centered within `width`, top edge at `y`.
pub fn draw_text_centered(
    ctx: &cairo::Context,
    y: f64,
    width: f64,
    text: &str,
    color: Color,
    font: &FontDescriptor,
    size: f64,
) {
    let text_width = PangoMeasure::new(ctx).text_width(text, font, size);
    let x = ((width - text_width) / 2.0).floor();
    draw_text(ctx, x, y, text, color, font, size);
}

/// Greedily wraps one paragraph word by word.
///
/// A word wider than `max_width` on its own is kept whole on its own line.
fn wrap_paragraph(
    paragraph: &str,
    measure: &dyn TextMeasure,
    font: &FontDescriptor,
    size: f64,
    max_width: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure.text_width(&candidate, font, size) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Wraps text to `max_width`, keeping at most `max_lines` lines.
///
/// Explicit newlines split paragraphs; a blank paragraph becomes an empty
/// line so intentional spacing survives.
pub fn wrap_text(
    text: &str,
    measure: &dyn TextMeasure,
    font: &FontDescriptor,
    size: f64,
    max_width: f64,
    max_lines: usize,
) -> Vec<String> {
    let mut lines = Vec::new();

    if text.contains('\n') {
        for paragraph in text.split('\n') {
            if paragraph.trim().is_empty() {
                lines.push(String::new());
                continue;
            }
            lines.extend(wrap_paragraph(paragraph, measure, font, size, max_width));
        }
    } else {
        lines = wrap_paragraph(text, measure, font, size, max_width);
    }

    lines.truncate(max_lines);
    lines
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every char is `size / 2` pixels wide.
    pub(crate) struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn text_width(&self, text: &str, _font: &FontDescriptor, size: f64) -> f64 {
            text.chars().count() as f64 * size / 2.0
        }
    }

    fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
        // size 2.0 => one pixel per char
        wrap_text(
            text,
            &FixedMeasure,
            &FontDescriptor::default(),
            2.0,
            max_chars as f64,
            max_lines,
        )
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10, 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn exact_fit_stays_on_line() {
        assert_eq!(wrap("abcde fghi", 10, 10), vec!["abcde fghi"]);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        assert_eq!(
            wrap("a magiiiiiiiiiiique night", 8, 10),
            vec!["a", "magiiiiiiiiiiique", "night"]
        );
    }

    #[test]
    fn truncates_to_max_lines() {
        assert_eq!(wrap("one two three four", 3, 2), vec!["one", "two"]);
    }

    #[test]
    fn newlines_split_paragraphs_and_keep_blank_lines() {
        assert_eq!(
            wrap("first para\n\nsecond", 20, 10),
            vec!["first para", "", "second"]
        );
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("", 10, 3).is_empty());
        assert!(wrap("   ", 10, 3).is_empty());
    }

    #[test]
    fn emoji_count_as_text() {
        assert_eq!(wrap("Soirée ✨✨✨ Latine 💃", 12, 5), vec!["Soirée ✨✨✨", "Latine 💃"]);
    }

    #[test]
    fn pango_measure_grows_with_text() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 200, 50).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        let measure = PangoMeasure::new(&ctx);
        let font = FontDescriptor::new("Sans".into(), "normal".into(), "normal".into());
        let short = measure.text_width("ab", &font, 20.0);
        let long = measure.text_width("abcdef", &font, 20.0);
        assert!(short > 0.0);
        assert!(long > short);
    }
}
