//! Writing rendered cards to disk.

use crate::card::{CardFormat, CardSize};
use crate::config::OutputFormat;
use crate::draw::rgb_from_surface;
use crate::error::{CardError, Result};
use image::codecs::jpeg::JpegEncoder;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name for the `index`-th event rendered at `size`.
///
/// Standard cards are `output_event_card_{i}_{w}x{h}.{ext}`, story cards
/// `story_event_card_{i}_{w}x{h}.{ext}`.
pub fn card_filename(format: CardFormat, index: usize, size: CardSize, ext: &str) -> String {
    let prefix = match format {
        CardFormat::Standard => "output",
        CardFormat::Story => "story",
    };
    format!(
        "{}_event_card_{}_{}x{}.{}",
        prefix, index, size.width, size.height, ext
    )
}

/// Picks the encoding from the file extension, falling back to `default`.
pub fn format_for_path(path: &Path, default: OutputFormat) -> OutputFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or(default)
}

/// Ensure the output directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|e| CardError::io(directory, e))?;
    }

    Ok(directory.to_path_buf())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Encodes a surface in memory.
pub fn encode_surface(
    surface: &mut cairo::ImageSurface,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Png => {
            surface
                .write_to_png(&mut buffer)
                .map_err(|e| CardError::Encode(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let rgb = rgb_from_surface(surface)?;
            JpegEncoder::new_with_quality(&mut buffer, jpeg_quality)
                .encode_image(&rgb)
                .map_err(|e| CardError::Encode(e.to_string()))?;
        }
    }
    Ok(buffer)
}

/// Encodes and writes a surface to `path`.
///
/// The image is encoded fully in memory and written through a temporary
/// sibling file that is renamed into place, so a failure never leaves a
/// truncated card at `path`.
pub fn save_surface(
    surface: &mut cairo::ImageSurface,
    path: &Path,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<()> {
    let bytes = encode_surface(surface, format, jpeg_quality)?;

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .map_err(|e| CardError::io(&tmp_path, e))?;
        let written = tmp_file
            .write_all(&bytes)
            .and_then(|_| tmp_file.sync_all());
        if let Err(e) = written {
            fs::remove_file(&tmp_path).ok();
            return Err(CardError::io(&tmp_path, e));
        }
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        fs::remove_file(&tmp_path).ok();
        CardError::io(path, e)
    })?;

    log::debug!("Card written: {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "card".to_string());
    let mut candidate = target.with_file_name(format!(".{name}.tmp"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_file_name(format!(".{name}.tmp{counter}"));
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_surface(w: i32, h: i32) -> cairo::ImageSurface {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            ctx.set_source_rgb(1.0, 1.0, 1.0);
            ctx.paint().unwrap();
        }
        surface
    }

    #[test]
    fn filenames_follow_format() {
        let size = CardSize::new(1080, 1350);
        assert_eq!(
            card_filename(CardFormat::Standard, 0, size, "jpg"),
            "output_event_card_0_1080x1350.jpg"
        );
        assert_eq!(
            card_filename(CardFormat::Story, 3, CardSize::new(1080, 1920), "png"),
            "story_event_card_3_1080x1920.png"
        );
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            format_for_path(Path::new("card.PNG"), OutputFormat::Jpeg),
            OutputFormat::Png
        );
        assert_eq!(
            format_for_path(Path::new("card.jpeg"), OutputFormat::Png),
            OutputFormat::Jpeg
        );
        assert_eq!(
            format_for_path(Path::new("card"), OutputFormat::Jpeg),
            OutputFormat::Jpeg
        );
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn saves_decodable_jpeg_and_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = white_surface(64, 48);

        let jpg = dir.path().join("card.jpg");
        save_surface(&mut surface, &jpg, OutputFormat::Jpeg, 95).unwrap();
        let decoded = image::open(&jpg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
        assert_eq!(&fs::read(&jpg).unwrap()[..2], &[0xFF, 0xD8]);

        let png = dir.path().join("card.png");
        save_surface(&mut surface, &png, OutputFormat::Png, 95).unwrap();
        let decoded = image::open(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn ensure_directory_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        let created = ensure_directory_exists(&nested).unwrap();
        assert!(created.is_dir());
    }

    #[test]
    fn save_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("card.jpg");
        let mut surface = white_surface(8, 8);
        let err = save_surface(&mut surface, &target, OutputFormat::Jpeg, 90).unwrap_err();
        assert!(matches!(err, CardError::Io { .. }));
        assert!(!target.exists());
    }
}
