//! Loading and fitting the event's source image.
//!
//! Images come either from an `http(s)://` URL, fetched with a blocking
//! reqwest client, or from a local file. Both paths decode through the
//! `image` crate so any format it supports (JPEG, PNG, WebP, ...) works.

use crate::config::{FetchConfig, ImageFit};
use crate::error::{CardError, Result};
use image::RgbImage;
use image::imageops::{self, FilterType};
use reqwest::blocking::Client;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where the source image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(Url),
    Local(PathBuf),
}

impl ImageSource {
    /// Classifies an event's `image` field.
    ///
    /// Only `http` and `https` URLs are fetched. `file://` URLs and anything
    /// else, including Windows drive letters that parse as a URL scheme, are
    /// treated as paths.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => ImageSource::Remote(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(ImageSource::Local)
                .unwrap_or_else(|_| ImageSource::Local(PathBuf::from(raw))),
            _ => ImageSource::Local(PathBuf::from(raw)),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Remote(url) => write!(f, "{url}"),
            ImageSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and decodes source images.
pub struct ImageLoader {
    client: Client,
}

impl ImageLoader {
    /// Builds the HTTP client with the configured timeout and user agent.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Loads the image and converts it to 8-bit RGB.
    pub fn load(&self, source: &ImageSource) -> Result<RgbImage> {
        let bytes = match source {
            ImageSource::Remote(url) => self.fetch(url)?,
            ImageSource::Local(path) => fs::read(path).map_err(|e| CardError::io(path, e))?,
        };

        let img = image::load_from_memory(&bytes)?.to_rgb8();
        log::debug!(
            "Decoded {} ({}x{}, {} bytes)",
            source,
            img.width(),
            img.height(),
            bytes.len()
        );
        Ok(img)
    }

    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        log::info!("Fetching image {}", url);
        let response = self.client.get(url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(CardError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// Rectangle of the source image kept on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Computes the visible window of an image on a card.
///
/// The window is anchored to the top of the image and at most `max_height`
/// tall. Images wider than the card keep their horizontal center.
pub fn crop_region(img_width: u32, img_height: u32, card_width: u32, max_height: u32) -> CropRegion {
    let height = img_height.min(max_height);
    let (x, width) = if img_width > card_width {
        ((img_width - card_width) / 2, card_width)
    } else {
        (0, img_width)
    };

    CropRegion {
        x,
        y: 0,
        width,
        height,
    }
}

/// Scales and crops an image to fit the card's image slot.
pub fn fit_image(img: &RgbImage, card_width: u32, max_height: u32, fit: ImageFit) -> RgbImage {
    let scaled;
    let img = match fit {
        ImageFit::Scale if img.width() > card_width && card_width > 0 => {
            let height = (img.height() as u64 * card_width as u64 / img.width() as u64).max(1) as u32;
            scaled = imageops::resize(img, card_width, height, FilterType::Triangle);
            &scaled
        }
        _ => img,
    };

    let region = crop_region(img.width(), img.height(), card_width, max_height);
    imageops::crop_imm(img, region.x, region.y, region.width, region.height).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn classifies_sources() {
        assert!(matches!(
            ImageSource::parse("https://example.com/a.jpg?x=1"),
            ImageSource::Remote(_)
        ));
        assert!(matches!(
            ImageSource::parse("http://127.0.0.1:8080/a.png"),
            ImageSource::Remote(_)
        ));
        assert_eq!(
            ImageSource::parse("images/a.jpg"),
            ImageSource::Local(PathBuf::from("images/a.jpg"))
        );
        assert_eq!(
            ImageSource::parse("file:///tmp/a.jpg"),
            ImageSource::Local(PathBuf::from("/tmp/a.jpg"))
        );
        assert!(matches!(ImageSource::parse("C:\\a.jpg"), ImageSource::Local(_)));
    }

    #[test]
    fn tall_narrow_image_is_cut_at_max_height() {
        assert_eq!(
            crop_region(800, 1200, 1080, 600),
            CropRegion {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn wide_image_is_centered() {
        assert_eq!(
            crop_region(2000, 500, 1080, 600),
            CropRegion {
                x: 460,
                y: 0,
                width: 1080,
                height: 500
            }
        );
    }

    #[test]
    fn zero_max_height_is_empty() {
        assert_eq!(crop_region(100, 100, 1080, 0).height, 0);
    }

    #[test]
    fn scale_fit_shrinks_to_card_width_first() {
        let img = RgbImage::from_pixel(2160, 1000, Rgb([10, 20, 30]));
        let fitted = fit_image(&img, 1080, 600, ImageFit::Scale);
        assert_eq!(fitted.dimensions(), (1080, 500));

        let tall = RgbImage::from_pixel(2160, 3000, Rgb([10, 20, 30]));
        let fitted = fit_image(&tall, 1080, 600, ImageFit::Scale);
        assert_eq!(fitted.dimensions(), (1080, 600));
    }

    #[test]
    fn crop_fit_keeps_original_scale() {
        let img = RgbImage::from_fn(2160, 1000, |x, _| Rgb([(x % 256) as u8, 0, 0]));
        let fitted = fit_image(&img, 1080, 600, ImageFit::Crop);
        assert_eq!(fitted.dimensions(), (1080, 600));
        // First kept column is source column 540
        assert_eq!(fitted.get_pixel(0, 0).0[0], (540 % 256) as u8);
    }

    #[test]
    fn small_image_is_untouched() {
        let img = RgbImage::from_pixel(300, 200, Rgb([1, 2, 3]));
        assert_eq!(fit_image(&img, 1080, 600, ImageFit::Scale), img);
    }

    #[test]
    fn missing_local_file_is_io_error() {
        let loader = ImageLoader::new(&FetchConfig::default()).unwrap();
        let err = loader
            .load(&ImageSource::Local(PathBuf::from("/nonexistent/event.jpg")))
            .unwrap_err();
        assert!(matches!(err, CardError::Io { .. }));
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.jpg");
        fs::write(&path, b"definitely not a jpeg").unwrap();
        let loader = ImageLoader::new(&FetchConfig::default()).unwrap();
        let err = loader.load(&ImageSource::Local(path)).unwrap_err();
        assert!(matches!(err, CardError::Decode(_)));
    }
}
