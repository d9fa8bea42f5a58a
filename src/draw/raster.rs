//! Conversions between decoded RGB images and Cairo surfaces.

use crate::error::Result;
use image::{Rgb, RgbImage};

/// Copies an RGB image into a new opaque ARGB32 surface.
pub fn surface_from_rgb(img: &RgbImage) -> Result<cairo::ImageSurface> {
    let mut surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, img.width() as i32, img.height() as i32)?;
    let stride = surface.stride() as usize;

    {
        let mut data = surface.data()?;
        for (x, y, Rgb([r, g, b])) in img.enumerate_pixels() {
            // ARGB32 is a native-endian u32 per pixel
            let pixel = 0xFF00_0000 | (u32::from(*r) << 16) | (u32::from(*g) << 8) | u32::from(*b);
            let offset = y as usize * stride + x as usize * 4;
            data[offset..offset + 4].copy_from_slice(&pixel.to_ne_bytes());
        }
    }

    surface.mark_dirty();
    Ok(surface)
}

/// Reads an ARGB32/RGB24 surface back into an RGB image.
///
/// Alpha is dropped; cards are always painted over an opaque background.
pub fn rgb_from_surface(surface: &mut cairo::ImageSurface) -> Result<RgbImage> {
    surface.flush();
    let width = surface.width() as u32;
    let height = surface.height() as u32;
    let stride = surface.stride() as usize;
    let data = surface.data()?;

    let img = RgbImage::from_fn(width, height, |x, y| {
        let offset = y as usize * stride + x as usize * 4;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&data[offset..offset + 4]);
        let pixel = u32::from_ne_bytes(bytes);
        Rgb([(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8])
    });

    Ok(img)
}

/// Paints an RGB image onto the context with its top-left corner at (x, y).
pub fn paint_image(ctx: &cairo::Context, img: &RgbImage, x: f64, y: f64) -> Result<()> {
    if img.width() == 0 || img.height() == 0 {
        return Ok(());
    }

    let surface = surface_from_rgb(img)?;
    ctx.save()?;
    ctx.set_source_surface(&surface, x, y)?;
    ctx.rectangle(x, y, img.width() as f64, img.height() as f64);
    ctx.fill()?;
    ctx.restore()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_survives_surface_round_trip() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 80, y as u8 * 100, 7]));
        let mut surface = surface_from_rgb(&img).unwrap();
        assert_eq!(surface.width(), 3);
        assert_eq!(surface.height(), 2);
        assert_eq!(rgb_from_surface(&mut surface).unwrap(), img);
    }

    #[test]
    fn paint_image_lands_at_offset() {
        let mut target = cairo::ImageSurface::create(cairo::Format::ARgb32, 10, 10).unwrap();
        {
            let ctx = cairo::Context::new(&target).unwrap();
            ctx.set_source_rgb(1.0, 1.0, 1.0);
            ctx.paint().unwrap();
            let red = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
            paint_image(&ctx, &red, 4.0, 5.0).unwrap();
        }
        let out = rgb_from_surface(&mut target).unwrap();
        assert_eq!(out.get_pixel(4, 5), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(5, 6), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(3, 5), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(6, 7), &Rgb([255, 255, 255]));
    }
}
