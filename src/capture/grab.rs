//! OS level pixel grab of an absolute desktop rectangle

use anyhow::{Context, bail};
use image::RgbaImage;

use crate::domain::Rect;

pub trait ScreenGrabber {
    /// Grab the pixels of `area`, given in virtual desktop coordinates
    fn grab(&self, area: Rect) -> anyhow::Result<RgbaImage>;
}

impl<G: ScreenGrabber + ?Sized> ScreenGrabber for &G {
    fn grab(&self, area: Rect) -> anyhow::Result<RgbaImage> {
        (**self).grab(area)
    }
}

/// Grabs through xcap, stitching every monitor the area touches
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapGrabber;

impl ScreenGrabber for XcapGrabber {
    fn grab(&self, area: Rect) -> anyhow::Result<RgbaImage> {
        let mut frames = Vec::new();
        for monitor in xcap::Monitor::all().context("listing monitors")? {
            let bounds = Rect::from_origin_size(
                monitor.x()?,
                monitor.y()?,
                monitor.width()?,
                monitor.height()?,
            );
            if bounds.intersect(area).is_none() {
                continue;
            }
            let name = monitor.name().unwrap_or_default();
            let image = monitor
                .capture_image()
                .with_context(|| format!("capturing monitor {name:?}"))?;
            log::debug!(
                "Captured {name:?} at {bounds:?}: {}x{} pixels",
                image.width(),
                image.height()
            );
            frames.push((image, bounds));
        }
        if frames.is_empty() {
            bail!("area {area:?} is not on any monitor");
        }
        Ok(combined_image(area, frames))
    }
}

/// Paint monitor frames into an image covering exactly `area`.
///
/// Frames whose pixel size differs from their desktop bounds (HiDPI) are
/// scaled to the bounds first. Parts of `area` outside every monitor stay
/// transparent.
pub fn combined_image(area: Rect, frames: Vec<(RgbaImage, Rect)>) -> RgbaImage {
    let width = area.width().max(0) as u32;
    let height = area.height().max(0) as u32;
    let mut image = RgbaImage::new(width, height);
    for (mut frame_image, rect) in frames {
        let width = rect.width() as u32;
        let height = rect.height() as u32;
        if frame_image.dimensions() != (width, height) {
            frame_image = image::imageops::resize(
                &frame_image,
                width,
                height,
                image::imageops::FilterType::Lanczos3,
            );
        }
        let x = i64::from(rect.left) - i64::from(area.left);
        let y = i64::from(rect.top) - i64::from(area.top);
        image::imageops::overlay(&mut image, &frame_image, x, y);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn crops_single_monitor() {
        let area = Rect::from_origin_size(10, 20, 100, 50);
        let image = combined_image(area, vec![(solid(1920, 1080, 7), Rect::new(0, 0, 1920, 1080))]);
        assert_eq!(image.dimensions(), (100, 50));
        assert_eq!(image.get_pixel(0, 0).0, [7, 7, 7, 255]);
    }

    #[test]
    fn stitches_across_a_negative_origin_monitor() {
        let left = Rect::from_origin_size(-100, 0, 100, 100);
        let right = Rect::from_origin_size(0, 0, 100, 100);
        let area = Rect::new(-10, 0, 10, 10);
        let image = combined_image(
            area,
            vec![(solid(100, 100, 1), left), (solid(100, 100, 2), right)],
        );
        assert_eq!(image.dimensions(), (20, 10));
        assert_eq!(image.get_pixel(9, 5).0[0], 1);
        assert_eq!(image.get_pixel(10, 5).0[0], 2);
    }

    #[test]
    fn scales_hidpi_frames_to_desktop_bounds() {
        let bounds = Rect::from_origin_size(0, 0, 50, 50);
        let image = combined_image(bounds, vec![(solid(100, 100, 9), bounds)]);
        assert_eq!(image.dimensions(), (50, 50));
        assert_eq!(image.get_pixel(25, 25).0[3], 255);
    }

    #[test]
    fn area_off_every_monitor_stays_transparent() {
        let area = Rect::from_origin_size(200, 0, 10, 10);
        let image = combined_image(area, vec![(solid(100, 100, 3), Rect::new(0, 0, 100, 100))]);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }
}
