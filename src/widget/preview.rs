//! Downscaled preview of the last capture

use chrono::{DateTime, Local};
use iced::widget::image::Handle;
use image::RgbaImage;

pub const MAX_WIDTH: u32 = 380;
pub const MAX_HEIGHT: u32 = 300;

/// What the main view shows under the capture controls
#[derive(Clone, Debug)]
pub struct Preview {
    pub handle: Handle,
    pub taken_at: DateTime<Local>,
}

impl Preview {
    pub fn new(image: &RgbaImage, taken_at: DateTime<Local>) -> Self {
        let scaled = scaled(image);
        let handle = Handle::from_rgba(scaled.width(), scaled.height(), scaled.into_raw());
        Self { handle, taken_at }
    }

    pub fn caption_timestamp(&self) -> String {
        self.taken_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Largest size with the same aspect ratio that fits the preview box, never upscaled
pub fn fit_within(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_WIDTH && height <= MAX_HEIGHT {
        return (width, height);
    }
    let (w, h) = (u64::from(width), u64::from(height));
    let (max_w, max_h) = (u64::from(MAX_WIDTH), u64::from(MAX_HEIGHT));
    // Compare aspect ratios without floating point
    let (w, h) = if w * max_h >= h * max_w {
        (max_w, h * max_w / w)
    } else {
        (w * max_h / h, max_h)
    };
    (w.max(1) as u32, h.max(1) as u32)
}

fn scaled(image: &RgbaImage) -> RgbaImage {
    let (width, height) = fit_within(image.width(), image.height());
    if (width, height) == image.dimensions() {
        return image.clone();
    }
    image::imageops::resize(image, width, height, image::imageops::FilterType::Lanczos3)
}
