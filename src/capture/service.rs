//! Capture sequencing: hide the requesting window, settle, grab, restore

use std::time::Duration;

use image::RgbaImage;

use crate::domain::{Point, SelectionRect};
use crate::error::{CaptureError, ValidationError};

use super::grab::ScreenGrabber;

/// Pause between hiding the window and grabbing, so its fade-out is not captured
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// The application window a capture has to get out of the way of
pub trait AppWindow {
    fn hide(&mut self);
    fn show(&mut self);
}

/// Hides a window for as long as it lives
struct HiddenWindow<'a, W: AppWindow + ?Sized> {
    window: &'a mut W,
}

impl<'a, W: AppWindow + ?Sized> HiddenWindow<'a, W> {
    fn new(window: &'a mut W) -> Self {
        window.hide();
        Self { window }
    }
}

impl<W: AppWindow + ?Sized> Drop for HiddenWindow<'_, W> {
    fn drop(&mut self) {
        self.window.show();
    }
}

/// Reject selections that cannot produce an image
pub fn validate_selection(rect: SelectionRect) -> Result<(), ValidationError> {
    if rect.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    Ok(())
}

pub struct CaptureService<G> {
    grabber: G,
    settle_delay: Duration,
}

impl<G: ScreenGrabber> CaptureService<G> {
    pub fn new(grabber: G) -> Self {
        Self {
            grabber,
            settle_delay: SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Grab `rect` without touching any window.
    ///
    /// Local rectangles are translated by `origin` first.
    pub fn grab(&self, rect: SelectionRect, origin: Point) -> Result<RgbaImage, CaptureError> {
        validate_selection(rect)?;
        let area = rect.to_absolute(origin).bounds();
        log::info!("Grabbing {area:?}");
        self.grabber.grab(area).map_err(CaptureError::Grab)
    }

    /// Hide `window`, wait for it to disappear, grab `rect`, then show it again.
    ///
    /// The window is shown again on every path out of this function.
    pub fn capture<W: AppWindow + ?Sized>(
        &self,
        window: &mut W,
        rect: SelectionRect,
        origin: Point,
    ) -> Result<RgbaImage, CaptureError> {
        validate_selection(rect)?;
        let _hidden = HiddenWindow::new(window);
        std::thread::sleep(self.settle_delay);
        self.grab(rect, origin)
    }
}
