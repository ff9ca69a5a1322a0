//! Screen capture module
//!
//! This module consolidates:
//! - Display enumeration and the virtual screen (display.rs)
//! - Pixel grabbing (grab.rs)
//! - Capture sequencing with window hiding (service.rs)
//! - Output paths and PNG writing (output.rs)

pub mod display;
pub mod grab;
pub mod output;
pub mod service;

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::output::save_capture;
    use super::service::CaptureService;
    use super::service::tests::{FakeGrabber, FakeWindow};
    use crate::domain::{Point, SelectionRect};

    #[test]
    fn capture_writes_one_png_of_the_selected_size() {
        let dir = tempfile::tempdir().unwrap();
        let master = dir.path().join("shots");
        let service = CaptureService::new(FakeGrabber::default());
        let mut window = FakeWindow::default();

        let image = service
            .capture(
                &mut window,
                SelectionRect::absolute(0, 0, 100, 50),
                Point::default(),
            )
            .unwrap();
        let result = save_capture(image, master.to_str().unwrap(), "demoA", Local::now()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(master.join("demoA"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries.len(), 1);
        let name = &entries[0];
        assert!(name.starts_with("screenshot_") && name.ends_with(".png"), "{name}");
        let stamp = &name["screenshot_".len()..name.len() - ".png".len()];
        let (date, time) = stamp.split_once('_').unwrap();
        assert!(date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()), "{name}");
        assert!(time.len() == 6 && time.bytes().all(|b| b.is_ascii_digit()), "{name}");

        let written = image::open(&result.path).unwrap();
        assert_eq!((written.width(), written.height()), (100, 50));
        assert!(window.visible);
    }
}
