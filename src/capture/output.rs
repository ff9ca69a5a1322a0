//! Where captures are written and how

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::RgbaImage;

use crate::error::{CaptureError, ValidationError};

/// A capture that has been written to disk
#[derive(Clone, Debug)]
pub struct CaptureResult {
    pub image: RgbaImage,
    pub path: PathBuf,
    pub taken_at: DateTime<Local>,
}

/// `{master}/{folder}`
pub fn output_dir(master_folder: &str, folder_name: &str) -> PathBuf {
    Path::new(master_folder).join(folder_name)
}

/// `{master}/{folder}/screenshot_{YYYYMMDD_HHMMSS}.png`
pub fn output_path(master_folder: &str, folder_name: &str, now: DateTime<Local>) -> PathBuf {
    let name = now.format("screenshot_%Y%m%d_%H%M%S.png").to_string();
    output_dir(master_folder, folder_name).join(name)
}

/// Write `image` under the master folder, creating directories on demand.
///
/// A capture taken within the same second as a previous one replaces it.
pub fn save_capture(
    image: RgbaImage,
    master_folder: &str,
    folder_name: &str,
    now: DateTime<Local>,
) -> Result<CaptureResult, CaptureError> {
    if folder_name.trim().is_empty() {
        return Err(ValidationError::EmptyFolderName.into());
    }
    std::fs::create_dir_all(output_dir(master_folder, folder_name))?;
    let path = output_path(master_folder, folder_name, now);
    save_rgba(&image, &path)?;
    log::info!("Screenshot saved to {}", path.display());
    Ok(CaptureResult {
        image,
        path,
        taken_at: now,
    })
}

pub fn save_rgba(img: &RgbaImage, path: &Path) -> Result<(), CaptureError> {
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write_png(&mut writer, img)?;
    Ok(())
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).single().unwrap()
    }

    #[test]
    fn path_uses_timestamped_name() {
        let path = output_path("/tmp/shots", "demoA", fixed_time());
        assert_eq!(
            path,
            PathBuf::from("/tmp/shots/demoA/screenshot_20240309_140507.png")
        );
    }

    #[test]
    fn empty_folder_name_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let master = dir.path().join("master");
        let result = save_capture(
            RgbaImage::new(1, 1),
            master.to_str().unwrap(),
            "  ",
            fixed_time(),
        );
        assert!(matches!(
            result,
            Err(CaptureError::Validation(ValidationError::EmptyFolderName))
        ));
        assert!(!master.exists());
    }

    #[test]
    fn same_second_capture_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let master = dir.path().to_str().unwrap();
        save_capture(RgbaImage::new(2, 2), master, "a", fixed_time()).unwrap();
        let second = save_capture(RgbaImage::new(3, 3), master, "a", fixed_time()).unwrap();
        assert_eq!(std::fs::read_dir(dir.path().join("a")).unwrap().count(), 1);
        assert_eq!(image::open(&second.path).unwrap().width(), 3);
    }

    #[test]
    fn unwritable_destination_reports_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the folder should be
        std::fs::write(dir.path().join("taken"), b"").unwrap();
        let result = save_capture(
            RgbaImage::new(1, 1),
            dir.path().to_str().unwrap(),
            "taken",
            fixed_time(),
        );
        assert!(matches!(result, Err(CaptureError::Write(_))));
    }
}
