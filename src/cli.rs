// Command line interface
// Without a subcommand the GUI starts; subcommands run headless

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use image::RgbaImage;

use crate::capture::display::{DisplaySource, VirtualScreenResolver, XcapDisplays};
use crate::capture::grab::{ScreenGrabber, XcapGrabber};
use crate::capture::output::save_capture;
use crate::capture::service::{AppWindow, CaptureService};
use crate::config::SettingsStore;
use crate::domain::{Point, SelectionRect};
use crate::error::CaptureError;

/// regionshot - capture a rectangle of the desktop to a PNG
#[derive(Parser, Debug)]
#[command(name = "regionshot")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture a rectangle given in desktop coordinates
    Capture {
        #[arg(short, long, allow_negative_numbers = true)]
        x: i32,
        #[arg(short, long, allow_negative_numbers = true)]
        y: i32,
        #[arg(short = 'W', long)]
        width: u32,
        #[arg(short = 'H', long)]
        height: u32,
        /// Subfolder of the master folder
        #[arg(short, long)]
        folder: String,
        /// Overrides the saved master folder
        #[arg(short, long, value_name = "DIR")]
        master: Option<String>,
    },
    /// Print display bounds and the virtual screen covering them
    Monitors,
}

/// No window to get out of the way of
struct Headless;

impl AppWindow for Headless {
    fn hide(&mut self) {
        log::debug!("Headless capture, nothing to hide");
    }

    fn show(&mut self) {}
}

/// Grab an absolute rectangle without a window or a virtual screen lookup
fn headless_capture<G: ScreenGrabber>(
    grabber: G,
    rect: SelectionRect,
) -> Result<RgbaImage, CaptureError> {
    // Nothing on screen to wait for
    let service = CaptureService::new(grabber).with_settle_delay(Duration::ZERO);
    // Absolute rectangles ignore the origin
    service.capture(&mut Headless, rect, Point::default())
}

pub fn run(args: Args) -> Result<()> {
    let store = SettingsStore::new(args.settings.unwrap_or_else(SettingsStore::default_path));
    log::debug!("Settings file: {}", store.path().display());

    match args.command {
        None => crate::core::app::run(store).map_err(|err| anyhow!("{err}")),
        Some(Command::Capture {
            x,
            y,
            width,
            height,
            folder,
            master,
        }) => {
            let master = master.unwrap_or_else(|| store.load().master_folder);
            let image = headless_capture(XcapGrabber, SelectionRect::absolute(x, y, width, height))?;
            let capture = save_capture(image, &master, &folder, Local::now())?;
            println!("{}", capture.path.display());
            Ok(())
        }
        Some(Command::Monitors) => {
            let displays = XcapDisplays.displays().context("Failed to enumerate displays")?;
            for display in &displays {
                println!(
                    "{}x{}{:+}{:+}",
                    display.width(),
                    display.height(),
                    display.left,
                    display.top
                );
            }
            let screen = VirtualScreenResolver::new(XcapDisplays).resolve();
            println!(
                "virtual: {}x{}{:+}{:+}",
                screen.width, screen.height, screen.origin_x, screen.origin_y
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::service::tests::FakeGrabber;
    use crate::domain::Rect;

    #[test]
    fn no_subcommand_starts_gui() {
        let args = Args::try_parse_from(["regionshot"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn capture_accepts_negative_offsets() {
        let args = Args::try_parse_from([
            "regionshot", "capture", "-x", "-1920", "-y", "-40", "-W", "100", "-H", "50", "-f",
            "demoA",
        ])
        .unwrap();
        match args.command {
            Some(Command::Capture { x, y, width, height, folder, master }) => {
                assert_eq!((x, y, width, height), (-1920, -40, 100, 50));
                assert_eq!(folder, "demoA");
                assert!(master.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn headless_capture_grabs_the_given_rect() {
        let grabber = FakeGrabber::default();
        let image =
            headless_capture(&grabber, SelectionRect::absolute(-1920, -40, 100, 50)).unwrap();
        assert_eq!(image.dimensions(), (100, 50));
        assert_eq!(
            grabber.requests.borrow().as_slice(),
            &[Rect::from_origin_size(-1920, -40, 100, 50)]
        );
    }

    #[test]
    fn negative_extent_is_rejected() {
        let result = Args::try_parse_from([
            "regionshot", "capture", "-x", "0", "-y", "0", "-W", "-5", "-H", "5", "-f", "a",
        ]);
        assert!(result.is_err());
    }
}
