//! Display enumeration and virtual screen resolution

use anyhow::Context;

use crate::domain::{Rect, VirtualScreen};

/// Source of attached display geometry
pub trait DisplaySource {
    /// Bounds of every active display in desktop coordinates
    fn displays(&self) -> anyhow::Result<Vec<Rect>>;

    /// Size of a single full screen grab, used when enumeration yields nothing
    fn fallback_size(&self) -> anyhow::Result<(u32, u32)>;
}

/// Computes the bounding rectangle of all monitors
pub struct VirtualScreenResolver<S> {
    source: S,
}

impl<S: DisplaySource> VirtualScreenResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Never fails: enumeration problems degrade to a single display
    pub fn resolve(&self) -> VirtualScreen {
        match self.source.displays() {
            Ok(displays) => {
                if let Some(screen) = VirtualScreen::bounding(&displays) {
                    log::debug!(
                        "Virtual screen from {} display(s): {screen:?}",
                        displays.len()
                    );
                    return screen;
                }
                log::warn!("No displays enumerated, falling back to a single screen");
            }
            Err(err) => log::warn!("Error getting monitor info: {err:#}"),
        }
        self.fallback()
    }

    fn fallback(&self) -> VirtualScreen {
        match self.source.fallback_size() {
            Ok((width, height)) => VirtualScreen::new(0, 0, width, height),
            Err(err) => {
                log::error!("Could not determine screen size: {err:#}");
                VirtualScreen::default()
            }
        }
    }
}

/// Displays as reported by xcap
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapDisplays;

impl DisplaySource for XcapDisplays {
    fn displays(&self) -> anyhow::Result<Vec<Rect>> {
        xcap::Monitor::all()
            .context("listing monitors")?
            .iter()
            .map(|monitor| -> anyhow::Result<Rect> {
                Ok(Rect::from_origin_size(
                    monitor.x()?,
                    monitor.y()?,
                    monitor.width()?,
                    monitor.height()?,
                ))
            })
            .collect()
    }

    fn fallback_size(&self) -> anyhow::Result<(u32, u32)> {
        let monitor = xcap::Monitor::all()
            .context("listing monitors")?
            .into_iter()
            .next()
            .context("no monitor to grab")?;
        let image = monitor.capture_image().context("full screen grab")?;
        Ok(image.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeDisplays {
        displays: anyhow::Result<Vec<Rect>>,
        fallback: Option<(u32, u32)>,
    }

    impl DisplaySource for FakeDisplays {
        fn displays(&self) -> anyhow::Result<Vec<Rect>> {
            match &self.displays {
                Ok(displays) => Ok(displays.clone()),
                Err(err) => Err(anyhow::anyhow!("{err}")),
            }
        }

        fn fallback_size(&self) -> anyhow::Result<(u32, u32)> {
            self.fallback.context("no screen")
        }
    }

    fn resolve(displays: anyhow::Result<Vec<Rect>>, fallback: Option<(u32, u32)>) -> VirtualScreen {
        VirtualScreenResolver::new(FakeDisplays { displays, fallback }).resolve()
    }

    #[test]
    fn bounds_every_display() {
        let layout = vec![
            Rect::from_origin_size(0, 0, 1920, 1080),
            Rect::from_origin_size(-1280, 200, 1280, 1024),
        ];
        let screen = resolve(Ok(layout.clone()), None);
        assert_eq!(screen, VirtualScreen::new(-1280, 0, 3200, 1224));
        assert!(layout.iter().all(|m| screen.rect().contains(*m)));
    }

    #[test]
    fn empty_enumeration_uses_single_screen_grab() {
        assert_eq!(
            resolve(Ok(vec![]), Some((1366, 768))),
            VirtualScreen::new(0, 0, 1366, 768)
        );
    }

    #[test]
    fn enumeration_error_uses_single_screen_grab() {
        assert_eq!(
            resolve(Err(anyhow::anyhow!("no display server")), Some((800, 600))),
            VirtualScreen::new(0, 0, 800, 600)
        );
    }

    #[test]
    fn total_failure_still_yields_a_screen() {
        let screen = resolve(Err(anyhow::anyhow!("boom")), None);
        assert!(screen.width >= 1 && screen.height >= 1);
    }
}
