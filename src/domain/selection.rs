//! Region selection state machine driven by pointer events on the overlay
//!
//! Pointer positions handed to the overlay are in surface coordinates, i.e.
//! relative to the virtual screen origin. Resolved selections are always
//! absolute.

use super::geometry::{CoordSpace, Point, SelectionRect, VirtualScreen};

/// Overlay lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    /// No overlay shown
    #[default]
    Idle,
    /// Overlay shown, waiting for the pointer to go down
    Armed,
    /// Pointer held down, rectangle follows the pointer
    Dragging { anchor: Point, current: Point },
    /// Pointer released, selection produced
    Resolved(SelectionRect),
    /// Cancel key pressed before a selection was produced
    Cancelled,
}

/// Result handed back to the application when the overlay finishes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayOutcome {
    Resolved(SelectionRect),
    Cancelled,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionOverlay {
    state: OverlayState,
    screen: VirtualScreen,
    /// Last known pointer position, drives the crosshair guides
    pointer: Option<Point>,
}

impl SelectionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Whether the overlay surface should currently be shown
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            OverlayState::Armed | OverlayState::Dragging { .. }
        )
    }

    /// Start a selection session covering `screen`.
    ///
    /// Returns `false` if a session is already running.
    pub fn arm(&mut self, screen: VirtualScreen) -> bool {
        if self.is_active() {
            return false;
        }
        self.screen = screen;
        self.pointer = None;
        self.state = OverlayState::Armed;
        true
    }

    pub fn pointer_moved(&mut self, position: Point) {
        match &mut self.state {
            OverlayState::Armed => self.pointer = Some(position),
            OverlayState::Dragging { current, .. } => {
                *current = position;
                self.pointer = Some(position);
            }
            _ => {}
        }
    }

    pub fn pointer_pressed(&mut self, position: Point) {
        if self.state == OverlayState::Armed {
            self.pointer = Some(position);
            self.state = OverlayState::Dragging {
                anchor: position,
                current: position,
            };
        }
    }

    pub fn pointer_released(&mut self, position: Point) -> Option<OverlayOutcome> {
        let OverlayState::Dragging { anchor, .. } = self.state else {
            return None;
        };
        let rect = SelectionRect::from_corners(anchor, position, CoordSpace::Local)
            .to_absolute(self.screen.origin());
        log::debug!("Selection resolved: {rect:?}");
        self.state = OverlayState::Resolved(rect);
        self.outcome()
    }

    pub fn cancel(&mut self) -> Option<OverlayOutcome> {
        if !self.is_active() {
            return None;
        }
        log::debug!("Selection cancelled");
        self.state = OverlayState::Cancelled;
        self.outcome()
    }

    /// How the last session ended, if it has
    pub fn outcome(&self) -> Option<OverlayOutcome> {
        match self.state {
            OverlayState::Resolved(rect) => Some(OverlayOutcome::Resolved(rect)),
            OverlayState::Cancelled => Some(OverlayOutcome::Cancelled),
            _ => None,
        }
    }

    /// Rectangle currently being dragged, in surface coordinates
    pub fn pending_rect(&self) -> Option<SelectionRect> {
        match self.state {
            OverlayState::Dragging { anchor, current } => {
                Some(SelectionRect::from_corners(anchor, current, CoordSpace::Local))
            }
            _ => None,
        }
    }

    /// Absolute desktop position of the pointer, shown in the live readout
    pub fn pointer_absolute(&self) -> Option<Point> {
        self.pointer.map(|p| {
            Point::new(p.x + self.screen.origin_x, p.y + self.screen.origin_y)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(screen: VirtualScreen) -> SelectionOverlay {
        let mut overlay = SelectionOverlay::new();
        assert!(overlay.arm(screen));
        overlay
    }

    #[test]
    fn drag_resolves_to_absolute_rect() {
        let screen = VirtualScreen::new(-1920, 0, 3840, 1080);
        let mut overlay = armed(screen);
        overlay.pointer_moved(Point::new(10, 10));
        overlay.pointer_pressed(Point::new(500, 300));
        overlay.pointer_moved(Point::new(200, 400));
        assert_eq!(
            overlay.pending_rect(),
            Some(SelectionRect::local(200, 300, 300, 100))
        );

        let outcome = overlay.pointer_released(Point::new(100, 450));
        let expected = SelectionRect::absolute(100 - 1920, 300, 400, 150);
        assert_eq!(outcome, Some(OverlayOutcome::Resolved(expected)));
        assert_eq!(overlay.state(), OverlayState::Resolved(expected));
        assert!(!overlay.is_active());
        assert_eq!(expected.to_local(screen.origin()).x, 100);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut overlay = armed(VirtualScreen::new(0, 0, 800, 600));
        assert_eq!(overlay.pointer_released(Point::new(5, 5)), None);
        assert_eq!(overlay.state(), OverlayState::Armed);
    }

    #[test]
    fn zero_size_drag_is_resolved() {
        let mut overlay = armed(VirtualScreen::new(0, 0, 800, 600));
        overlay.pointer_pressed(Point::new(40, 40));
        let Some(OverlayOutcome::Resolved(rect)) = overlay.pointer_released(Point::new(40, 40))
        else {
            panic!("expected a resolved selection");
        };
        assert!(rect.is_empty());
    }

    #[test]
    fn cancel_while_dragging() {
        let mut overlay = armed(VirtualScreen::new(0, 0, 800, 600));
        overlay.pointer_pressed(Point::new(1, 2));
        assert_eq!(overlay.cancel(), Some(OverlayOutcome::Cancelled));
        assert_eq!(overlay.state(), OverlayState::Cancelled);
        assert_eq!(overlay.cancel(), None);
        assert_eq!(overlay.pointer_released(Point::new(9, 9)), None);
    }

    #[test]
    fn cannot_arm_twice() {
        let mut overlay = armed(VirtualScreen::new(0, 0, 800, 600));
        assert!(!overlay.arm(VirtualScreen::new(0, 0, 10, 10)));
        overlay.cancel();
        assert_eq!(overlay.outcome(), Some(OverlayOutcome::Cancelled));
        assert!(overlay.arm(VirtualScreen::new(0, 0, 10, 10)));
        assert_eq!(overlay.pointer(), None);
        assert_eq!(overlay.outcome(), None);
    }

    #[test]
    fn readout_uses_absolute_coordinates() {
        let mut overlay = armed(VirtualScreen::new(-100, -50, 800, 600));
        overlay.pointer_moved(Point::new(100, 50));
        assert_eq!(overlay.pointer_absolute(), Some(Point::new(0, 0)));
    }

    #[test]
    fn idle_overlay_ignores_pointer() {
        let mut overlay = SelectionOverlay::new();
        overlay.pointer_pressed(Point::new(1, 1));
        overlay.pointer_moved(Point::new(2, 2));
        assert_eq!(overlay.state(), OverlayState::Idle);
        assert_eq!(overlay.pointer(), None);
    }
}
