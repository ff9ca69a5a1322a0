//! Handlers for selection-related messages
//!
//! Handles: Start, PointerMoved, PointerPressed, PointerReleased, Cancel, ApplyManual

use iced::{Size, Task, window};

use crate::core::app::App;
use crate::domain::{OverlayOutcome, VirtualScreen};
use crate::fl;
use crate::session::messages::{Msg, SelectMsg, WindowMsg};
use crate::session::state::Notification;

use super::HandlerResult;

pub fn update(app: &mut App, msg: SelectMsg) -> HandlerResult {
    match msg {
        SelectMsg::Start => handle_start(app),
        SelectMsg::PointerMoved(position) => {
            app.overlay.pointer_moved(position);
            Task::none()
        }
        SelectMsg::PointerPressed(position) => {
            app.overlay.pointer_pressed(position);
            Task::none()
        }
        SelectMsg::PointerReleased(position) => match app.overlay.pointer_released(position) {
            Some(outcome) => finish(app, outcome),
            None => Task::none(),
        },
        SelectMsg::Cancel => match app.overlay.cancel() {
            Some(outcome) => finish(app, outcome),
            None => Task::none(),
        },
        SelectMsg::ApplyManual => handle_apply_manual(app),
    }
}

/// Borderless, transparent surface covering the whole virtual screen
pub fn overlay_settings(screen: VirtualScreen) -> window::Settings {
    window::Settings {
        size: Size::new(screen.width as f32, screen.height as f32),
        position: window::Position::Specific(iced::Point::new(
            screen.origin_x as f32,
            screen.origin_y as f32,
        )),
        decorations: false,
        transparent: true,
        resizable: false,
        level: window::Level::AlwaysOnTop,
        exit_on_close_request: true,
        ..Default::default()
    }
}

/// Hide the main window and cover the desktop with the overlay
fn handle_start(app: &mut App) -> HandlerResult {
    if app.overlay.is_active() || app.capture_pending {
        return Task::none();
    }
    app.snapshot();
    // Monitors may have been plugged in since the last session
    app.screen = app.resolver.resolve();
    app.overlay.arm(app.screen);

    let (overlay_id, open_task) = window::open(overlay_settings(app.screen));
    app.overlay_id = Some(overlay_id);
    log::debug!("Selection overlay {overlay_id:?} over {:?}", app.screen);

    Task::batch([
        app.hide_main(),
        open_task.map(|id| Msg::window(WindowMsg::Opened(id))),
    ])
}

/// Tear the overlay down and report how the session ended
pub fn finish(app: &mut App, outcome: OverlayOutcome) -> HandlerResult {
    match outcome {
        OverlayOutcome::Resolved(rect) => {
            app.controller.apply_selection(rect);
            app.notify(Notification::info(fl!("area-selected")));
        }
        OverlayOutcome::Cancelled => {
            app.notify(Notification::error(fl!("area-canceled")));
        }
    }

    let mut tasks = vec![app.show_main()];
    if let Some(id) = app.overlay_id.take() {
        tasks.push(window::close(id));
    }
    Task::batch(tasks)
}

fn handle_apply_manual(app: &mut App) -> HandlerResult {
    match app.controller.apply_manual() {
        Ok(rect) => {
            log::debug!("Manual selection {rect:?}");
            app.notify(Notification::info(fl!("coordinates-updated")));
        }
        Err(err) => app.notify(Notification::error(err.user_message())),
    }
    Task::none()
}
