//! Handlers for capture-related messages
//!
//! Handles: Take, Settled

use chrono::Local;
use iced::Task;

use crate::capture::output::save_capture;
use crate::capture::service::validate_selection;
use crate::core::app::App;
use crate::error::{CaptureError, ValidationError};
use crate::fl;
use crate::session::messages::{CaptureMsg, Msg};
use crate::session::state::{Notification, UiStateController};
use crate::widget::Preview;

use super::HandlerResult;

pub fn update(app: &mut App, msg: CaptureMsg) -> HandlerResult {
    match msg {
        CaptureMsg::Take => handle_take(app),
        CaptureMsg::Settled => handle_settled(app),
    }
}

/// Everything that can be checked before the window goes away
fn preflight(controller: &UiStateController) -> Result<(), ValidationError> {
    let rect = controller.selection().ok_or(ValidationError::NoSelection)?;
    validate_selection(rect)?;
    if controller.fields.folder_name.trim().is_empty() {
        return Err(ValidationError::EmptyFolderName);
    }
    Ok(())
}

fn handle_take(app: &mut App) -> HandlerResult {
    if app.capture_pending || app.overlay.is_active() {
        return Task::none();
    }
    if let Err(err) = preflight(&app.controller) {
        app.notify(Notification::error(err.user_message()));
        return Task::none();
    }

    app.snapshot();
    app.capture_pending = true;
    let delay = app.service.settle_delay();
    app.hide_main().chain(Task::perform(tokio::time::sleep(delay), |_| {
        Msg::capture(CaptureMsg::Settled)
    }))
}

/// Grab and save while the main window is hidden, then bring it back
fn handle_settled(app: &mut App) -> HandlerResult {
    if !app.capture_pending {
        return Task::none();
    }
    app.capture_pending = false;

    let result = app
        .controller
        .selection()
        .ok_or(CaptureError::Validation(ValidationError::NoSelection))
        .and_then(|rect| app.service.grab(rect, app.screen.origin()))
        .and_then(|image| {
            save_capture(
                image,
                &app.settings.master_folder,
                &app.controller.state().folder_name,
                Local::now(),
            )
        });

    match result {
        Ok(capture) => {
            app.preview = Some(Preview::new(&capture.image, capture.taken_at));
            let path = capture.path.display().to_string();
            app.notify(Notification::info(fl!("screenshot-saved", path = path)));
        }
        Err(err) => app.notify(Notification::error(err.user_message())),
    }
    app.show_main()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectionRect;

    fn controller(selection: Option<SelectionRect>, folder: &str) -> UiStateController {
        let mut controller = UiStateController::new();
        if let Some(rect) = selection {
            controller.apply_selection(rect);
        }
        controller.fields.folder_name = folder.into();
        controller
    }

    #[test]
    fn missing_selection_is_rejected() {
        let err = preflight(&controller(None, "demoA")).unwrap_err();
        assert_eq!(err, ValidationError::NoSelection);
        assert_eq!(err.user_message(), "Please select an area first");
    }

    #[test]
    fn zero_area_selection_is_rejected() {
        let rect = SelectionRect::absolute(10, 10, 0, 40);
        assert_eq!(
            preflight(&controller(Some(rect), "demoA")),
            Err(ValidationError::EmptySelection)
        );
    }

    #[test]
    fn blank_folder_name_is_rejected() {
        let rect = SelectionRect::absolute(0, 0, 100, 50);
        assert_eq!(
            preflight(&controller(Some(rect), "  ")),
            Err(ValidationError::EmptyFolderName)
        );
    }

    #[test]
    fn complete_input_passes() {
        let rect = SelectionRect::absolute(-1920, 0, 100, 50);
        assert_eq!(preflight(&controller(Some(rect), "demoA")), Ok(()));
    }
}
