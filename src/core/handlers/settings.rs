//! Handlers for settings view messages
//!
//! Handles: Open, Back, MasterFolderChanged, Browse, FolderPicked

use std::path::PathBuf;

use iced::Task;

use crate::core::app::App;
use crate::fl;
use crate::session::messages::{Msg, SettingsMsg};
use crate::session::state::{Notification, View};

use super::HandlerResult;

pub fn update(app: &mut App, msg: SettingsMsg) -> HandlerResult {
    match msg {
        SettingsMsg::Open => {
            app.snapshot();
            app.master_input = app.settings.master_folder.clone();
            app.notification = None;
            app.view = View::Settings;
            Task::none()
        }
        SettingsMsg::Back => {
            app.settings.master_folder = app.master_input.clone();
            // Also persists the master folder
            app.snapshot();
            app.controller.restore();
            app.notification = None;
            app.view = View::Main;
            Task::none()
        }
        SettingsMsg::MasterFolderChanged(path) => {
            app.master_input = path;
            Task::none()
        }
        SettingsMsg::Browse => Task::perform(pick_folder(), |picked| {
            Msg::settings(SettingsMsg::FolderPicked(picked))
        }),
        SettingsMsg::FolderPicked(Some(path)) => {
            app.master_input = path.display().to_string();
            app.notify(Notification::info(fl!("master-folder-pending")));
            Task::none()
        }
        SettingsMsg::FolderPicked(None) => Task::none(),
    }
}

async fn pick_folder() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title(fl!("pick-master-folder"))
        .pick_folder()
        .await
        .map(|handle| handle.path().to_path_buf())
}
