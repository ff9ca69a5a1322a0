use iced::{Color, Element, Size, Subscription, Task, Theme, event, keyboard, window};

use crate::capture::display::{VirtualScreenResolver, XcapDisplays};
use crate::capture::grab::XcapGrabber;
use crate::capture::service::CaptureService;
use crate::config::{Settings, SettingsStore, WindowGeometry};
use crate::core::handlers;
use crate::core::view;
use crate::domain::{SelectionOverlay, VirtualScreen};
use crate::fl;
use crate::session::messages::{Msg, WindowMsg};
use crate::session::shortcuts;
use crate::session::state::{Notification, NotificationKind, UiStateController, View};
use crate::widget::Preview;

pub const DEFAULT_SIZE: Size = Size::new(400.0, 500.0);
const MIN_SIZE: Size = Size::new(360.0, 420.0);

pub(crate) fn run(store: SettingsStore) -> iced::Result {
    iced::daemon(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .style(App::style)
        .run_with(move || App::new(store))
}

pub struct App {
    pub store: SettingsStore,
    pub settings: Settings,
    pub controller: UiStateController,
    pub view: View,
    /// Master folder as typed in the settings view, stored on "Back"
    pub master_input: String,
    pub notification: Option<Notification>,
    pub preview: Option<Preview>,
    pub screen: VirtualScreen,
    pub resolver: VirtualScreenResolver<XcapDisplays>,
    pub overlay: SelectionOverlay,
    pub service: CaptureService<XcapGrabber>,
    pub main_id: window::Id,
    pub overlay_id: Option<window::Id>,
    pub main_position: Option<iced::Point>,
    pub main_size: Size,
    /// Main window is hidden and a grab is scheduled
    pub capture_pending: bool,
}

impl App {
    fn new(store: SettingsStore) -> (Self, Task<Msg>) {
        let settings = store.load();
        let geometry = settings.geometry();
        let main_size = geometry
            .map(|g| Size::new(g.width as f32, g.height as f32))
            .unwrap_or(DEFAULT_SIZE);
        let main_position = geometry.map(|g| iced::Point::new(g.x as f32, g.y as f32));

        let (main_id, open_task) = window::open(window::Settings {
            size: main_size,
            min_size: Some(MIN_SIZE),
            position: main_position
                .map(window::Position::Specific)
                .unwrap_or(window::Position::Centered),
            ..Default::default()
        });

        let resolver = VirtualScreenResolver::new(XcapDisplays);
        let screen = resolver.resolve();
        log::info!("Virtual screen: {screen:?}");

        let app = Self {
            master_input: settings.master_folder.clone(),
            store,
            settings,
            controller: UiStateController::new(),
            view: View::Main,
            notification: None,
            preview: None,
            screen,
            resolver,
            overlay: SelectionOverlay::new(),
            service: CaptureService::new(XcapGrabber),
            main_id,
            overlay_id: None,
            main_position,
            main_size,
            capture_pending: false,
        };
        (app, open_task.map(|id| Msg::window(WindowMsg::Opened(id))))
    }

    fn title(&self, window_id: window::Id) -> String {
        if Some(window_id) == self.overlay_id {
            return fl!("select-area");
        }
        match self.view {
            View::Main => fl!("app-title"),
            View::Settings => fl!("settings-title"),
        }
    }

    fn update(&mut self, message: Msg) -> Task<Msg> {
        match message {
            Msg::Select(msg) => handlers::selection::update(self, msg),
            Msg::Capture(msg) => handlers::capture::update(self, msg),
            Msg::Settings(msg) => handlers::settings::update(self, msg),
            Msg::Window(msg) => self.update_window(msg),
            Msg::FolderNameChanged(name) => {
                self.controller.fields.folder_name = name;
                Task::none()
            }
            Msg::CoordinateChanged(field, value) => {
                self.controller.fields.coordinates.set(field, value);
                Task::none()
            }
        }
    }

    fn update_window(&mut self, msg: WindowMsg) -> Task<Msg> {
        match msg {
            WindowMsg::Opened(id) if id == self.main_id => {
                log::debug!("Main window opened: {id:?}");
                // No Moved event arrives for the initial placement
                Task::batch([
                    window::gain_focus(id),
                    window::get_position(id)
                        .map(move |position| Msg::window(WindowMsg::Positioned(id, position))),
                ])
            }
            WindowMsg::Opened(id) => {
                log::debug!("Window opened: {id:?}");
                window::gain_focus(id)
            }
            WindowMsg::Positioned(id, Some(position)) if id == self.main_id => {
                self.main_position = Some(position);
                Task::none()
            }
            WindowMsg::Moved(id, position) if id == self.main_id => {
                self.main_position = Some(position);
                Task::none()
            }
            WindowMsg::Resized(id, size) if id == self.main_id => {
                self.main_size = size;
                Task::none()
            }
            WindowMsg::Closed(id) if id == self.main_id => {
                self.snapshot();
                iced::exit()
            }
            WindowMsg::Closed(id) if Some(id) == self.overlay_id => {
                // Closed from outside, e.g. by the window manager
                self.overlay_id = None;
                match self.overlay.cancel() {
                    Some(outcome) => handlers::selection::finish(self, outcome),
                    None => Task::none(),
                }
            }
            WindowMsg::Moved(..)
            | WindowMsg::Positioned(..)
            | WindowMsg::Resized(..)
            | WindowMsg::Closed(_) => Task::none(),
        }
    }

    fn view(&self, window_id: window::Id) -> Element<'_, Msg> {
        if Some(window_id) == self.overlay_id {
            return view::overlay(self);
        }
        match self.view {
            View::Main => view::main(self),
            View::Settings => view::settings(self),
        }
    }

    fn subscription(&self) -> Subscription<Msg> {
        Subscription::batch([
            keyboard::on_key_press(shortcuts::handle_key_press),
            window::close_events().map(|id| Msg::window(WindowMsg::Closed(id))),
            event::listen_with(|event, _status, id| match event {
                iced::Event::Window(window::Event::Moved(position)) => {
                    Some(Msg::window(WindowMsg::Moved(id, position)))
                }
                iced::Event::Window(window::Event::Resized(size)) => {
                    Some(Msg::window(WindowMsg::Resized(id, size)))
                }
                _ => None,
            }),
        ])
    }

    fn theme(&self, _window_id: window::Id) -> Theme {
        Theme::Dark
    }

    /// Windows clear to transparent so the overlay can shade the desktop;
    /// the main views paint their own background.
    fn style(&self, theme: &Theme) -> iced::daemon::Appearance {
        iced::daemon::Appearance {
            background_color: Color::TRANSPARENT,
            text_color: theme.palette().text,
        }
    }

    /// Current main window placement
    pub fn geometry(&self) -> WindowGeometry {
        placement(self.main_size, self.main_position, self.screen)
    }

    /// Preserve what the user typed and where the window is
    pub fn snapshot(&mut self) {
        let geometry = self.geometry();
        self.controller
            .snapshot(Some(geometry), &mut self.settings, &self.store);
    }

    pub fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Info => log::info!("{}", notification.message),
            NotificationKind::Error => log::warn!("{}", notification.message),
        }
        self.notification = Some(notification);
    }

    /// Bring the main window back after the overlay or a capture
    pub fn show_main(&self) -> Task<Msg> {
        Task::batch([
            window::change_mode(self.main_id, window::Mode::Windowed),
            window::gain_focus(self.main_id),
        ])
    }

    pub fn hide_main(&self) -> Task<Msg> {
        window::change_mode(self.main_id, window::Mode::Hidden)
    }
}

/// Window placement to persist; an unknown position is taken as centered on `screen`
fn placement(size: Size, position: Option<iced::Point>, screen: VirtualScreen) -> WindowGeometry {
    let width = size.width.round().max(1.0) as u32;
    let height = size.height.round().max(1.0) as u32;
    let (x, y) = match position {
        Some(position) => (position.x.round() as i32, position.y.round() as i32),
        None => (
            centered(screen.origin_x, screen.width, width),
            centered(screen.origin_y, screen.height, height),
        ),
    };
    WindowGeometry {
        width,
        height,
        x,
        y,
    }
}

fn centered(origin: i32, extent: u32, size: u32) -> i32 {
    let free = i64::from(extent) - i64::from(size);
    (i64::from(origin) + free / 2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_position_is_kept() {
        let geometry = placement(
            Size::new(420.0, 510.4),
            Some(iced::Point::new(-1200.0, 30.0)),
            VirtualScreen::new(-1920, 0, 3840, 1080),
        );
        assert_eq!(geometry.to_string(), "420x510-1200+30");
    }

    #[test]
    fn resize_without_move_is_still_saved() {
        let geometry = placement(Size::new(500.0, 600.0), None, VirtualScreen::new(0, 0, 1920, 1080));
        assert_eq!(
            geometry,
            WindowGeometry {
                width: 500,
                height: 600,
                x: 710,
                y: 240,
            }
        );
    }

    #[test]
    fn unknown_position_centers_on_offset_screen() {
        let geometry = placement(DEFAULT_SIZE, None, VirtualScreen::new(-1920, -100, 3840, 1180));
        assert_eq!((geometry.x, geometry.y), (-1920 + 1720, -100 + 340));
    }
}
