//! View construction for the main, settings and overlay windows

use iced::widget::{button, canvas, column, container, image, row, text, text_input};
use iced::{Alignment, Background, Element, Length, Theme};

use crate::core::app::App;
use crate::fl;
use crate::session::messages::{CaptureMsg, Msg, SelectMsg, SettingsMsg};
use crate::session::state::{CoordinateField, NotificationKind};
use crate::widget::SelectionCanvas;
use crate::widget::preview::{MAX_HEIGHT, MAX_WIDTH};

const PADDING: u16 = 16;
const SPACING: u16 = 10;
const LABEL_WIDTH: f32 = 60.0;

pub fn main(app: &App) -> Element<'_, Msg> {
    let fields = &app.controller.fields;

    let folder = column![
        text(fl!("folder-name")),
        text_input("", &fields.folder_name).on_input(Msg::FolderNameChanged),
    ]
    .spacing(4);

    let select = button(text(fl!("select-area")))
        .width(Length::Fill)
        .on_press(Msg::select(SelectMsg::Start));

    let coordinates = [
        (CoordinateField::X, fl!("coord-x")),
        (CoordinateField::Y, fl!("coord-y")),
        (CoordinateField::Width, fl!("coord-width")),
        (CoordinateField::Height, fl!("coord-height")),
    ]
    .into_iter()
    .fold(column![].spacing(4), |col, (field, label)| {
        col.push(
            row![
                text(label).width(Length::Fixed(LABEL_WIDTH)),
                text_input("", fields.coordinates.get(field))
                    .on_input(move |value| Msg::CoordinateChanged(field, value))
                    .on_submit(Msg::select(SelectMsg::ApplyManual)),
            ]
            .spacing(SPACING)
            .align_y(Alignment::Center),
        )
    });

    let update = button(text(fl!("update-coordinates"))).on_press(Msg::select(SelectMsg::ApplyManual));

    // Disabled while a grab is in flight
    let take = button(text(fl!("take-screenshot")))
        .width(Length::Fill)
        .on_press_maybe((!app.capture_pending).then_some(Msg::capture(CaptureMsg::Take)));

    let preview: Element<'_, Msg> = match &app.preview {
        Some(preview) => column![
            image(preview.handle.clone()),
            text(fl!(
                "preview-caption",
                timestamp = preview.caption_timestamp()
            ))
            .size(12),
        ]
        .spacing(4)
        .align_x(Alignment::Center)
        .into(),
        None => text(fl!("preview-placeholder")).size(12).into(),
    };
    // Room for the largest preview plus its caption
    let preview = container(preview)
        .center_x(Length::Fixed(MAX_WIDTH as f32))
        .center_y(Length::Fixed(MAX_HEIGHT as f32 + 24.0));

    let settings = button(text(fl!("open-settings"))).on_press(Msg::settings(SettingsMsg::Open));

    page(
        column![
            folder,
            select,
            coordinates,
            update,
            take,
            preview,
            settings,
            notification(app),
        ]
        .spacing(SPACING),
    )
}

pub fn settings(app: &App) -> Element<'_, Msg> {
    let master = column![
        text(fl!("master-folder")),
        row![
            text_input("", &app.master_input)
                .on_input(|path| Msg::settings(SettingsMsg::MasterFolderChanged(path))),
            button(text(fl!("browse"))).on_press(Msg::settings(SettingsMsg::Browse)),
        ]
        .spacing(SPACING)
        .align_y(Alignment::Center),
    ]
    .spacing(4);

    let back = button(text(fl!("back-to-main")))
        .width(Length::Fill)
        .on_press(Msg::settings(SettingsMsg::Back));

    page(column![master, back, notification(app)].spacing(SPACING))
}

/// Shaded full-screen canvas for the overlay window
pub fn overlay(app: &App) -> Element<'_, Msg> {
    canvas(SelectionCanvas::new(&app.overlay))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn notification(app: &App) -> Element<'_, Msg> {
    let Some(notification) = &app.notification else {
        return text("").into();
    };
    let style = match notification.kind {
        NotificationKind::Info => text::success,
        NotificationKind::Error => text::danger,
    };
    text(notification.message.as_str()).style(style).into()
}

/// Opaque backdrop; windows otherwise clear to transparent
fn page<'a>(content: impl Into<Element<'a, Msg>>) -> Element<'a, Msg> {
    container(content)
        .padding(PADDING)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|theme: &Theme| container::Style {
            background: Some(Background::Color(theme.palette().background)),
            ..Default::default()
        })
        .into()
}
