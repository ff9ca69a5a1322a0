//! Full virtual screen canvas feeding pointer input into a [`SelectionOverlay`]

use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, LineDash, Path, Stroke, event};
use iced::{Color, Pixels, Rectangle, Renderer, Size, Theme};

use crate::domain::{Point, SelectionOverlay};
use crate::session::messages::{Msg, SelectMsg};

const SHADE: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.3);
const GUIDE: Color = Color::from_rgb(1.0, 0.0, 0.0);
const OUTLINE_WIDTH: f32 = 2.0;
const GUIDE_DASH: [f32; 2] = [2.0, 2.0];
const READOUT_OFFSET: f32 = 10.0;
const READOUT_SIZE: f32 = 14.0;

pub struct SelectionCanvas<'a> {
    overlay: &'a SelectionOverlay,
}

impl<'a> SelectionCanvas<'a> {
    pub fn new(overlay: &'a SelectionOverlay) -> Self {
        Self { overlay }
    }
}

/// Round a position inside the canvas to surface pixels
pub fn surface_point(position: iced::Point) -> Point {
    Point::new(position.x.round() as i32, position.y.round() as i32)
}

fn guide_stroke() -> Stroke<'static> {
    Stroke {
        line_dash: LineDash {
            segments: &GUIDE_DASH,
            offset: 0,
        },
        ..Stroke::default().with_color(GUIDE)
    }
}

impl canvas::Program<Msg> for SelectionCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Msg>) {
        let Some(position) = cursor.position_in(bounds) else {
            return (event::Status::Ignored, None);
        };
        let point = surface_point(position);
        let msg = match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => SelectMsg::PointerMoved(point),
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                SelectMsg::PointerPressed(point)
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                SelectMsg::PointerReleased(point)
            }
            _ => return (event::Status::Ignored, None),
        };
        (event::Status::Captured, Some(Msg::select(msg)))
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(iced::Point::ORIGIN, bounds.size(), SHADE);

        if let Some(rect) = self.overlay.pending_rect() {
            let outline = Path::rectangle(
                iced::Point::new(rect.x as f32, rect.y as f32),
                Size::new(rect.width as f32, rect.height as f32),
            );
            frame.stroke(
                &outline,
                Stroke::default()
                    .with_color(GUIDE)
                    .with_width(OUTLINE_WIDTH),
            );
        }

        if let Some(pointer) = self.overlay.pointer() {
            let (x, y) = (pointer.x as f32, pointer.y as f32);
            frame.stroke(
                &Path::line(iced::Point::new(x, 0.0), iced::Point::new(x, bounds.height)),
                guide_stroke(),
            );
            frame.stroke(
                &Path::line(iced::Point::new(0.0, y), iced::Point::new(bounds.width, y)),
                guide_stroke(),
            );
        }

        if let Some(absolute) = self.overlay.pointer_absolute() {
            let label = format!("({}, {})", absolute.x, absolute.y);
            let origin = iced::Point::new(READOUT_OFFSET, READOUT_OFFSET);
            let width = label.len() as f32 * READOUT_SIZE * 0.6 + 8.0;
            frame.fill_rectangle(origin, Size::new(width, READOUT_SIZE + 8.0), Color::WHITE);
            frame.fill_text(canvas::Text {
                content: label,
                position: iced::Point::new(origin.x + 4.0, origin.y + 4.0),
                color: Color::BLACK,
                size: Pixels(READOUT_SIZE),
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        mouse::Interaction::Crosshair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_round_to_nearest_pixel() {
        assert_eq!(surface_point(iced::Point::new(10.4, 20.6)), Point::new(10, 21));
        assert_eq!(surface_point(iced::Point::new(-0.6, 0.0)), Point::new(-1, 0));
    }
}
