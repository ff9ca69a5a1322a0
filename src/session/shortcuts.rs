use iced::keyboard::{Key, Modifiers, key::Named};

use crate::session::messages::{Msg, SelectMsg};

/// Global key bindings, active in every window
pub fn handle_key_press(key: Key, _modifiers: Modifiers) -> Option<Msg> {
    match key.as_ref() {
        Key::Named(Named::Escape) => Some(Msg::select(SelectMsg::Cancel)),
        _ => None,
    }
}
