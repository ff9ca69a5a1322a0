//! Message handlers for the application
//!
//! Each submodule handles one message category; `App::update` dispatches to them.

pub mod capture;
pub mod selection;
pub mod settings;

use crate::session::messages::Msg;

/// Result type for message handlers
pub type HandlerResult = iced::Task<Msg>;
