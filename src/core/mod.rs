//! Application shell: window management, message dispatch and views

pub mod app;
pub mod handlers;
pub mod view;
