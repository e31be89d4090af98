pub mod app;
pub mod event;
pub mod ui;
pub mod config;

pub use crate::app::App;
pub use crate::event::{Event, EventHandler};
