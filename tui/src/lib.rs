pub mod app;
pub mod config;
pub mod event;
pub mod ui;

pub use crate::app::{App, Focus};
pub use crate::event::{Event, EventHandler};
