mod client;
mod controller;
mod editor;
mod error;
mod event;
mod partition;

pub mod date;
pub mod layout;

pub use client::*;
pub use controller::*;
pub use editor::*;
pub use error::*;
pub use event::*;
pub use partition::*;
