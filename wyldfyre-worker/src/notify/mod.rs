//! Notification routing: push receipt and click dispatch.

mod builder;
mod click;

pub use builder::build_notification;
pub use click::{dispatch_click, resolve_click, ClickDisposition, ClientHandle, ClientRegistry};
