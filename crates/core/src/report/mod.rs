//! Human-readable run summaries and desktop notifications.

mod notify;
mod render;

pub use notify::{CommandNotifier, Notifier, NullNotifier};
pub use render::{format_duration, format_size, render};
