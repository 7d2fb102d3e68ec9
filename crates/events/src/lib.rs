//! Ranch notification bus.
//!
//! - [`NotificationBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`Notification`]: the user-facing toast envelope published when a
//!   record operation succeeds or fails.

pub mod bus;

pub use bus::{Notification, NotificationBus, NotificationLevel};
