//! Background tasks module
//!
//! Long-running tasks that drive the reminder machine alongside the HTTP
//! surface.

pub mod reminder_notifier;
pub mod uptime_monitor;

// Re-export main functions
pub use reminder_notifier::reminder_notifier_task;
pub use uptime_monitor::uptime_monitor_task;
