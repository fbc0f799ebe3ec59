//! OS-facing services
//!
//! Thin wrappers around the platform: uptime sampling and the reboot
//! command.

pub mod reboot;
pub mod uptime;

// Re-export main functions
pub use reboot::{check_reboot_support, execute_system_reboot};
pub use uptime::{format_uptime, sample_uptime};
