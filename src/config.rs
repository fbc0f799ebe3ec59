//! Configuration and CLI argument handling

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "uptime-watcher")]
#[command(about = "A background agent that watches machine uptime and nags for a reboot")]
#[command(version)]
pub struct Config {
    /// Continuous uptime, in hours, after which a reboot reminder is due
    #[arg(short, long, default_value = "24")]
    pub threshold_hours: u64,

    /// Seconds between uptime samples
    #[arg(short = 'i', long, default_value = "300")]
    pub poll_interval_secs: u64,

    /// Host address to bind the decision endpoint to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port for the decision endpoint
    #[arg(short, long, default_value = "20573")]
    pub port: u16,

    /// Path of the persisted state file (defaults to the per-user config dir)
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the bind address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Reminder threshold in seconds
    pub fn threshold_seconds(&self) -> u64 {
        self.threshold_hours * 3600
    }

    /// Sampling interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Resolve the state file path, falling back to
    /// `<config dir>/uptime-watcher/state.json`
    pub fn state_file_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(default_state_file)
    }
}

fn default_state_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("uptime-watcher")
        .join("state.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(state_file: Option<PathBuf>) -> Config {
        Config {
            threshold_hours: 24,
            poll_interval_secs: 300,
            host: "127.0.0.1".to_string(),
            port: 20573,
            state_file,
            verbose: false,
        }
    }

    #[test]
    fn derived_values() {
        let config = config_with(None);
        assert_eq!(config.threshold_seconds(), 86_400);
        assert_eq!(config.poll_interval(), Duration::from_secs(300));
        assert_eq!(config.address(), "127.0.0.1:20573");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn state_file_override_wins() {
        let config = config_with(Some(PathBuf::from("/tmp/custom-state.json")));
        assert_eq!(config.state_file_path(), PathBuf::from("/tmp/custom-state.json"));
    }

    #[test]
    fn default_state_file_lands_in_app_dir() {
        let path = config_with(None).state_file_path();
        assert!(path.ends_with("uptime-watcher/state.json"));
    }
}
