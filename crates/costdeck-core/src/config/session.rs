//! Session lifecycle configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum concurrently active sessions per identity. The oldest active
    /// session is evicted when a login would exceed this cap.
    #[serde(default = "default_max_active_sessions")]
    pub max_active_sessions: i64,
    /// Inactivity timeout in minutes, measured from the last validated
    /// request (sliding window), not from login time.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: i64,
    /// Interval for the background idle-session sweep in minutes.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
}

impl SessionConfig {
    /// The sweep period as a `Duration`. A configured interval of zero is
    /// clamped to one minute; interval timers require a nonzero period.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_minutes.max(1) * 60)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_active_sessions: default_max_active_sessions(),
            idle_timeout_minutes: default_idle_timeout(),
            sweep_interval_minutes: default_sweep_interval(),
        }
    }
}

fn default_max_active_sessions() -> i64 {
    2
}

fn default_idle_timeout() -> i64 {
    10
}

fn default_sweep_interval() -> u64 {
    5
}
