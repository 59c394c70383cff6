use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlayerConfig {
    /// Restrict playerctl to one player (e.g. "spotify"); any player when unset
    #[serde(default)]
    pub name: Option<String>,
    /// Path or name of the playerctl binary
    #[serde(default = "PlayerConfig::default_playerctl_path")]
    pub playerctl_path: String,
    /// Seconds to jump on seek forward/backward
    #[serde(default = "PlayerConfig::default_seek_step_secs")]
    pub seek_step_secs: u64,
    /// Milliseconds between polls of the player
    #[serde(default = "PlayerConfig::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl PlayerConfig {
    fn default_playerctl_path() -> String {
        "playerctl".to_string()
    }
    fn default_seek_step_secs() -> u64 {
        5
    }
    fn default_poll_interval_ms() -> u64 {
        100
    }

    /// Seek step in microseconds
    pub fn seek_step_us(&self) -> i64 {
        (self.seek_step_secs as i64).saturating_mul(1_000_000)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(10))
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: None,
            playerctl_path: Self::default_playerctl_path(),
            seek_step_secs: Self::default_seek_step_secs(),
            poll_interval_ms: Self::default_poll_interval_ms(),
        }
    }
}
