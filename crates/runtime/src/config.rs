use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Episode loop parameters.
///
/// Every field is optional in JSON; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Number of episodes to run
    pub episodes: usize,
    /// Step cap per episode
    pub max_steps: usize,
    /// Delay after every step, in milliseconds
    pub step_delay_ms: u64,
    /// Pause after an episode terminates, in milliseconds
    pub done_pause_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            episodes: 3,
            max_steps: 100,
            step_delay_ms: 10,
            done_pause_ms: 1000,
        }
    }
}

impl RunnerConfig {
    /// # Errors
    ///
    /// Fails on invalid JSON or fields of the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    #[must_use]
    pub fn done_pause(&self) -> Duration {
        Duration::from_millis(self.done_pause_ms)
    }
}
