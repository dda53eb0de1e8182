//! Tunables for a match and for the browser shell around it.
//!
//! Everything has a default matching the classic 60 second, five floor game, so a stored
//! config only needs the keys it wants to change.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `log` level name for the console logger (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub log_level: String,
    pub game: GameConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            game: GameConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: AppConfig = serde_json::from_str(raw)?;
        cfg.game = cfg.game.sanitized();
        Ok(cfg)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of floors served; floor numbers run 1..=floors.
    pub floors: u8,
    /// Length of a match in seconds.
    pub round_secs: u32,
    pub countdown_interval_ms: u64,
    /// How long a passenger waits before giving up.
    pub passenger_timeout_ms: u64,
    pub timeout_penalty: i64,
    /// Points for a drop-off before the shared-destination penalty.
    pub drop_base_score: i64,
    pub spawn_chance_start: f64,
    pub spawn_chance_end: f64,
    pub spawn_delay_start_ms: u64,
    pub spawn_delay_shrink_ms: u64,
    pub spawn_delay_min_ms: u64,
    pub spawn_retry_delay_ms: u64,
    /// Retries for a spawn that landed on an occupied slot before it is dropped.
    pub max_spawn_retries: u8,
    pub restart_grace_ms: u64,
    /// Browser interval that advances the game clock.
    pub tick_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            floors: 5,
            round_secs: 60,
            countdown_interval_ms: 1000,
            passenger_timeout_ms: 15_000,
            timeout_penalty: 5,
            drop_base_score: 5,
            spawn_chance_start: 0.70,
            spawn_chance_end: 0.95,
            spawn_delay_start_ms: 2000,
            spawn_delay_shrink_ms: 1300,
            spawn_delay_min_ms: 700,
            spawn_retry_delay_ms: 1000,
            max_spawn_retries: 3,
            restart_grace_ms: 100,
            tick_interval_ms: 50,
        }
    }
}

impl GameConfig {
    /// Clamp values that would make the game unplayable. A spawn needs an origin and a
    /// destination that both differ from the elevator's floor, so three floors is the minimum.
    pub fn sanitized(mut self) -> Self {
        self.floors = self.floors.max(3);
        self.round_secs = self.round_secs.max(1);
        self.countdown_interval_ms = self.countdown_interval_ms.max(1);
        self.spawn_chance_start = self.spawn_chance_start.clamp(0.0, 1.0);
        self.spawn_chance_end = self.spawn_chance_end.clamp(0.0, 1.0);
        self.spawn_delay_min_ms = self.spawn_delay_min_ms.max(1);
        if self.spawn_delay_start_ms < self.spawn_delay_min_ms {
            self.spawn_delay_start_ms = self.spawn_delay_min_ms;
        }
        self.tick_interval_ms = self.tick_interval_ms.max(10);
        self
    }
}
