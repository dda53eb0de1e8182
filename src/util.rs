// Browser glue shared by the components: console logging, local storage, display text.
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

use crate::config::AppConfig;
use crate::model::GameEvent;

const CONFIG_KEY: &str = "elevator_config";
const BEST_SCORE_KEY: &str = "elevator_best_score";

pub fn format_time(secs: u32) -> String {
    let m = secs / 60;
    let s = secs % 60;
    if m > 0 {
        format!("{}:{:02}", m, s)
    } else {
        format!("{}s", s)
    }
}

pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::PickedUp { passenger } => format!(
            "Picked up at {}F, heading to {}F",
            passenger.origin, passenger.destination
        ),
        GameEvent::DroppedOff {
            passenger,
            awarded,
            penalty: 0,
        } => format!("Dropped off at {}F: +{}", passenger.destination, awarded),
        GameEvent::DroppedOff {
            passenger,
            awarded,
            penalty,
        } => format!(
            "Dropped off at {}F: +{} ({} shared stop{})",
            passenger.destination,
            awarded,
            penalty,
            if *penalty == 1 { "" } else { "s" }
        ),
        GameEvent::TimedOut { passenger, penalty } => {
            format!("Passenger at {}F gave up: -{}", passenger.origin, penalty)
        }
        GameEvent::GameOver { final_score } => format!("Time! Final score {}", final_score),
    }
}

// ---------------- Console logger -----------------

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.level(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug => web_sys::console::debug_1(&msg),
            Level::Trace => web_sys::console::log_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Routes the `log` macros to the browser console. Only the first call installs the logger.
pub fn init_console_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// ---------------- Local storage -----------------

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Stored config, or defaults when nothing is stored. Only a malformed entry is an error.
pub fn load_app_config() -> Result<AppConfig, serde_json::Error> {
    match storage().and_then(|s| s.get_item(CONFIG_KEY).ok().flatten()) {
        Some(raw) => AppConfig::from_json(&raw),
        None => Ok(AppConfig::default()),
    }
}

pub fn load_best_score() -> Option<i64> {
    storage()?
        .get_item(BEST_SCORE_KEY)
        .ok()
        .flatten()?
        .parse()
        .ok()
}

pub fn save_best_score(score: i64) {
    if let Some(store) = storage() {
        let _ = store.set_item(BEST_SCORE_KEY, &score.to_string());
    }
}
