pub mod scoring;
pub mod spawn;
pub mod timers;

pub use scoring::{co_rider_penalty, drop_award};
pub use spawn::{SpawnPick, next_spawn_delay_ms, pick_spawn, spawn_chance, time_progress};
pub use timers::{Timer, TimerId, TimerKind, TimerRegistry};
