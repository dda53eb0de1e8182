// Spawn pacing and slot selection.
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GameConfig;
use crate::model::{Floor, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPick {
    pub origin: Floor,
    pub destination: Floor,
    pub side: Side,
}

/// Fraction of the match already played, 0.0 at the start and 1.0 when time runs out.
pub fn time_progress(round_secs: u32, time_left: u32) -> f64 {
    if round_secs == 0 {
        return 1.0;
    }
    let elapsed = round_secs.saturating_sub(time_left) as f64;
    (elapsed / round_secs as f64).clamp(0.0, 1.0)
}

pub fn spawn_chance(cfg: &GameConfig, progress: f64) -> f64 {
    cfg.spawn_chance_start + (cfg.spawn_chance_end - cfg.spawn_chance_start) * progress
}

pub fn next_spawn_delay_ms(cfg: &GameConfig, progress: f64) -> u64 {
    let shrink = (cfg.spawn_delay_shrink_ms as f64 * progress).round() as u64;
    cfg.spawn_delay_start_ms
        .saturating_sub(shrink)
        .max(cfg.spawn_delay_min_ms)
}

/// Origin avoids the elevator's floor; destination avoids both origin and the elevator.
pub fn pick_spawn<R: Rng>(rng: &mut R, floors: u8, current_floor: Floor) -> Option<SpawnPick> {
    let origins: Vec<Floor> = (1..=floors).filter(|&f| f != current_floor).collect();
    let origin = *origins.choose(rng)?;
    let destinations: Vec<Floor> = (1..=floors)
        .filter(|&f| f != origin && f != current_floor)
        .collect();
    let destination = *destinations.choose(rng)?;
    let side = if rng.gen_bool(0.5) { Side::Left } else { Side::Right };
    Some(SpawnPick {
        origin,
        destination,
        side,
    })
}
