//! Core game model for Elevator Rush.
//!
//! `GameSession` owns the whole match: floor, score, countdown, the waiting and riding
//! passengers, and every pending timer on a virtual clock. The browser shell only advances
//! the clock and forwards input, so the model runs and tests without a DOM.

use log::{debug, info};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::rc::Rc;
use yew::Reducible;

use crate::config::GameConfig;
use crate::state::{self, SpawnPick, Timer, TimerId, TimerKind, TimerRegistry};

pub type Floor = u8;
pub type PassengerId = u64;

/// How many recent events the session keeps for the feed.
pub const EVENT_FEED_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Passenger {
    pub id: PassengerId,
    pub origin: Floor,
    pub destination: Floor,
    pub side: Side,
    /// Virtual clock time of the spawn.
    pub spawned_at_ms: u64,
    /// Epoch of the game the passenger belongs to.
    pub epoch: u64,
    /// Pending timeout while the passenger waits; cleared on pickup.
    pub timeout: Option<TimerId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Ended,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PickedUp {
        passenger: Passenger,
    },
    DroppedOff {
        passenger: Passenger,
        awarded: i64,
        penalty: i64,
    },
    TimedOut {
        passenger: Passenger,
        penalty: i64,
    },
    GameOver {
        final_score: i64,
    },
}

#[derive(Clone, Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub current_floor: Floor,
    /// Raw score; timeouts can push it below zero.
    pub score: i64,
    pub time_left: u32,
    pub phase: GamePhase,
    /// Bumped by every start so timers from an earlier game can be told apart.
    pub epoch: u64,
    pub waiting: Vec<Passenger>,
    /// Passengers in the car, in boarding order.
    pub riding: Vec<Passenger>,
    /// Most recent events, newest last.
    pub events: VecDeque<GameEvent>,
    timers: TimerRegistry,
    rng: ChaCha8Rng,
    next_passenger_id: PassengerId,
}

impl GameSession {
    pub fn new(config: GameConfig, rng: ChaCha8Rng) -> Self {
        let config = config.sanitized();
        Self {
            current_floor: 1,
            score: 0,
            time_left: config.round_secs,
            phase: GamePhase::Idle,
            epoch: 0,
            waiting: Vec::new(),
            riding: Vec::new(),
            events: VecDeque::with_capacity(EVENT_FEED_LEN),
            timers: TimerRegistry::default(),
            rng,
            next_passenger_id: 0,
            config,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn waiting_at(&self, floor: Floor, side: Side) -> Option<&Passenger> {
        self.waiting
            .iter()
            .find(|p| p.origin == floor && p.side == side)
    }

    // ---------------- Lifecycle -----------------

    pub fn start_game(&mut self) {
        self.timers.cancel_all();
        self.epoch += 1;
        self.phase = GamePhase::Running;
        self.score = 0;
        self.time_left = self.config.round_secs;
        self.current_floor = 1;
        self.waiting.clear();
        self.riding.clear();
        self.events.clear();
        self.timers
            .schedule(self.config.countdown_interval_ms, TimerKind::Countdown, self.epoch);
        self.timers.schedule(0, TimerKind::Spawn, self.epoch);
        info!("game {} started ({}s)", self.epoch, self.time_left);
    }

    pub fn end_game(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.timers.cancel_all();
        self.phase = GamePhase::Ended;
        self.push_event(GameEvent::GameOver {
            final_score: self.score,
        });
        info!("game {} over, final score {}", self.epoch, self.score);
    }

    /// Stops the current game and starts a fresh one after the grace delay.
    pub fn restart(&mut self) {
        self.timers.cancel_all();
        self.phase = GamePhase::Idle;
        self.waiting.clear();
        self.riding.clear();
        self.timers
            .schedule(self.config.restart_grace_ms, TimerKind::Restart, self.epoch);
        debug!("restart requested during game {}", self.epoch);
    }

    /// Moves the virtual clock forward, firing every timer that comes due on the way.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.timers.now_ms().saturating_add(elapsed_ms);
        while let Some(timer) = self.timers.pop_due(target) {
            self.fire(timer);
        }
        self.timers.advance_clock(target);
    }

    fn fire(&mut self, timer: Timer) {
        match timer.kind {
            TimerKind::Restart => self.start_game(),
            _ if timer.epoch != self.epoch || self.phase != GamePhase::Running => {}
            TimerKind::Countdown => self.tick_countdown(),
            TimerKind::Spawn => self.run_spawner(),
            TimerKind::SpawnRetry { attempt } => self.try_spawn(attempt),
            TimerKind::PassengerTimeout(id) => self.expire_passenger(id),
        }
    }

    fn tick_countdown(&mut self) {
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end_game();
        } else {
            self.timers
                .schedule(self.config.countdown_interval_ms, TimerKind::Countdown, self.epoch);
        }
    }

    // ---------------- Spawning -----------------

    fn run_spawner(&mut self) {
        let progress = state::time_progress(self.config.round_secs, self.time_left);
        let chance = state::spawn_chance(&self.config, progress);
        if self.rng.r#gen::<f64>() < chance {
            self.try_spawn(0);
        }
        let delay = state::next_spawn_delay_ms(&self.config, progress);
        self.timers.schedule(delay, TimerKind::Spawn, self.epoch);
    }

    fn try_spawn(&mut self, attempt: u8) {
        let Some(pick) = state::pick_spawn(&mut self.rng, self.config.floors, self.current_floor)
        else {
            return;
        };
        if self.waiting_at(pick.origin, pick.side).is_some() {
            if attempt < self.config.max_spawn_retries {
                debug!(
                    "slot {}-{} taken, retry {} scheduled",
                    pick.origin,
                    pick.side.as_str(),
                    attempt + 1
                );
                self.timers.schedule(
                    self.config.spawn_retry_delay_ms,
                    TimerKind::SpawnRetry {
                        attempt: attempt + 1,
                    },
                    self.epoch,
                );
            } else {
                debug!("spawn abandoned after {} retries", attempt);
            }
            return;
        }
        self.spawn_passenger(pick.origin, pick.destination, pick.side);
    }

    /// Places a waiting passenger directly. Returns `None` when the game is not running, a
    /// floor is out of range, the trip would start or end at the elevator's floor, or the
    /// slot is taken.
    pub fn spawn_passenger(
        &mut self,
        origin: Floor,
        destination: Floor,
        side: Side,
    ) -> Option<PassengerId> {
        let floors = 1..=self.config.floors;
        if !self.is_running()
            || !floors.contains(&origin)
            || !floors.contains(&destination)
            || origin == destination
            || origin == self.current_floor
            || destination == self.current_floor
            || self.waiting_at(origin, side).is_some()
        {
            return None;
        }
        Some(self.place_passenger(SpawnPick {
            origin,
            destination,
            side,
        }))
    }

    fn place_passenger(&mut self, pick: SpawnPick) -> PassengerId {
        self.next_passenger_id += 1;
        let id = self.next_passenger_id;
        let timeout = self.timers.schedule(
            self.config.passenger_timeout_ms,
            TimerKind::PassengerTimeout(id),
            self.epoch,
        );
        self.waiting.push(Passenger {
            id,
            origin: pick.origin,
            destination: pick.destination,
            side: pick.side,
            spawned_at_ms: self.timers.now_ms(),
            epoch: self.epoch,
            timeout: Some(timeout),
        });
        debug!(
            "passenger {} waiting at {}-{} for floor {}",
            id,
            pick.origin,
            pick.side.as_str(),
            pick.destination
        );
        id
    }

    fn expire_passenger(&mut self, id: PassengerId) {
        let epoch = self.epoch;
        let Some(idx) = self
            .waiting
            .iter()
            .position(|p| p.id == id && p.epoch == epoch)
        else {
            return;
        };
        let mut passenger = self.waiting.remove(idx);
        passenger.timeout = None;
        let penalty = self.config.timeout_penalty;
        self.score -= penalty;
        debug!(
            "passenger {} at floor {} gave up: -{}",
            passenger.id, passenger.origin, penalty
        );
        self.push_event(GameEvent::TimedOut { passenger, penalty });
    }

    // ---------------- Movement -----------------

    pub fn move_up(&mut self) {
        if self.is_running() && self.current_floor < self.config.floors {
            self.current_floor += 1;
            self.service_floor();
        }
    }

    pub fn move_down(&mut self) {
        if self.is_running() && self.current_floor > 1 {
            self.current_floor -= 1;
            self.service_floor();
        }
    }

    fn service_floor(&mut self) {
        let floor = self.current_floor;

        let (boarding, staying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.waiting)
            .into_iter()
            .partition(|p| p.origin == floor);
        self.waiting = staying;
        for mut passenger in boarding {
            if let Some(timeout) = passenger.timeout.take() {
                self.timers.cancel(timeout);
            }
            debug!(
                "picked up passenger {}: {} -> {}",
                passenger.id, passenger.origin, passenger.destination
            );
            self.riding.push(passenger.clone());
            self.push_event(GameEvent::PickedUp { passenger });
        }

        // One at a time: each drop is scored against whoever is still aboard.
        while let Some(idx) = self.riding.iter().position(|p| p.destination == floor) {
            let penalty = state::co_rider_penalty(&self.riding, self.riding[idx].id, floor);
            let passenger = self.riding.remove(idx);
            let awarded = state::drop_award(self.config.drop_base_score, penalty);
            self.score += awarded;
            debug!(
                "dropped passenger {} at {}: +{} (base {} - penalty {})",
                passenger.id, floor, awarded, self.config.drop_base_score, penalty
            );
            self.push_event(GameEvent::DroppedOff {
                passenger,
                awarded,
                penalty,
            });
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_FEED_LEN {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GameAction {
    Start,
    MoveUp,
    MoveDown,
    Restart,
    Advance { elapsed_ms: u64 },
}

impl Reducible for GameSession {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        match action {
            MoveUp | MoveDown if !self.is_running() => return self,
            Advance { .. } if self.pending_timers() == 0 => return self,
            _ => {}
        }
        let mut new = (*self).clone();
        match action {
            Start => new.start_game(),
            MoveUp => new.move_up(),
            MoveDown => new.move_down(),
            Restart => new.restart(),
            Advance { elapsed_ms } => new.advance(elapsed_ms),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Config with spawning switched off so tests control every passenger.
    fn quiet_config() -> GameConfig {
        GameConfig {
            spawn_chance_start: 0.0,
            spawn_chance_end: 0.0,
            ..GameConfig::default()
        }
    }

    fn running(config: GameConfig, seed: u64) -> GameSession {
        let mut s = GameSession::new(config, ChaCha8Rng::seed_from_u64(seed));
        s.start_game();
        s
    }

    fn move_to(s: &mut GameSession, floor: Floor) {
        while s.current_floor < floor {
            s.move_up();
        }
        while s.current_floor > floor {
            s.move_down();
        }
    }

    fn game_over_count(s: &GameSession) -> usize {
        s.events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn new_session_is_idle_and_ignores_moves() {
        let mut s = GameSession::new(quiet_config(), ChaCha8Rng::seed_from_u64(1));
        assert_eq!(s.phase, GamePhase::Idle);
        s.move_up();
        assert_eq!(s.current_floor, 1);
        assert_eq!(s.spawn_passenger(3, 5, Side::Left), None);
    }

    #[test]
    fn start_resets_state_and_bumps_epoch() {
        let mut s = running(quiet_config(), 1);
        assert_eq!(s.epoch, 1);
        assert_eq!(s.time_left, 60);
        assert_eq!(s.pending_timers(), 2);
        s.spawn_passenger(3, 5, Side::Left);
        s.move_up();
        s.start_game();
        assert_eq!(s.epoch, 2);
        assert_eq!(s.current_floor, 1);
        assert!(s.waiting.is_empty());
        assert_eq!(s.pending_timers(), 2);
    }

    #[test]
    fn floor_stays_within_bounds_for_any_move_sequence() {
        let mut s = running(quiet_config(), 3);
        let mut moves = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..500 {
            if moves.gen_bool(0.5) {
                s.move_up();
            } else {
                s.move_down();
            }
            assert!((1..=5).contains(&s.current_floor));
        }
        move_to(&mut s, 5);
        s.move_up();
        assert_eq!(s.current_floor, 5);
        move_to(&mut s, 1);
        s.move_down();
        assert_eq!(s.current_floor, 1);
    }

    #[test]
    fn pickup_then_drop_scores_five() {
        let mut s = running(quiet_config(), 4);
        s.spawn_passenger(3, 5, Side::Right).unwrap();
        assert_eq!(s.waiting.len(), 1);

        move_to(&mut s, 3);
        assert!(s.waiting.is_empty());
        assert_eq!(s.riding.len(), 1);
        assert_eq!(s.riding[0].destination, 5);

        move_to(&mut s, 5);
        assert_eq!(s.score, 5);
        assert!(s.riding.is_empty());
    }

    #[test]
    fn shared_destination_riders_are_scored_one_at_a_time() {
        let mut s = running(quiet_config(), 5);
        let first = s.spawn_passenger(2, 5, Side::Left).unwrap();
        s.spawn_passenger(3, 5, Side::Left).unwrap();
        s.spawn_passenger(4, 5, Side::Right).unwrap();
        move_to(&mut s, 4);
        assert_eq!(s.riding.len(), 3);

        s.move_up();
        let drops: Vec<(PassengerId, i64, i64)> = s
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::DroppedOff {
                    passenger,
                    awarded,
                    penalty,
                } => Some((passenger.id, *awarded, *penalty)),
                _ => None,
            })
            .collect();
        assert_eq!(drops.len(), 3);
        assert_eq!(drops[0], (first, 3, 2));
        assert_eq!(drops[1].1, 4);
        assert_eq!(drops[2].1, 5);
        assert_eq!(s.score, 12);
    }

    #[test]
    fn riders_for_other_floors_stay_aboard() {
        let mut s = running(quiet_config(), 6);
        s.spawn_passenger(2, 4, Side::Left).unwrap();
        s.spawn_passenger(3, 5, Side::Left).unwrap();
        move_to(&mut s, 4);
        assert_eq!(s.score, 5);
        assert_eq!(s.riding.len(), 1);
        assert_eq!(s.riding[0].destination, 5);
    }

    #[test]
    fn unclaimed_passenger_times_out_for_minus_five() {
        let mut s = running(quiet_config(), 7);
        let id = s.spawn_passenger(3, 5, Side::Left).unwrap();
        s.advance(14_999);
        assert_eq!(s.waiting.len(), 1);
        assert_eq!(s.score, 0);

        s.advance(1);
        assert!(s.waiting.is_empty());
        assert_eq!(s.score, -5);
        assert!(matches!(
            s.events.back(),
            Some(GameEvent::TimedOut { passenger, penalty: 5 }) if passenger.id == id
        ));
    }

    #[test]
    fn pickup_cancels_the_timeout() {
        let mut s = running(quiet_config(), 8);
        s.spawn_passenger(2, 4, Side::Left).unwrap();
        s.move_up();
        assert_eq!(s.riding.len(), 1);
        s.advance(20_000);
        assert_eq!(s.score, 0);
        assert_eq!(s.riding.len(), 1);
    }

    #[test]
    fn restart_starts_a_new_epoch_after_the_grace_delay() {
        let mut s = running(quiet_config(), 9);
        s.spawn_passenger(3, 5, Side::Left).unwrap();
        s.move_up();
        s.restart();
        assert_eq!(s.phase, GamePhase::Idle);
        assert!(s.waiting.is_empty());
        assert_eq!(s.pending_timers(), 1);

        s.advance(99);
        assert_eq!(s.phase, GamePhase::Idle);
        s.advance(1);
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.epoch, 2);
        assert_eq!(s.current_floor, 1);
        assert_eq!(s.time_left, 60);
    }

    #[test]
    fn timers_from_a_previous_game_cannot_touch_the_new_one() {
        let mut s = running(quiet_config(), 10);
        s.spawn_passenger(3, 5, Side::Left).unwrap();
        s.restart();
        s.advance(100);
        assert_eq!(s.epoch, 2);

        s.advance(20_000);
        assert_eq!(s.score, 0);

        // A handle that somehow survived the restart is still ignored.
        let mut s = running(quiet_config(), 11);
        s.spawn_passenger(3, 5, Side::Left).unwrap();
        s.restart();
        s.advance(100);
        let id = s.spawn_passenger(2, 4, Side::Left).unwrap();
        s.timers.schedule(10, TimerKind::PassengerTimeout(id), 1);
        s.timers.schedule(10, TimerKind::Countdown, 1);
        let time_left = s.time_left;
        s.advance(10);
        assert_eq!(s.score, 0);
        assert_eq!(s.waiting.len(), 1);
        assert_eq!(s.time_left, time_left);
    }

    #[test]
    fn countdown_ends_the_game_exactly_once() {
        let mut s = running(quiet_config(), 12);
        s.advance(59_000);
        assert_eq!(s.time_left, 1);
        assert!(s.is_running());

        s.advance(1_000);
        assert_eq!(s.time_left, 0);
        assert_eq!(s.phase, GamePhase::Ended);
        assert_eq!(s.pending_timers(), 0);
        assert_eq!(game_over_count(&s), 1);

        s.advance(10_000);
        s.end_game();
        s.move_up();
        assert_eq!(s.phase, GamePhase::Ended);
        assert_eq!(s.time_left, 0);
        assert_eq!(s.current_floor, 1);
        assert_eq!(game_over_count(&s), 1);
    }

    #[test]
    fn score_is_frozen_after_the_game_ends() {
        let mut s = running(quiet_config(), 13);
        s.spawn_passenger(3, 5, Side::Left).unwrap();
        s.advance(60_000);
        assert_eq!(s.phase, GamePhase::Ended);
        assert_eq!(s.score, -5);
        assert_eq!(
            s.events.back(),
            Some(&GameEvent::GameOver { final_score: -5 })
        );
    }

    #[test]
    fn spawner_respects_trip_and_slot_invariants() {
        let mut s = running(GameConfig::default(), 21);
        let mut moves = ChaCha8Rng::seed_from_u64(22);
        let mut seen: PassengerId = 0;
        let mut spawned = 0;
        while s.is_running() {
            let floor = s.current_floor;
            s.advance(250);
            for p in s.waiting.iter().filter(|p| p.id > seen) {
                assert_ne!(p.origin, floor);
                assert_ne!(p.destination, floor);
                assert_ne!(p.destination, p.origin);
                spawned += 1;
            }
            seen = s.waiting.iter().map(|p| p.id).max().unwrap_or(0).max(seen);
            for p in &s.waiting {
                let same_slot = s
                    .waiting
                    .iter()
                    .filter(|q| q.origin == p.origin && q.side == p.side)
                    .count();
                assert_eq!(same_slot, 1);
            }
            if moves.gen_bool(0.3) {
                s.move_up();
            } else if moves.gen_bool(0.3) {
                s.move_down();
            }
        }
        assert!(spawned > 0);
    }

    #[test]
    fn occupied_slot_retries_are_capped() {
        let mut s = running(quiet_config(), 30);
        s.advance(0);
        for origin in 2..=5 {
            let dest = if origin == 5 { 2 } else { origin + 1 };
            s.spawn_passenger(origin, dest, Side::Left).unwrap();
            s.spawn_passenger(origin, dest, Side::Right).unwrap();
        }
        let retries = |s: &GameSession| {
            s.timers
                .pending()
                .filter(|t| matches!(t.kind, TimerKind::SpawnRetry { .. }))
                .count()
        };

        s.try_spawn(0);
        assert_eq!(retries(&s), 1);
        s.advance(1_000);
        assert_eq!(retries(&s), 1);
        s.advance(1_000);
        assert_eq!(retries(&s), 1);
        s.advance(1_000);
        assert_eq!(retries(&s), 0);
        assert_eq!(s.waiting.len(), 8);
    }

    #[test]
    fn occupied_slot_is_rejected_for_direct_spawns() {
        let mut s = running(quiet_config(), 31);
        assert!(s.spawn_passenger(3, 5, Side::Left).is_some());
        assert!(s.spawn_passenger(3, 4, Side::Left).is_none());
        assert!(s.spawn_passenger(3, 4, Side::Right).is_some());
        assert!(s.spawn_passenger(1, 4, Side::Left).is_none());
        assert!(s.spawn_passenger(2, 1, Side::Left).is_none());
        assert!(s.spawn_passenger(6, 2, Side::Left).is_none());
    }

    #[test]
    fn event_feed_is_bounded() {
        let mut s = running(quiet_config(), 40);
        for round in 0..5 {
            let side = if round % 2 == 0 { Side::Left } else { Side::Right };
            move_to(&mut s, 1);
            s.spawn_passenger(2, 3, side).unwrap();
            move_to(&mut s, 3);
        }
        assert_eq!(s.events.len(), EVENT_FEED_LEN);
        assert!(matches!(s.events.back(), Some(GameEvent::DroppedOff { .. })));
        assert_eq!(s.score, 25);
    }

    #[test]
    fn reducer_skips_moves_while_not_running() {
        let idle = Rc::new(GameSession::new(
            quiet_config(),
            ChaCha8Rng::seed_from_u64(50),
        ));
        let same = idle.clone().reduce(GameAction::MoveUp);
        assert!(Rc::ptr_eq(&idle, &same));

        let started = idle.reduce(GameAction::Start);
        assert!(started.is_running());
        let moved = started.reduce(GameAction::MoveUp);
        assert_eq!(moved.current_floor, 2);
        let later = moved.reduce(GameAction::Advance { elapsed_ms: 1_000 });
        assert_eq!(later.time_left, 59);
        let restarted = later.reduce(GameAction::Restart);
        assert_eq!(restarted.phase, GamePhase::Idle);
    }
}
