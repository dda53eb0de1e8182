// Pending game timers on a virtual millisecond clock.
//
// Nothing here talks to the browser: the shell advances the clock and the session fires
// whatever came due. Ending or restarting a game releases every handle with `cancel_all`.

use crate::model::PassengerId;

pub type TimerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Countdown,
    Spawn,
    SpawnRetry { attempt: u8 },
    PassengerTimeout(PassengerId),
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer {
    pub id: TimerId,
    pub due_ms: u64,
    pub kind: TimerKind,
    /// Game epoch active when the timer was scheduled.
    pub epoch: u64,
}

#[derive(Clone, Debug, Default)]
pub struct TimerRegistry {
    now_ms: u64,
    next_id: TimerId,
    pending: Vec<Timer>,
}

impl TimerRegistry {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, kind: TimerKind, epoch: u64) -> TimerId {
        self.next_id += 1;
        let id = self.next_id;
        self.pending.push(Timer {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            kind,
            epoch,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn pending(&self) -> impl Iterator<Item = &Timer> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Ties go to the timer scheduled first.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Timer> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;
        let timer = self.pending.swap_remove(idx);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer)
    }

    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}
