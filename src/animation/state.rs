use crate::animation::progress::{BoundPolicy, Crossing, Direction, Progress};
use crate::foundation::math::clamp01;

/// Two-valued mode flag selecting which pair of states is being blended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Initial mode.
    #[default]
    A,
    /// Mode after one bound crossing.
    B,
}

impl Phase {
    /// The other phase.
    pub fn flipped(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Weights `(state_a, state_b)` for mix parameter `t`.
    ///
    /// In phase A state A fades out as `t` grows; in phase B the roles are swapped.
    pub fn weights(self, t: f64) -> (f64, f64) {
        let (out, into) = blend_weights(t);
        match self {
            Self::A => (out, into),
            Self::B => (into, out),
        }
    }
}

/// Split `t` (clamped to `[0, 1]`) into `(1 − t, t)`. The pair always sums to 1.
pub fn blend_weights(t: f64) -> (f64, f64) {
    let t = clamp01(t);
    (1.0 - t, t)
}

/// What one [`AnimationState::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The loop is not active; nothing changed.
    Idle,
    /// Progress moved and stayed inside its bounds.
    Advanced,
    /// Progress wrapped and the phase flipped.
    Flipped,
    /// Progress reached a held bound; the phase flipped and the loop stopped.
    Settled,
}

/// Owned state of one interpolation loop.
#[derive(Clone, Debug)]
pub struct AnimationState {
    progress: Progress,
    policy: BoundPolicy,
    direction: Direction,
    phase: Phase,
    settled: bool,
    active: bool,
    ticks: u64,
}

impl AnimationState {
    /// Create an inactive loop in phase A, travelling forward.
    pub fn new(progress: Progress, policy: BoundPolicy) -> Self {
        Self {
            progress,
            policy,
            direction: Direction::Forward,
            phase: Phase::A,
            settled: false,
            active: false,
            ticks: 0,
        }
    }

    /// Progress driver.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Shorthand for `progress().value()`.
    pub fn value(&self) -> f64 {
        self.progress.value()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Bound policy.
    pub fn policy(&self) -> BoundPolicy {
        self.policy
    }

    /// Direction of travel.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `true` while the loop reschedules itself every frame.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `true` once a held bound was reached and not restarted since.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Ticks that actually advanced progress.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Activate the loop travelling forward.
    pub fn start(&mut self) {
        self.start_in(Direction::Forward);
    }

    /// Activate the loop travelling in `dir`.
    pub fn start_in(&mut self, dir: Direction) {
        self.direction = dir;
        self.settled = false;
        self.active = true;
    }

    /// Deactivate without touching progress or phase.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Back to the lower bound in phase A, inactive.
    pub fn rewind(&mut self) {
        self.progress.reset_to_lower();
        self.phase = Phase::A;
        self.direction = Direction::Forward;
        self.settled = false;
        self.active = false;
    }

    /// Advance by one step. Flips the phase at most once.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.active {
            return TickOutcome::Idle;
        }
        self.ticks += 1;
        match self.progress.advance(self.direction, self.policy) {
            Crossing::None => TickOutcome::Advanced,
            Crossing::Wrapped => {
                self.phase = self.phase.flipped();
                tracing::debug!(phase = ?self.phase, ticks = self.ticks, "progress wrapped");
                TickOutcome::Flipped
            }
            Crossing::Held => {
                self.phase = self.phase.flipped();
                self.settled = true;
                self.active = false;
                tracing::debug!(
                    phase = ?self.phase,
                    value = self.progress.value(),
                    ticks = self.ticks,
                    "progress settled"
                );
                TickOutcome::Settled
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
