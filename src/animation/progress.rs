use crate::foundation::error::{TweenError, TweenResult};

/// Tolerance used when deciding whether a step reached a bound.
///
/// Repeated decimal steps accumulate rounding error (100 × 0.01 is not exactly 1.0), so a value
/// within this distance of the bound counts as having reached it.
pub const BOUND_EPSILON: f64 = 1e-9;

/// What happens when [`Progress`] reaches the bound it is travelling toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundPolicy {
    /// Jump back to the opposite bound (looping fades).
    #[default]
    Wrap,
    /// Stop exactly on the bound (one-shot zooms).
    Hold,
}

/// Direction of travel inside the bounded interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Toward `upper`.
    #[default]
    Forward,
    /// Toward `lower`.
    Reverse,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Result of a single [`Progress::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// Still strictly inside the interval.
    None,
    /// Reached the bound and jumped to the opposite one.
    Wrapped,
    /// Reached the bound and stopped on it.
    Held,
}

/// A float bounded to `[lower, upper]`, advanced by a constant step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    value: f64,
    lower: f64,
    upper: f64,
    step: f64,
}

impl Progress {
    /// Create progress positioned at `lower`.
    pub fn new(lower: f64, upper: f64, step: f64) -> TweenResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || !step.is_finite() {
            return Err(TweenError::validation(
                "progress bounds and step must be finite",
            ));
        }
        if lower >= upper {
            return Err(TweenError::validation(format!(
                "progress lower bound {lower} must be < upper bound {upper}"
            )));
        }
        if step <= 0.0 {
            return Err(TweenError::validation("progress step must be > 0"));
        }
        if step > upper - lower {
            return Err(TweenError::validation(
                "progress step must not exceed the interval span",
            ));
        }
        Ok(Self {
            value: lower,
            lower,
            upper,
            step,
        })
    }

    /// The unit interval `[0, 1]` with the given step.
    pub fn unit(step: f64) -> TweenResult<Self> {
        Self::new(0.0, 1.0, step)
    }

    /// Reposition at `value`, which must lie inside the bounds.
    pub fn starting_at(mut self, value: f64) -> TweenResult<Self> {
        if !(self.lower..=self.upper).contains(&value) {
            return Err(TweenError::validation(format!(
                "progress start {value} outside [{}, {}]",
                self.lower, self.upper
            )));
        }
        self.value = value;
        Ok(self)
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Per-tick increment.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Position within the interval mapped to `[0, 1]`.
    pub fn normalized(&self) -> f64 {
        crate::foundation::math::clamp01((self.value - self.lower) / (self.upper - self.lower))
    }

    /// Number of ticks needed to travel the whole interval.
    pub fn ticks_per_span(&self) -> u64 {
        ((self.upper - self.lower) / self.step - BOUND_EPSILON).ceil() as u64
    }

    /// Snap to `lower`.
    pub fn reset_to_lower(&mut self) {
        self.value = self.lower;
    }

    /// Advance one step in `dir`, applying `policy` if the bound is reached.
    pub fn advance(&mut self, dir: Direction, policy: BoundPolicy) -> Crossing {
        match dir {
            Direction::Forward => {
                let next = self.value + self.step;
                if next < self.upper - BOUND_EPSILON {
                    self.value = next;
                    return Crossing::None;
                }
                match policy {
                    BoundPolicy::Wrap => {
                        self.value = self.lower;
                        Crossing::Wrapped
                    }
                    BoundPolicy::Hold => {
                        self.value = self.upper;
                        Crossing::Held
                    }
                }
            }
            Direction::Reverse => {
                let next = self.value - self.step;
                if next > self.lower + BOUND_EPSILON {
                    self.value = next;
                    return Crossing::None;
                }
                match policy {
                    BoundPolicy::Wrap => {
                        self.value = self.upper;
                        Crossing::Wrapped
                    }
                    BoundPolicy::Hold => {
                        self.value = self.lower;
                        Crossing::Held
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/progress.rs"]
mod tests;
