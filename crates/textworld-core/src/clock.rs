//! Fixed-step clock for the Simulation.
//!
//! The host reports real frame deltas; the clock accumulates them and hands
//! out whole update passes of `update_period` seconds each. A long frame
//! yields several passes in a row; the caller may bound that burst and
//! discard whatever whole periods remain.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The update period must be a positive, finite number of seconds.
    #[error("invalid update period: {0}")]
    InvalidPeriod(f64),

    /// A frame delta was negative or not finite.
    #[error("invalid frame delta: {0}")]
    InvalidDelta(f64),
}

/// Fixed-step accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct TickClock {
    update_period: f64,
    accumulated: f64,
}

impl TickClock {
    /// Create a clock that emits one pass per `update_period` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidPeriod`] if the period is not a positive
    /// finite number.
    pub fn new(update_period: f64) -> Result<Self, ClockError> {
        if !update_period.is_finite() || update_period <= 0.0 {
            return Err(ClockError::InvalidPeriod(update_period));
        }
        Ok(Self {
            update_period,
            accumulated: 0.0,
        })
    }

    /// Add a frame delta to the accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidDelta`] for negative or non-finite deltas.
    pub fn accumulate(&mut self, delta_time: f64) -> Result<(), ClockError> {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return Err(ClockError::InvalidDelta(delta_time));
        }
        self.accumulated += delta_time;
        Ok(())
    }

    /// Consume one period if enough time has accumulated.
    ///
    /// Returns `true` when a pass is due; the caller must run it.
    pub fn take_pass(&mut self) -> bool {
        if self.accumulated < self.update_period {
            return false;
        }
        self.accumulated -= self.update_period;
        true
    }

    /// Drop every whole period still owed, keeping the fractional remainder.
    ///
    /// Returns the seconds dropped.
    pub fn discard_backlog(&mut self) -> f64 {
        let kept = self.accumulated.rem_euclid(self.update_period);
        let dropped = self.accumulated - kept;
        self.accumulated = kept;
        dropped
    }

    /// Seconds of simulated time per pass.
    pub const fn update_period(&self) -> f64 {
        self.update_period
    }

    /// Time accumulated towards the next pass.
    pub const fn accumulated(&self) -> f64 {
        self.accumulated
    }
}
