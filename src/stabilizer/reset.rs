// src/stabilizer/reset.rs

//! # Integral Reset Policy
//!
//! Decides when the accumulated error is zeroed: while the throttle sits below
//! the low-throttle threshold, and on the cycle where the arm state flips.
//! The reset is a one-shot zeroing. Accumulation resumes on the same cycle.

use crate::Number;

/// Why the integral accumulators were reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    /// Throttle was below the low-throttle threshold.
    LowThrottle,
    /// The vehicle was armed or disarmed since the previous cycle.
    ArmTransition,
}

/// Low-throttle and arm-transition reset rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegralResetPolicy<T> {
    low_throttle_threshold: T,
}

impl<T: Number> IntegralResetPolicy<T> {
    /// Creates a policy that resets whenever throttle is strictly below `low_throttle_threshold`.
    pub fn new(low_throttle_threshold: T) -> Self {
        Self {
            low_throttle_threshold,
        }
    }

    /// Returns the reset cause for this cycle, if any. Low throttle takes
    /// precedence when both conditions hold.
    pub fn evaluate(&self, throttle: T, armed: bool, last_armed: bool) -> Option<ResetCause> {
        if throttle < self.low_throttle_threshold {
            Some(ResetCause::LowThrottle)
        } else if armed != last_armed {
            Some(ResetCause::ArmTransition)
        } else {
            None
        }
    }
}
