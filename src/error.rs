// src/error.rs

//! Configuration errors.
//!
//! A running control cycle never fails; out of range values are saturated.
//! The only fallible step is building a controller from a configuration.

use core::fmt::{self, Display, Formatter};

/// Reasons a [`ControllerConfig`](crate::ControllerConfig) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `esc_min` is greater than `esc_max`, so no motor command could satisfy both bounds.
    InvertedMotorRange,
    /// `max_integral` is negative, which would make the anti-windup band empty.
    NegativeIntegralLimit,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConfigError::InvertedMotorRange => write!(f, "esc_min must not exceed esc_max"),
            ConfigError::NegativeIntegralLimit => write!(f, "max_integral must not be negative"),
        }
    }
}
