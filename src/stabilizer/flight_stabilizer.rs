// src/stabilizer/flight_stabilizer.rs

//! A module specifying the shared numeric trait and configuration for the
//! attitude stabilizer. This module is designed for embedded systems in
//! no_std environments. It includes the configuration structure for PID
//! gains, limits and the timing and angle mode selectors.

use core::cmp::Ordering;
use core::fmt::Debug;

use crate::ConfigError;
use num_traits::{Bounded, FromPrimitive, ToPrimitive};
use piddiy::Number as PiddiyNumber;

/// Custom trait to encapsulate base number requirements.
///
/// The `bounded_*` operations saturate at the type's bounds instead of
/// overflowing, so fixed-point accumulators pin at their limit and float
/// infinities collapse to the largest finite value.
pub trait Number: PiddiyNumber + FromPrimitive + ToPrimitive + Bounded + Debug {
    /// Clamps generic PartialOrd values within a given range.
    /// Unordered values (NaN) land on `min`.
    fn clamp(self, min: Self, max: Self) -> Self {
        match (self.partial_cmp(&min), self.partial_cmp(&max)) {
            (Some(Ordering::Less) | None, _) => min,
            (_, Some(Ordering::Greater)) => max,
            _ => self,
        }
    }

    /// Absolute value of generic signed values.
    fn magnitude(self) -> Self {
        if self < Self::zero() {
            Self::zero().bounded_sub(self)
        } else {
            self
        }
    }

    /// `false` for values that are not ordered against themselves (NaN).
    fn is_ordered(self) -> bool {
        self.partial_cmp(&self).is_some()
    }

    /// Saturating addition.
    fn bounded_add(self, rhs: Self) -> Self {
        let exact = self.to_f64().zip(rhs.to_f64()).map(|(a, b)| a + b);
        saturate(exact, || self + rhs)
    }

    /// Saturating subtraction.
    fn bounded_sub(self, rhs: Self) -> Self {
        let exact = self.to_f64().zip(rhs.to_f64()).map(|(a, b)| a - b);
        saturate(exact, || self - rhs)
    }

    /// Saturating multiplication.
    fn bounded_mul(self, rhs: Self) -> Self {
        let exact = self.to_f64().zip(rhs.to_f64()).map(|(a, b)| a * b);
        saturate(exact, || self * rhs)
    }
}

impl<T: PiddiyNumber + FromPrimitive + ToPrimitive + Bounded + Debug> Number for T {}

/// Returns the bound `exact` lies beyond, or runs the native operation.
fn saturate<T: Number>(exact: Option<f64>, operation: impl FnOnce() -> T) -> T {
    let bounds = T::min_value().to_f64().zip(T::max_value().to_f64());
    match (exact, bounds) {
        (Some(value), Some((_, max))) if max < value => T::max_value(),
        (Some(value), Some((min, _))) if value < min => T::min_value(),
        _ => operation(),
    }
}

/// How the elapsed time between two control cycles is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingMode {
    /// Elapsed time is measured in microseconds from a [`MonotonicClock`](crate::MonotonicClock).
    VariableInterval,
    /// Every cycle counts as one unit of time and the clock is never read.
    FixedInterval,
}

/// Which measurement the loop stabilizes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleMode {
    /// Stabilize on the orientation estimate (self-leveling).
    Absolute,
    /// Stabilize on the angular rate estimate (acro).
    Rate,
}

/// Configuration for PID gains, limits and mode selection.
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig<T: Number> {
    /// Proportional gain for roll control.
    pub kp_roll: T,
    /// Integral gain for roll control.
    pub ki_roll: T,
    /// Derivative gain for roll control.
    pub kd_roll: T,
    /// Proportional gain for pitch control.
    pub kp_pitch: T,
    /// Integral gain for pitch control.
    pub ki_pitch: T,
    /// Derivative gain for pitch control.
    pub kd_pitch: T,
    /// Proportional gain for yaw control.
    pub kp_yaw: T,
    /// Integral gain for yaw control.
    pub ki_yaw: T,
    /// Derivative gain for yaw control.
    pub kd_yaw: T,
    /// Symmetric bound applied to the integral term `ki * error_sum`.
    pub max_integral: T,
    /// Lowest motor command.
    pub esc_min: T,
    /// Highest motor command.
    pub esc_max: T,
    /// Throttle below this value resets the integral accumulators.
    pub low_throttle_threshold: T,
    /// Elapsed time source.
    pub timing: TimingMode,
    /// Measurement the loop stabilizes on.
    pub angle_mode: AngleMode,
}

impl<T: Number> ControllerConfig<T> {
    /// Creates a new configuration with placeholder values for all parameters.
    /// Zero or one are used for the numeric fields, fixed-interval timing
    /// and absolute-angle mode for the selectors.
    /// These should be replaced with meaningful values tuned for the hardware.
    ///
    /// Example Usage
    /// ```
    /// use quad_attitude_stabilization::{AngleMode, AttitudeController, ControllerConfig, TimingMode};
    ///
    /// let mut config = ControllerConfig::<f32>::new();
    ///
    /// // Set the PID gains for roll, pitch, and yaw.
    /// config.kp_roll = 1.2;
    /// config.ki_roll = 0.01;
    /// config.kd_roll = 0.4;
    ///
    /// config.kp_pitch = config.kp_roll;
    /// config.ki_pitch = config.ki_roll;
    /// config.kd_pitch = config.kd_roll;
    ///
    /// config.kp_yaw = 2.0;
    /// config.ki_yaw = 0.0;
    /// config.kd_yaw = 0.0;
    ///
    /// // Bound the integral term and the motor commands.
    /// config.max_integral = 50.0;
    /// config.esc_min = 0.0;
    /// config.esc_max = 255.0;
    /// config.low_throttle_threshold = 10.0;
    ///
    /// // Select the timing and angle modes.
    /// config.timing = TimingMode::VariableInterval;
    /// config.angle_mode = AngleMode::Rate;
    ///
    /// // The configuration is ready to use.
    /// let controller = AttitudeController::with_config(config);
    /// assert!(controller.is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            kp_roll: T::one(),
            ki_roll: T::zero(),
            kd_roll: T::zero(),
            kp_pitch: T::one(),
            ki_pitch: T::zero(),
            kd_pitch: T::zero(),
            kp_yaw: T::one(),
            ki_yaw: T::zero(),
            kd_yaw: T::zero(),
            max_integral: T::one(),
            esc_min: T::zero(),
            esc_max: T::one(),
            low_throttle_threshold: T::zero(),
            timing: TimingMode::FixedInterval,
            angle_mode: AngleMode::Absolute,
        }
    }

    /// Checks that the limits describe non-empty ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.esc_max < self.esc_min {
            return Err(ConfigError::InvertedMotorRange);
        }
        if self.max_integral < T::zero() {
            return Err(ConfigError::NegativeIntegralLimit);
        }
        Ok(())
    }
}

impl<T: Number> Default for ControllerConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}
