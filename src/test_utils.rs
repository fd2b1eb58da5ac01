// src/test_utils.rs

//! This module contains utilities for testing.

use crate::{ArmingSwitch, AttitudeSensor, AxisVector, MonotonicClock, PilotCommands};

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f32 = 1e-5;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_close(target: f32, value: f32) -> bool {
    (target - value).abs() < TEST_TOLERANCE
}

/// Checks if each of the components in a vector is close enough to
/// be considered equal.
///
/// # Arguments
/// * `target` - The target vector as a tuple of three `f32` values.
/// * `value` - The vector to compare against the target.
///
/// # Returns
/// `true` if each component of `target` and `value` is close as per `value_close`,
/// otherwise `false`.
pub fn vector_close(target: (f32, f32, f32), value: (f32, f32, f32)) -> bool {
    value_close(target.0, value.0)
        && value_close(target.1, value.1)
        && value_close(target.2, value.2)
}

/// Scripted collaborator. Tests mutate the public fields between cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestInputs {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub throttle: f32,
    pub orientation: AxisVector<f32>,
    pub rate: AxisVector<f32>,
    pub armed: bool,
    pub now: u64,
}

impl PilotCommands<f32> for TestInputs {
    fn commanded_roll(&self) -> f32 {
        self.roll
    }

    fn commanded_pitch(&self) -> f32 {
        self.pitch
    }

    fn commanded_yaw(&self) -> f32 {
        self.yaw
    }

    fn commanded_throttle(&self) -> f32 {
        self.throttle
    }
}

impl AttitudeSensor<f32> for TestInputs {
    fn orientation_estimate(&self) -> AxisVector<f32> {
        self.orientation
    }

    fn rate_estimate(&self) -> AxisVector<f32> {
        self.rate
    }
}

impl ArmingSwitch for TestInputs {
    fn armed(&self) -> bool {
        self.armed
    }
}

impl MonotonicClock for TestInputs {
    fn micros(&self) -> u64 {
        self.now
    }
}
