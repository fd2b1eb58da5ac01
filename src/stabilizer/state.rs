// src/stabilizer/state.rs

//! # Controller State
//!
//! Per-axis vectors, motor commands and the state carried from one control
//! cycle to the next.

use crate::pid::AttitudeControlData;
use crate::Number;
use piddiy::PidController;

/// Three per-axis components: x = roll, y = pitch, z = yaw.
///
/// The same type carries angles or angular rates depending on the active
/// [`AngleMode`](crate::AngleMode).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisVector<T> {
    /// Roll component.
    pub x: T,
    /// Pitch component.
    pub y: T,
    /// Yaw component.
    pub z: T,
}

impl<T> AxisVector<T> {
    /// Creates a vector from its roll, pitch and yaw components.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Number> AxisVector<T> {
    /// The zero vector.
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

impl<T> From<(T, T, T)> for AxisVector<T> {
    fn from((x, y, z): (T, T, T)) -> Self {
        Self { x, y, z }
    }
}

impl<T> From<AxisVector<T>> for (T, T, T) {
    fn from(vector: AxisVector<T>) -> Self {
        (vector.x, vector.y, vector.z)
    }
}

/// Speed commands for the four motors of a quad-X frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorCommand<T> {
    /// Motor one.
    pub one: T,
    /// Motor two.
    pub two: T,
    /// Motor three.
    pub three: T,
    /// Motor four.
    pub four: T,
}

impl<T: Number> Default for MotorCommand<T> {
    fn default() -> Self {
        Self {
            one: T::zero(),
            two: T::zero(),
            three: T::zero(),
            four: T::zero(),
        }
    }
}

impl<T: Number> MotorCommand<T> {
    /// Clamps every motor independently into `[min, max]`.
    pub fn clamped(self, min: T, max: T) -> Self {
        Self {
            one: self.one.clamp(min, max),
            two: self.two.clamp(min, max),
            three: self.three.clamp(min, max),
            four: self.four.clamp(min, max),
        }
    }

    /// Motor values in order one to four, as consumed by a PWM driver.
    pub fn as_array(&self) -> [T; 4] {
        [self.one, self.two, self.three, self.four]
    }
}

/// Mutable state of the attitude loop, owned by a single
/// [`AttitudeController`](crate::AttitudeController).
///
/// Each axis keeps its gains, set point, last error, accumulated error and
/// derivative in a `piddiy` controller. The measurement history, outputs and
/// timing reference are kept alongside.
pub(crate) struct ControllerState<T: Number> {
    pub(crate) roll_pid: PidController<T, AttitudeControlData<T>>,
    pub(crate) pitch_pid: PidController<T, AttitudeControlData<T>>,
    pub(crate) yaw_pid: PidController<T, AttitudeControlData<T>>,
    pub(crate) current_angle: AxisVector<T>,
    pub(crate) last_angle: AxisVector<T>,
    pub(crate) output: AxisVector<T>,
    pub(crate) motor: MotorCommand<T>,
    pub(crate) last_time: u64,
    pub(crate) last_armed: bool,
}

impl<T: Number> ControllerState<T> {
    /// Creates a zeroed state with the given per-axis gains.
    pub(crate) fn with_gains(kp: AxisVector<T>, ki: AxisVector<T>, kd: AxisVector<T>) -> Self {
        let mut roll_pid = PidController::new();
        roll_pid.kp(kp.x).ki(ki.x).kd(kd.x);

        let mut pitch_pid = PidController::new();
        pitch_pid.kp(kp.y).ki(ki.y).kd(kd.y);

        let mut yaw_pid = PidController::new();
        yaw_pid.kp(kp.z).ki(ki.z).kd(kd.z);

        ControllerState {
            roll_pid,
            pitch_pid,
            yaw_pid,
            current_angle: AxisVector::zero(),
            last_angle: AxisVector::zero(),
            output: AxisVector::zero(),
            motor: MotorCommand::default(),
            last_time: 0,
            last_armed: false,
        }
    }

    /// Commanded values after stick polarity has been applied.
    pub(crate) fn desired(&self) -> AxisVector<T> {
        AxisVector::new(
            self.roll_pid.set_point,
            self.pitch_pid.set_point,
            self.yaw_pid.set_point,
        )
    }

    /// Instantaneous error of the most recent cycle.
    pub(crate) fn error(&self) -> AxisVector<T> {
        AxisVector::new(self.roll_pid.error, self.pitch_pid.error, self.yaw_pid.error)
    }

    /// Accumulated error, before the integral gain and clamp are applied.
    pub(crate) fn error_sum(&self) -> AxisVector<T> {
        AxisVector::new(
            self.roll_pid.integral,
            self.pitch_pid.integral,
            self.yaw_pid.integral,
        )
    }

    /// Derivative of the measurement from the most recent cycle.
    pub(crate) fn delta_error(&self) -> AxisVector<T> {
        AxisVector::new(
            self.roll_pid.derivative,
            self.pitch_pid.derivative,
            self.yaw_pid.derivative,
        )
    }

    /// Zeroes the accumulated error on every axis.
    pub(crate) fn clear_error_sum(&mut self) {
        self.roll_pid.integral = T::zero();
        self.pitch_pid.integral = T::zero();
        self.yaw_pid.integral = T::zero();
    }
}
