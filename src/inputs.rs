// src/inputs.rs

//! # Collaborator Interfaces
//!
//! The controller pulls its inputs from these traits once per cycle. Every
//! query is expected to be non-blocking and to return the latest value.

use crate::AxisVector;

/// Pilot or autopilot set points.
pub trait PilotCommands<T> {
    /// Commanded roll, in the same units as the measurement for the active angle mode.
    fn commanded_roll(&self) -> T;
    /// Commanded pitch.
    fn commanded_pitch(&self) -> T;
    /// Commanded yaw.
    fn commanded_yaw(&self) -> T;
    /// Commanded throttle, in motor command units.
    fn commanded_throttle(&self) -> T;
}

/// Attitude estimates from the sensor fusion subsystem.
pub trait AttitudeSensor<T> {
    /// Orientation estimate (roll, pitch, yaw). Read in absolute-angle mode.
    fn orientation_estimate(&self) -> AxisVector<T>;
    /// Angular rate estimate (roll, pitch, yaw). Read in rate mode.
    fn rate_estimate(&self) -> AxisVector<T>;
}

/// Arm/disarm state of the vehicle.
pub trait ArmingSwitch {
    /// `true` while the motors are allowed to spin under command.
    fn armed(&self) -> bool;
}

/// Microsecond resolution monotonic clock.
pub trait MonotonicClock {
    /// Current time in microseconds. Only read in variable-interval timing mode.
    fn micros(&self) -> u64;
}

/// Everything a control cycle reads.
pub trait FlightInputs<T>: PilotCommands<T> + AttitudeSensor<T> + ArmingSwitch + MonotonicClock {}

impl<T, I> FlightInputs<T> for I where
    I: PilotCommands<T> + AttitudeSensor<T> + ArmingSwitch + MonotonicClock
{
}
