// src/stabilizer/attitude.rs

//! # Attitude PID Flight Stabilization Controller
//!
//! The controller core of the attitude loop, intended for a single-threaded
//! scheduler that calls [`AttitudeController::compute_cycle`] at a fixed or
//! measured cadence.
//!
//! ## Overview
//!
//! Each cycle pulls the pilot commands, the arm state, the attitude (or rate)
//! estimate and, in variable-interval mode, the clock from the caller's
//! [`FlightInputs`]. Per axis it computes the error against the commanded
//! value, accumulates it, differentiates the measurement, and combines the
//! terms with an anti-windup clamp on the integral term. The three outputs are
//! mixed with the throttle for a quad-X frame and each motor command is
//! clamped to the ESC range.
//!
//! ## Cycle Order
//!
//! 1. Read inputs and the elapsed time.
//! 2. Apply the [`IntegralResetPolicy`], so a reset on this cycle zeroes the
//!    accumulator that this cycle's integration then adds to.
//! 3. Run the per-axis PID law on one snapshot of current and previous values.
//! 4. Mix, clamp, then commit the measurement, timestamp and arm state for the
//!    next cycle.
//!
//! ## Elapsed Time Guard
//!
//! In variable-interval mode a cycle whose elapsed time is zero (or negative,
//! or not representable in `T`) holds the accumulated error and reports a zero
//! derivative. The proportional and clamped integral terms are still applied.

use crate::pid::{attitude_output, compute_attitude, AttitudeControlData};
use crate::stabilizer::state::ControllerState;
use crate::{
    mix_quad_x, AngleMode, AxisVector, ConfigError, ControllerConfig, FlightInputs,
    IntegralResetPolicy, MotorCommand, Number, ResetCause, TimingMode,
};
use log::{debug, info, trace, warn};
use piddiy::PidController;

/// Struct representing the attitude stabilization controller.
pub struct AttitudeController<T: Number> {
    config: ControllerConfig<T>,
    reset_policy: IntegralResetPolicy<T>,
    state: ControllerState<T>,
}

impl<T: Number> AttitudeController<T> {
    /// Creates a new controller using the provided configuration.
    pub fn with_config(config: ControllerConfig<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = ControllerState::with_gains(
            AxisVector::new(config.kp_roll, config.kp_pitch, config.kp_yaw),
            AxisVector::new(config.ki_roll, config.ki_pitch, config.ki_yaw),
            AxisVector::new(config.kd_roll, config.kd_pitch, config.kd_yaw),
        );

        Ok(AttitudeController {
            config,
            reset_policy: IntegralResetPolicy::new(config.low_throttle_threshold),
            state,
        })
    }

    /// Primes the controller with a first reading.
    ///
    /// Runs one full cycle to populate the derived state, zeroes the
    /// accumulated error and seeds the previous measurement and timestamp, so
    /// the first real cycle sees a zero derivative for an unchanged measurement.
    pub fn initialize<I: FlightInputs<T>>(&mut self, inputs: &I) {
        self.compute_cycle(inputs);
        self.state.clear_error_sum();
        self.state.last_angle = self.state.current_angle;

        info!(
            "attitude controller initialized: timing {:?}, angle mode {:?}, armed {}",
            self.config.timing, self.config.angle_mode, self.state.last_armed
        );
    }

    /// Runs one control cycle and stores the resulting motor command.
    pub fn compute_cycle<I: FlightInputs<T>>(&mut self, inputs: &I) {
        let throttle = inputs.commanded_throttle();
        let armed = inputs.armed();

        // Roll and pitch sticks are inverted relative to the measurement
        let desired = AxisVector::new(
            T::zero().bounded_sub(inputs.commanded_roll()),
            T::zero().bounded_sub(inputs.commanded_pitch()),
            inputs.commanded_yaw(),
        );

        let (dt, now) = match self.config.timing {
            TimingMode::VariableInterval => {
                let now = inputs.micros();
                (self.elapsed_since_last_cycle(now), now)
            }
            TimingMode::FixedInterval => (Some(T::one()), self.state.last_time),
        };

        let current_angle = match self.config.angle_mode {
            AngleMode::Absolute => inputs.orientation_estimate(),
            AngleMode::Rate => inputs.rate_estimate(),
        };

        self.maybe_reset_integral(throttle, armed);

        let last_angle = self.state.last_angle;
        let integral_limit = self.config.max_integral;
        let output_x = step_axis(
            &mut self.state.roll_pid,
            desired.x,
            current_angle.x,
            last_angle.x,
            dt,
            integral_limit,
        );
        let output_y = step_axis(
            &mut self.state.pitch_pid,
            desired.y,
            current_angle.y,
            last_angle.y,
            dt,
            integral_limit,
        );
        let output_z = step_axis(
            &mut self.state.yaw_pid,
            desired.z,
            current_angle.z,
            last_angle.z,
            dt,
            integral_limit,
        );
        let output = AxisVector::new(output_x, output_y, output_z);

        let mixed = mix_quad_x(throttle, output);
        let motor = mixed.clamped(self.config.esc_min, self.config.esc_max);
        if motor != mixed {
            trace!("motor command saturated: {:?} -> {:?}", mixed, motor);
        }

        self.state.current_angle = current_angle;
        self.state.output = output;
        self.state.motor = motor;
        self.state.last_angle = current_angle;
        self.state.last_time = now;
        self.state.last_armed = armed;
    }

    /// Zeroes the accumulated error on every axis when throttle is below the
    /// low-throttle threshold or `armed` differs from the arm state committed
    /// by the previous cycle. Returns the cause when a reset happened.
    pub fn maybe_reset_integral(&mut self, throttle: T, armed: bool) -> Option<ResetCause> {
        let cause = self
            .reset_policy
            .evaluate(throttle, armed, self.state.last_armed);
        if let Some(cause) = cause {
            self.state.clear_error_sum();
            debug!("integral accumulators reset: {:?}", cause);
        }
        cause
    }

    fn elapsed_since_last_cycle(&self, now: u64) -> Option<T> {
        let micros = now.saturating_sub(self.state.last_time);
        if micros == 0 {
            warn!(
                "no time elapsed since last cycle (now {} us, last {} us), holding integral",
                now, self.state.last_time
            );
            return None;
        }
        let dt = T::from_u64(micros);
        if dt.is_none() {
            warn!("elapsed time of {} us is not representable, holding integral", micros);
        }
        dt
    }

    /// The most recently computed motor command.
    pub fn motor_command(&self) -> MotorCommand<T> {
        self.state.motor
    }

    /// Per-axis PID outputs of the most recent cycle.
    pub fn output(&self) -> AxisVector<T> {
        self.state.output
    }

    /// Per-axis error of the most recent cycle.
    pub fn error(&self) -> AxisVector<T> {
        self.state.error()
    }

    /// Accumulated error.
    pub fn error_sum(&self) -> AxisVector<T> {
        self.state.error_sum()
    }

    /// Derivative of the measurement from the most recent cycle.
    pub fn delta_error(&self) -> AxisVector<T> {
        self.state.delta_error()
    }

    /// Commanded values after stick polarity has been applied.
    pub fn desired(&self) -> AxisVector<T> {
        self.state.desired()
    }

    /// Measurement read by the most recent cycle.
    pub fn current_angle(&self) -> AxisVector<T> {
        self.state.current_angle
    }

    /// Measurement the next cycle will differentiate against.
    pub fn last_angle(&self) -> AxisVector<T> {
        self.state.last_angle
    }

    /// Timestamp of the most recent variable-interval cycle, in microseconds.
    pub fn last_time(&self) -> u64 {
        self.state.last_time
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &ControllerConfig<T> {
        &self.config
    }
}

/// Advances one axis, storing error, accumulator and derivative in `pid`,
/// and returns the axis output.
fn step_axis<T: Number>(
    pid: &mut PidController<T, AttitudeControlData<T>>,
    set_point: T,
    measurement: T,
    last_measurement: T,
    dt: Option<T>,
    integral_limit: T,
) -> T {
    pid.set_point(set_point);
    let data = AttitudeControlData {
        measurement,
        last_measurement,
        dt,
    };
    let (error, error_sum, delta_error) = compute_attitude(pid, data);
    pid.error = error;
    pid.integral = error_sum;
    pid.derivative = delta_error;

    attitude_output(pid, error, error_sum, delta_error, integral_limit)
}
