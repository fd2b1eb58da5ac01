// src/pid/attitude.rs

//! # Attitude PID Control Module
//!
//! This module provides the per-axis compute function and control data
//! structure for the attitude loop. The integral term is bounded after the
//! integral gain is applied, and the derivative acts on the measurement
//! rather than on the error, so set point steps do not kick the output.

use crate::Number;
use piddiy::PidController;

/// Control data for one axis of the attitude loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttitudeControlData<T> {
    /// The current measurement, an angle or an angular rate.
    pub measurement: T,
    /// The measurement of the previous cycle.
    pub last_measurement: T,
    /// The time delta since the previous cycle. `None` skips integration and
    /// zeroes the derivative for this cycle.
    pub dt: Option<T>,
}

/// Computes the per-axis terms without touching `pid`.
///
/// Returns `(error, error_sum, delta_error)`, where `error_sum` is the
/// accumulator carried in `pid.integral` advanced by this cycle's error.
/// Arithmetic saturates at the bounds of `T`, and an unordered (NaN)
/// increment is not accumulated.
pub fn compute_attitude<T: Number>(
    pid: &PidController<T, AttitudeControlData<T>>,
    data: AttitudeControlData<T>,
) -> (T, T, T) {
    let error = pid.set_point.bounded_sub(data.measurement);
    match data.dt {
        Some(dt) => {
            let increment = error.bounded_mul(dt);
            let error_sum = if increment.is_ordered() {
                pid.integral.bounded_add(increment)
            } else {
                pid.integral
            };
            let delta_error = data.measurement.bounded_sub(data.last_measurement) / dt;
            (error, error_sum, delta_error)
        }
        None => (error, pid.integral, T::zero()),
    }
}

/// Combines the three terms into the axis output.
///
/// `kp * error + clamp(ki * error_sum, ±integral_limit) - kd * delta_error`
pub fn attitude_output<T: Number>(
    pid: &PidController<T, AttitudeControlData<T>>,
    error: T,
    error_sum: T,
    delta_error: T,
    integral_limit: T,
) -> T {
    let integral = pid
        .ki
        .bounded_mul(error_sum)
        .clamp(-integral_limit, integral_limit);
    pid.kp
        .bounded_mul(error)
        .bounded_add(integral)
        .bounded_sub(pid.kd.bounded_mul(delta_error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn axis_pid(
        set_point: f32,
        kp: f32,
        ki: f32,
        kd: f32,
    ) -> PidController<f32, AttitudeControlData<f32>> {
        let mut pid = PidController::new();
        pid.set_point(set_point).kp(kp).ki(ki).kd(kd);
        pid
    }

    /// Test that the integral term is clamped to the specified limit.
    #[test]
    fn test_pid_attitude_integral_clamping() {
        let mut pid = axis_pid(50.0, 0.0, 5.0, 0.0);
        let data = AttitudeControlData {
            measurement: 0.0,
            last_measurement: 0.0,
            dt: Some(1.0),
        };

        // This would normally push the integral term way over 100 if not clamped
        for _ in 0..10 {
            let (_, error_sum, _) = compute_attitude(&pid, data);
            pid.integral = error_sum;
        }

        assert!(
            value_close(500.0, pid.integral),
            "Accumulated error itself is never clamped."
        );
        let output = attitude_output(&pid, 50.0, pid.integral, 0.0, 100.0);
        assert!(
            value_close(100.0, output),
            "Integral term should be clamped to 100."
        );
    }

    /// Test the boundary of the integral clamp on both sides.
    #[test]
    fn test_pid_attitude_integral_boundary() {
        let pid = axis_pid(0.0, 0.0, 1.0, 0.0);

        let at_limit = attitude_output(&pid, 0.0, 25.0, 0.0, 25.0);
        let over_limit = attitude_output(&pid, 0.0, 25.001, 0.0, 25.0);
        let under_limit = attitude_output(&pid, 0.0, -25.001, 0.0, 25.0);

        assert!(value_close(25.0, at_limit), "At the limit nothing is cut.");
        assert_eq!(25.0, over_limit, "Above the limit the term is the limit.");
        assert_eq!(-25.0, under_limit, "Below the limit the term is the negated limit.");
    }

    /// Test PID response with a non-zero set point and a moving measurement.
    #[test]
    fn test_pid_attitude_response() {
        let pid = axis_pid(10.0, 1.0, 1.0, 1.0);
        let data = AttitudeControlData {
            measurement: 7.0,
            last_measurement: 4.0,
            dt: Some(1.0),
        };

        let (error, error_sum, delta_error) = compute_attitude(&pid, data);
        let output = attitude_output(&pid, error, error_sum, delta_error, 100.0);

        assert!(value_close(3.0, error), "Error should be 3.");
        assert!(value_close(3.0, error_sum), "Integral should start to accumulate.");
        assert!(value_close(3.0, delta_error), "Derivative should be 3.");
        assert!(
            value_close(3.0, output),
            "Derivative is subtracted from the sum of the other terms."
        );
    }

    /// Test that the time delta scales the integral and the derivative.
    #[test]
    fn test_pid_attitude_variable_dt() {
        let mut pid = axis_pid(0.0, 1.0, 1.0, 1.0);
        pid.integral = 1.0;
        let data = AttitudeControlData {
            measurement: -2.0,
            last_measurement: 0.0,
            dt: Some(4.0),
        };

        let (error, error_sum, delta_error) = compute_attitude(&pid, data);

        assert!(value_close(2.0, error), "Error should be 2.");
        assert!(value_close(9.0, error_sum), "Integral should grow by error * dt.");
        assert!(value_close(-0.5, delta_error), "Derivative should be divided by dt.");
    }

    /// Test that a missing time delta holds the integral and zeroes the derivative.
    #[test]
    fn test_pid_attitude_skipped_dt() {
        let mut pid = axis_pid(5.0, 1.0, 1.0, 1.0);
        pid.integral = 7.0;
        let data = AttitudeControlData {
            measurement: 3.0,
            last_measurement: 1.0,
            dt: None,
        };

        let (error, error_sum, delta_error) = compute_attitude(&pid, data);

        assert!(value_close(2.0, error), "Error is still computed.");
        assert!(value_close(7.0, error_sum), "Integral should be held.");
        assert!(value_close(0.0, delta_error), "Derivative should be zero.");
    }

    /// Test that PID computes zero output for zero error with zero initial conditions.
    #[test]
    fn test_pid_attitude_zero_conditions() {
        let pid = axis_pid(0.0, 1.0, 1.0, 1.0);
        let data = AttitudeControlData {
            measurement: 0.0,
            last_measurement: 0.0,
            dt: Some(1.0),
        };

        let (error, error_sum, delta_error) = compute_attitude(&pid, data);
        let output = attitude_output(&pid, error, error_sum, delta_error, 10.0);

        assert!(value_close(0.0, error), "Error should be zero.");
        assert!(value_close(0.0, error_sum), "Integral should be zero.");
        assert!(value_close(0.0, delta_error), "Derivative should be zero.");
        assert!(value_close(0.0, output), "Output should be zero.");
    }

    /// Test that a NaN measurement does not poison the accumulator.
    #[test]
    fn test_pid_attitude_nan_measurement_holds_integral() {
        let mut pid = axis_pid(5.0, 1.0, 1.0, 1.0);
        pid.integral = 7.0;
        let data = AttitudeControlData {
            measurement: f32::NAN,
            last_measurement: 1.0,
            dt: Some(1.0),
        };

        let (error, error_sum, _) = compute_attitude(&pid, data);

        assert!(error.is_nan(), "Error carries the NaN.");
        assert!(value_close(7.0, error_sum), "Integral should be held.");
    }

    /// Test that a long constant error saturates a fixed-point accumulator.
    #[test]
    fn test_pid_attitude_fixed_point_saturates() {
        use fixed::types::I16F16;

        let mut pid: PidController<I16F16, AttitudeControlData<I16F16>> = PidController::new();
        pid.set_point(I16F16::from_num(50))
            .kp(I16F16::ONE)
            .ki(I16F16::from_num(0.01))
            .kd(I16F16::ZERO);
        let data = AttitudeControlData {
            measurement: I16F16::ZERO,
            last_measurement: I16F16::ZERO,
            dt: Some(I16F16::from_num(1000)),
        };

        for _ in 0..5 {
            let (_, error_sum, _) = compute_attitude(&pid, data);
            pid.integral = error_sum;
        }
        assert_eq!(I16F16::MAX, pid.integral);

        let output = attitude_output(
            &pid,
            I16F16::from_num(50),
            pid.integral,
            I16F16::ZERO,
            I16F16::from_num(25),
        );
        assert_eq!(I16F16::from_num(75), output);
    }
}
