// src/stabilizer/mixer.rs

//! # Quad-X Motor Mixer
//!
//! Maps throttle and the three axis corrections onto four motor commands.
//!
//! The magnitude of each mixed sum is taken, so a motor whose mix goes
//! negative is commanded to spin up by that amount rather than slow down.
//! This is kept for compatibility with existing tunes.

use crate::{AxisVector, MotorCommand, Number};

/// Mixes throttle and per-axis outputs for an X frame, before clamping.
///
/// ```text
/// one   = |throttle + x - y - z|
/// two   = |throttle - x - y + z|
/// three = |throttle - x + y - z|
/// four  = |throttle + x + y + z|
/// ```
///
/// Sums saturate at the bounds of `T`.
pub fn mix_quad_x<T: Number>(throttle: T, output: AxisVector<T>) -> MotorCommand<T> {
    let AxisVector { x, y, z } = output;
    MotorCommand {
        one: throttle.bounded_add(x).bounded_sub(y).bounded_sub(z).magnitude(),
        two: throttle.bounded_sub(x).bounded_sub(y).bounded_add(z).magnitude(),
        three: throttle.bounded_sub(x).bounded_add(y).bounded_sub(z).magnitude(),
        four: throttle.bounded_add(x).bounded_add(y).bounded_add(z).magnitude(),
    }
}
