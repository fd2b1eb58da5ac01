// src/lib.rs

//! # Quadrotor Attitude Stabilization
//!
//! This crate provides a `no_std`, no-alloc attitude stabilization loop for an
//! X-configuration quadrotor. Each control cycle compares the commanded
//! orientation (or rate) against the measured one, runs a per-axis PID law
//! with integral anti-windup, and mixes the three axis corrections with the
//! throttle into four clamped motor speed commands.
//!
//! Sensor fusion, receiver decoding, arming logic and motor drivers are
//! supplied by the caller through the traits in [`inputs`].

#![no_std]
#![deny(missing_docs)]

pub mod error;
pub mod inputs;
pub mod pid;
pub mod stabilizer;

#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use inputs::*;
#[doc(inline)]
pub use stabilizer::*;

#[cfg(test)]
mod test_utils;
