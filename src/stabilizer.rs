// src/stabilizer.rs

//! # Attitude Stabilizer Module
//!
//! The controller core, its per-axis state store, the integral reset policy
//! and the quad-X motor mixer.

pub mod attitude;
pub use attitude::*;
pub mod flight_stabilizer;
pub use flight_stabilizer::*;
pub mod mixer;
pub use mixer::*;
pub mod reset;
pub use reset::*;
pub mod state;
pub use state::*;
