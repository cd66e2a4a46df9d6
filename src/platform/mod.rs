//! Platform abstraction layer
//!
//! Handles the edges between the outside world and the simulation:
//! - Input: a single-consumer command queue fed from any thread
//! - Time: fixed timestep accumulation from variable frame deltas

pub mod input;
pub mod time;

pub use input::{CommandQueue, InputHandle};
pub use time::FixedStep;
