/// Agent interface
pub mod agent;

/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Exploration policies
pub mod exploration;

/// Testing environments
pub mod gym;

/// Transitions
pub mod memory;

/// Episode driver and reward shaping
pub mod train;

mod error;
mod util;

pub use error::{Error, Result};
