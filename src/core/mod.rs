//! Constants and the shared error type.

pub mod constants;
pub mod error;

pub use constants::*;
pub use error::{GameError, Result};
