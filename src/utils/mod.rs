//! Utility modules: file persistence helpers.

pub mod persistence;
