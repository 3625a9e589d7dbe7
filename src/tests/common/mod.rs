//! Common Test Utilities
//!
//! Shared fixtures for building encounters used across test modules.


pub use fixtures::*;
