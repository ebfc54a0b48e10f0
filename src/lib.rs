//! xiaomi-touch library crate.
//!
//! This module exposes the mode table, profile table, and device gateway
//! for integration testing.

pub mod device;
pub mod modes;
pub mod profiles;
