//! Command implementations for the seqdot CLI

pub mod plot;
