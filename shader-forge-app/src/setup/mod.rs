//! Wiring between the command line and the core build.

pub mod execution;
