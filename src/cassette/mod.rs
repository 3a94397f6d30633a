//! Cassettes: recorded port interactions that can be replayed later.
//!
//! A cassette captures what the platform ad-ID service and the id generator
//! answered during a run, so that the same resolution can be reproduced
//! without the device.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
