//! Adapter implementations of the port traits.
//!
//! - `live`: real collaborators (disk, UUID source, platform ad-ID document).
//! - `memory`: in-process key-value store.
//! - `recording` / `replaying`: cassette-backed wrappers for deterministic runs.

pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;
