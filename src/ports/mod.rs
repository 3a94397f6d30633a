//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the resolver and the device it
//! runs on (platform ad-ID service, durable key-value store, UUID source).
//! Implementations live in `src/adapters/`.

pub mod ad_id;
pub mod id_gen;
pub mod key_value;

pub use ad_id::{AdIdInfo, AdIdService, PlatformProbe};
pub use id_gen::IdGenerator;
pub use key_value::KeyValueStore;
