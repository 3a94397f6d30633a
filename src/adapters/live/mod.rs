//! Live adapters for real external interactions.

pub mod ad_id;
pub mod id_gen;
pub mod key_value;

pub use ad_id::FileAdIdService;
pub use id_gen::LiveIdGenerator;
pub use key_value::FileKeyValueStore;
