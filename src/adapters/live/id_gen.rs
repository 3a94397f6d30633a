//! Live adapter for the `IdGenerator` port.

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Live ID generator that produces random v4 UUIDs.
pub struct LiveIdGenerator;

impl LiveIdGenerator {
    /// Creates a new live ID generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LiveIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{is_ad_id, SENTINEL_ADVERTISING_ID};

    #[test]
    fn generates_distinct_canonical_ids() {
        let gen = LiveIdGenerator::new();
        let id1 = gen.generate_id();
        let id2 = gen.generate_id();

        assert_ne!(id1, id2);
        assert!(is_ad_id(&id1), "{id1} is not in canonical shape");
        assert_ne!(id1, SENTINEL_ADVERTISING_ID);
    }
}
