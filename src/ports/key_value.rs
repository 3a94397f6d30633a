//! Durable per-app key-value store port.

use std::error::Error;

/// Persists small string values across process restarts.
///
/// The resolver uses it to keep a locally generated advertising id stable
/// for the lifetime of the app install.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error + Send + Sync>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
