//! Internal error taxonomy for identifier providers.
//!
//! These errors never leave the resolver: a failing provider is demoted in
//! favour of the next one and the failure is only logged.

/// Why an identifier provider yielded no profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The capability the provider depends on is absent.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The platform call made by the provider failed.
    #[error("profile extraction failed: {0}")]
    ExtractionFailed(String),

    /// The durable key-value store could not be read.
    #[error("key-value store failure: {0}")]
    Storage(String),
}
