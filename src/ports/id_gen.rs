//! ID generator port for synthesizing local advertising identifiers.

/// Generates identifiers used when no usable platform advertising id exists.
///
/// Abstracting generation allows deterministic replay by substituting a
/// predictable sequence during tests and cassette playback.
pub trait IdGenerator: Send + Sync {
    /// Generates a new random identifier in canonical UUID text form.
    fn generate_id(&self) -> String;
}
