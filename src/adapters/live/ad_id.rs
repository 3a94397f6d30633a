//! Live adapter for the platform advertising-ID service.
//!
//! Off-device there is no ad-ID daemon to bind to, so the platform answer
//! is read from a JSON document (`{"id": "...", "limit_ad_tracking": false}`)
//! that the host environment provides.

use std::error::Error;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ports::{AdIdInfo, AdIdService, PlatformProbe};

/// Reads the platform advertising id from a JSON document on each call.
pub struct FileAdIdService {
    path: PathBuf,
}

impl FileAdIdService {
    /// Creates a service reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Probes for the service: available only when a document path is
    /// configured and the document exists.
    #[must_use]
    pub fn probe(path: Option<&Path>) -> PlatformProbe {
        match path {
            Some(path) if path.exists() => {
                debug!("Platform advertising-id document found at {}", path.display());
                PlatformProbe::Available(Box::new(Self::new(path)))
            }
            Some(path) => {
                debug!("Platform advertising-id document missing at {}", path.display());
                PlatformProbe::Unavailable
            }
            None => PlatformProbe::Unavailable,
        }
    }
}

impl AdIdService for FileAdIdService {
    fn advertising_id_info(&self) -> Result<AdIdInfo, Box<dyn Error + Send + Sync>> {
        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {e}", self.path.display()).into())
    }
}
