//! Platform advertising-ID service port.

use std::error::Error;

use serde::{Deserialize, Serialize};

/// Raw answer from the platform advertising-ID service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdIdInfo {
    /// The advertising id exactly as the platform reported it.
    pub id: String,
    /// Whether the user opted out of ad tracking at the OS level.
    pub limit_ad_tracking: bool,
}

/// Queries the platform for the current advertising id.
///
/// Implementations may block on IPC to another process; callers must not
/// invoke them from an async task directly.
pub trait AdIdService: Send + Sync {
    /// Fetches the advertising id and limit-ad-tracking flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform call fails.
    fn advertising_id_info(&self) -> Result<AdIdInfo, Box<dyn Error + Send + Sync>>;
}

/// Result of probing for the optional platform ad-ID service.
///
/// The probe happens once, when the device context is composed.
pub enum PlatformProbe {
    /// The service is present and can be queried.
    Available(Box<dyn AdIdService>),
    /// The service is absent on this device.
    Unavailable,
}

impl PlatformProbe {
    /// Returns the service handle when it was found.
    #[must_use]
    pub fn service(&self) -> Option<&dyn AdIdService> {
        match self {
            Self::Available(service) => Some(service.as_ref()),
            Self::Unavailable => None,
        }
    }

    /// Returns `true` if the service was found.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl std::fmt::Debug for PlatformProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Available(..)"),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}
