//! Advertising profile snapshot and the normalization shared by providers.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::DeviceContext;
use crate::error::ProviderError;
use crate::ports::AdIdInfo;

/// Sentinel id reported when no identifier could be obtained at all.
pub const SENTINEL_ADVERTISING_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Key under which the locally generated id is persisted.
pub const GENERATED_ID_KEY: &str = "uuid";

const AD_ID_PATTERN: &str = "^[a-f0-9]{8}(?:-[a-f0-9]{4}){4}[a-f0-9]{8}$";

/// Immutable snapshot of the advertising identity for this install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisingProfile {
    /// Platform advertising id, persisted local UUID, or the sentinel.
    pub id: String,
    /// Whether the user opted out of ad tracking at the OS level.
    pub limit_ad_tracking_enabled: bool,
    /// Whether `id` was synthesized locally rather than obtained from a provider.
    pub id_was_generated: bool,
}

impl Default for AdvertisingProfile {
    fn default() -> Self {
        Self {
            id: SENTINEL_ADVERTISING_ID.to_string(),
            limit_ad_tracking_enabled: false,
            id_was_generated: false,
        }
    }
}

impl fmt::Display for AdvertisingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AdvertisingProfile(id='{}', isLimitAdTrackingEnabled={}, isAdvertisingIdWasGenerated={})",
            self.id, self.limit_ad_tracking_enabled, self.id_was_generated
        )
    }
}

/// Returns `true` if `id` has the canonical advertising-id shape
/// (lowercase hex grouped 8-4-4-4-12).
#[must_use]
pub fn is_ad_id(id: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(AD_ID_PATTERN).expect("advertising id pattern compiles"))
        .is_match(id)
}

/// Turns a raw provider answer into a profile.
///
/// The raw id is replaced by the persisted local id when it is the sentinel,
/// blank, limited, or not in canonical shape. The raw limit-ad-tracking flag
/// is always carried through.
///
/// # Errors
///
/// Returns [`ProviderError::Storage`] if a local id is needed and the
/// key-value store cannot be read.
pub fn normalize_profile(
    raw: AdIdInfo,
    ctx: &DeviceContext,
) -> Result<AdvertisingProfile, ProviderError> {
    let needs_local_id = raw.limit_ad_tracking
        || raw.id == SENTINEL_ADVERTISING_ID
        || raw.id.trim().is_empty()
        || !is_ad_id(&raw.id);

    if !needs_local_id {
        return Ok(AdvertisingProfile {
            id: raw.id,
            limit_ad_tracking_enabled: raw.limit_ad_tracking,
            id_was_generated: false,
        });
    }

    Ok(AdvertisingProfile {
        id: persisted_local_id(ctx)?,
        limit_ad_tracking_enabled: raw.limit_ad_tracking,
        id_was_generated: true,
    })
}

/// Returns the locally generated id, creating and persisting one on first use.
///
/// A stored value that is blank, the sentinel, or not in canonical shape is
/// treated as absent and overwritten with a fresh id.
///
/// # Errors
///
/// Returns [`ProviderError::Storage`] if the store cannot be read. A failed
/// write is only logged; the freshly generated id is still returned.
pub fn persisted_local_id(ctx: &DeviceContext) -> Result<String, ProviderError> {
    let stored = ctx
        .store
        .get(GENERATED_ID_KEY)
        .map_err(|e| ProviderError::Storage(e.to_string()))?;
    match stored {
        Some(id) if id != SENTINEL_ADVERTISING_ID && is_ad_id(&id) => {
            debug!("Reusing persisted advertising id");
            return Ok(id);
        }
        Some(_) => warn!("Discarding corrupt persisted advertising id"),
        None => {}
    }

    let id = ctx.id_gen.generate_id();
    if let Err(e) = ctx.store.put(GENERATED_ID_KEY, &id) {
        warn!("Failed to persist generated advertising id: {e}");
    }
    debug!("Generated new advertising id");
    Ok(id)
}
