//! `report` command: log the fields telemetry call sites consume.

use tracing::info;

use crate::profile::AdvertisingProfile;

/// Log each advertising field as its own event.
pub fn run(profile: &AdvertisingProfile) {
    info!(advertising_id = %profile.id, "advertising id");
    info!(limit_ad_tracking = profile.limit_ad_tracking_enabled, "limit ad tracking");
    info!(id_was_generated = profile.id_was_generated, "advertising id was generated");
}
