//! Identifier providers, tried by the resolver in priority order.

use tracing::debug;

use crate::context::DeviceContext;
use crate::error::ProviderError;
use crate::ports::AdIdInfo;
use crate::profile::{normalize_profile, AdvertisingProfile, SENTINEL_ADVERTISING_ID};

/// A source of advertising profiles.
///
/// Both operations may block; the resolver only calls them from the
/// blocking pool.
pub trait IdentifierProvider: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Checks whether the provider can be used on this device.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unavailable`] if the capability the provider
    /// depends on is absent.
    fn is_available(&self, ctx: &DeviceContext) -> Result<bool, ProviderError>;

    /// Produces a profile from the provider's source.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying platform or storage call fails.
    fn extract_profile(&self, ctx: &DeviceContext) -> Result<AdvertisingProfile, ProviderError>;
}

/// Wraps the platform advertising-ID service, when present.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformAdProvider;

impl IdentifierProvider for PlatformAdProvider {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn is_available(&self, ctx: &DeviceContext) -> Result<bool, ProviderError> {
        if ctx.ad_id.is_available() {
            Ok(true)
        } else {
            Err(ProviderError::Unavailable("platform advertising-id service not present".into()))
        }
    }

    fn extract_profile(&self, ctx: &DeviceContext) -> Result<AdvertisingProfile, ProviderError> {
        let service = ctx.ad_id.service().ok_or_else(|| {
            ProviderError::Unavailable("platform advertising-id service not present".into())
        })?;
        let raw = service
            .advertising_id_info()
            .map_err(|e| ProviderError::ExtractionFailed(e.to_string()))?;
        debug!(limit_ad_tracking = raw.limit_ad_tracking, "Platform returned advertising id");
        normalize_profile(raw, ctx)
    }
}

/// Always available; synthesizes and persists a local id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackLocalProvider;

impl IdentifierProvider for FallbackLocalProvider {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn is_available(&self, _ctx: &DeviceContext) -> Result<bool, ProviderError> {
        Ok(true)
    }

    fn extract_profile(&self, ctx: &DeviceContext) -> Result<AdvertisingProfile, ProviderError> {
        let raw = AdIdInfo { id: SENTINEL_ADVERTISING_ID.to_string(), limit_ad_tracking: false };
        normalize_profile(raw, ctx)
    }
}

/// Returns the providers in the order the resolver tries them.
#[must_use]
pub fn default_providers() -> Vec<Box<dyn IdentifierProvider>> {
    vec![Box::new(PlatformAdProvider), Box::new(FallbackLocalProvider)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryKeyValueStore;
    use crate::ports::{AdIdService, IdGenerator, PlatformProbe};

    struct FixedIdGenerator;

    impl IdGenerator for FixedIdGenerator {
        fn generate_id(&self) -> String {
            "11111111-2222-3333-4444-555555555555".to_string()
        }
    }

    struct FailingService;

    impl AdIdService for FailingService {
        fn advertising_id_info(
            &self,
        ) -> Result<AdIdInfo, Box<dyn std::error::Error + Send + Sync>> {
            Err("service disconnected".into())
        }
    }

    fn make_context(ad_id: PlatformProbe) -> DeviceContext {
        DeviceContext {
            ad_id,
            store: Box::new(MemoryKeyValueStore::new()),
            id_gen: Box::new(FixedIdGenerator),
        }
    }

    #[test]
    fn platform_unavailable_probe_is_an_error() {
        let ctx = make_context(PlatformProbe::Unavailable);
        let err = PlatformAdProvider.is_available(&ctx).unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }

    #[test]
    fn platform_call_failure_is_extraction_error() {
        let ctx = make_context(PlatformProbe::Available(Box::new(FailingService)));
        assert!(PlatformAdProvider.is_available(&ctx).unwrap());
        let err = PlatformAdProvider.extract_profile(&ctx).unwrap_err();
        assert_eq!(err, ProviderError::ExtractionFailed("service disconnected".into()));
    }

    #[test]
    fn fallback_generates_local_id() {
        let ctx = make_context(PlatformProbe::Unavailable);
        assert!(FallbackLocalProvider.is_available(&ctx).unwrap());
        let profile = FallbackLocalProvider.extract_profile(&ctx).unwrap();
        assert_eq!(profile.id, "11111111-2222-3333-4444-555555555555");
        assert!(profile.id_was_generated);
        assert!(!profile.limit_ad_tracking_enabled);
    }

    #[test]
    fn default_order_is_platform_then_fallback() {
        let names: Vec<_> = default_providers().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["platform", "fallback"]);
    }
}
