//! Single-flight advertising profile resolution.
//!
//! The first caller of [`AdvertisingProfileResolver::get_profile`] moves the
//! state from `NotStarted` to `InProgress` and spawns the resolution; every
//! caller then waits on the same `watch` channel until the state is `Done`.
//! Resolution runs on a detached task, so a caller that stops waiting does
//! not cancel it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::context::DeviceContext;
use crate::error::ProviderError;
use crate::profile::AdvertisingProfile;
use crate::providers::{default_providers, FallbackLocalProvider, IdentifierProvider};

/// Lifecycle of a resolver. Transitions only move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    /// Nobody has asked for the profile yet.
    NotStarted,
    /// A resolution is running.
    InProgress,
    /// The profile is known and will never change.
    Done(AdvertisingProfile),
}

impl ResolutionState {
    /// Returns `true` once the profile is resolved.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Returns the resolved profile, if any.
    #[must_use]
    pub fn profile(&self) -> Option<&AdvertisingProfile> {
        match self {
            Self::Done(profile) => Some(profile),
            Self::NotStarted | Self::InProgress => None,
        }
    }
}

struct Inner {
    ctx: Arc<DeviceContext>,
    providers: Vec<Box<dyn IdentifierProvider>>,
    state: watch::Sender<ResolutionState>,
    attempts: AtomicUsize,
}

/// Resolves one advertising profile and shares it with every caller.
///
/// Cloning is cheap and clones share the same state, so a single resolver
/// can be constructed at startup and handed to every call site.
#[derive(Clone)]
pub struct AdvertisingProfileResolver {
    inner: Arc<Inner>,
}

impl AdvertisingProfileResolver {
    /// Creates a resolver that tries the platform provider, then the local fallback.
    #[must_use]
    pub fn new(ctx: Arc<DeviceContext>) -> Self {
        Self::with_providers(ctx, default_providers())
    }

    /// Creates a resolver that tries `providers` in the given order.
    #[must_use]
    pub fn with_providers(
        ctx: Arc<DeviceContext>,
        providers: Vec<Box<dyn IdentifierProvider>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                ctx,
                providers,
                state: watch::Sender::new(ResolutionState::NotStarted),
                attempts: AtomicUsize::new(0),
            }),
        }
    }

    /// Returns the advertising profile, resolving it on first use.
    ///
    /// Never fails: when no provider yields a profile the sentinel profile
    /// is returned.
    pub async fn get_profile(&self) -> AdvertisingProfile {
        if let Some(profile) = self.inner.state.borrow().profile() {
            return profile.clone();
        }

        let mut rx = self.inner.state.subscribe();
        let won = self.inner.state.send_if_modified(|state| {
            if *state == ResolutionState::NotStarted {
                *state = ResolutionState::InProgress;
                true
            } else {
                false
            }
        });
        if won {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(inner.resolve());
        }

        let profile = match rx.wait_for(ResolutionState::is_done).await {
            Ok(state) => state.profile().cloned(),
            Err(_) => None,
        };
        profile.unwrap_or_default()
    }

    /// Returns a snapshot of the current resolution state.
    #[must_use]
    pub fn state(&self) -> ResolutionState {
        self.inner.state.borrow().clone()
    }

    /// Number of times the provider chain has been run (0 or 1).
    #[must_use]
    pub fn resolve_attempts(&self) -> usize {
        self.inner.attempts.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for AdvertisingProfileResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvertisingProfileResolver")
            .field("state", &*self.inner.state.borrow())
            .field("providers", &self.inner.providers.len())
            .finish_non_exhaustive()
    }
}

impl Inner {
    async fn resolve(self: Arc<Self>) {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let worker = Arc::clone(&self);
        let profile = match tokio::task::spawn_blocking(move || worker.run_providers()).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Advertising profile resolution aborted: {e}");
                AdvertisingProfile::default()
            }
        };

        info!(
            id_was_generated = profile.id_was_generated,
            limit_ad_tracking = profile.limit_ad_tracking_enabled,
            "Advertising profile resolved"
        );
        self.state.send_replace(ResolutionState::Done(profile));
    }

    fn run_providers(&self) -> AdvertisingProfile {
        for provider in &self.providers {
            match contained(provider.as_ref(), || provider.is_available(&self.ctx)) {
                Ok(true) => {}
                Ok(false) => {
                    debug!(provider = provider.name(), "Provider disabled");
                    continue;
                }
                Err(e) => {
                    debug!(provider = provider.name(), "Provider skipped: {e}");
                    continue;
                }
            }
            match contained(provider.as_ref(), || provider.extract_profile(&self.ctx)) {
                Ok(profile) => {
                    debug!(provider = provider.name(), "Provider produced profile");
                    return profile;
                }
                Err(e) => debug!(provider = provider.name(), "Provider failed: {e}"),
            }
        }

        let fallback = FallbackLocalProvider;
        match contained(&fallback, || fallback.extract_profile(&self.ctx)) {
            Ok(profile) => profile,
            Err(e) => {
                debug!("Local fallback failed, using sentinel profile: {e}");
                AdvertisingProfile::default()
            }
        }
    }
}

/// Runs one provider call, turning a panic into an extraction failure so the
/// next provider still gets its turn.
fn contained<T>(
    provider: &dyn IdentifierProvider,
    call: impl FnOnce() -> Result<T, ProviderError>,
) -> Result<T, ProviderError> {
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|_| {
        let reason = format!("{} provider panicked", provider.name());
        Err(ProviderError::ExtractionFailed(reason))
    })
}
