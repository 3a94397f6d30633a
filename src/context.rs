//! Device context bundling the port trait objects the resolver depends on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::live::{FileAdIdService, FileKeyValueStore, LiveIdGenerator};
use crate::adapters::memory::MemoryKeyValueStore;
use crate::adapters::recording::{RecordingAdIdService, RecordingIdGenerator};
use crate::adapters::replaying::{ReplayingAdIdService, ReplayingIdGenerator};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::ports::{IdGenerator, KeyValueStore, PlatformProbe};

/// Everything the resolver needs from the device it runs on.
///
/// Constructors wire up different adapter sets (live, recording, replaying).
pub struct DeviceContext {
    /// Optional platform advertising-ID service, probed at composition time.
    pub ad_id: PlatformProbe,
    /// Durable per-app key-value store for the generated id.
    pub store: Box<dyn KeyValueStore>,
    /// Source of locally generated ids.
    pub id_gen: Box<dyn IdGenerator>,
}

impl DeviceContext {
    /// Creates a live context from the given settings.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self {
            ad_id: FileAdIdService::probe(settings.ad_id_file.as_deref()),
            store: Box::new(FileKeyValueStore::new(&settings.store_path)),
            id_gen: Box::new(LiveIdGenerator::new()),
        }
    }

    /// Creates a live context whose platform and id-generator interactions
    /// are recorded into a new session under `dir`.
    ///
    /// The returned context must be dropped before the session is finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        dir: PathBuf,
        settings: &Settings,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(&dir)?;
        let live = Self::live(settings);
        let ctx = Self {
            ad_id: RecordingAdIdService::wrap_probe(live.ad_id, Arc::clone(&session.ad_id)),
            store: live.store,
            id_gen: Box::new(RecordingIdGenerator::new(live.id_gen, Arc::clone(&session.id_gen))),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer from the same cassette so that
    /// per-port cursors are independent. The key-value store starts empty
    /// and lives in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self {
            ad_id: ReplayingAdIdService::probe(CassetteReplayer::new(&cassette)),
            store: Box::new(MemoryKeyValueStore::new()),
            id_gen: Box::new(ReplayingIdGenerator::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// A missing ad-ID cassette replays as an absent platform; a missing
    /// id-generator cassette panics if an id is ever generated.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            ad_id: replayers.ad_id.map_or(PlatformProbe::Unavailable, ReplayingAdIdService::probe),
            store: Box::new(MemoryKeyValueStore::new()),
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => Box::new(PanickingIdGenerator),
            },
        })
    }
}

impl std::fmt::Debug for DeviceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceContext").field("ad_id", &self.ad_id).finish_non_exhaustive()
    }
}

struct PanickingIdGenerator;

impl IdGenerator for PanickingIdGenerator {
    fn generate_id(&self) -> String {
        panic!("IdGenerator port not configured in CassetteConfig - no cassette loaded for id_gen");
    }
}
