//! Recording adapter for the platform ad-ID port.

use std::error::Error;
use std::sync::{Arc, Mutex};

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{AdIdInfo, AdIdService, PlatformProbe};

/// Records platform answers while delegating to the real service.
pub struct RecordingAdIdService {
    inner: Box<dyn AdIdService>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingAdIdService {
    /// Records the probe outcome and wraps an available service so that its
    /// answers are recorded too.
    pub fn wrap_probe(probe: PlatformProbe, recorder: Arc<Mutex<CassetteRecorder>>) -> PlatformProbe {
        record_interaction(&recorder, "ad_id", "probe", &probe.is_available());
        match probe {
            PlatformProbe::Available(inner) => {
                PlatformProbe::Available(Box::new(Self { inner, recorder }))
            }
            PlatformProbe::Unavailable => PlatformProbe::Unavailable,
        }
    }
}

impl AdIdService for RecordingAdIdService {
    fn advertising_id_info(&self) -> Result<AdIdInfo, Box<dyn Error + Send + Sync>> {
        let result = self.inner.advertising_id_info();
        record_result(&self.recorder, "ad_id", "advertising_id_info", &result);
        result
    }
}
