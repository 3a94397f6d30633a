//! Replaying adapter for the platform ad-ID port.

use std::error::Error;
use std::sync::Mutex;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{AdIdInfo, AdIdService, PlatformProbe};

/// Serves recorded platform answers from a cassette.
pub struct ReplayingAdIdService {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingAdIdService {
    /// Replays the recorded probe outcome.
    ///
    /// A cassette without a probe entry replays as an absent platform.
    #[must_use]
    pub fn probe(mut replayer: CassetteReplayer) -> PlatformProbe {
        let available = replayer.has_next("ad_id", "probe")
            && replayer.next_output("ad_id", "probe").as_bool().unwrap_or(false);
        if available {
            PlatformProbe::Available(Box::new(Self { replayer: Mutex::new(replayer) }))
        } else {
            PlatformProbe::Unavailable
        }
    }
}

impl AdIdService for ReplayingAdIdService {
    fn advertising_id_info(&self) -> Result<AdIdInfo, Box<dyn Error + Send + Sync>> {
        let output = self
            .replayer
            .lock()
            .map_err(|e| e.to_string())?
            .next_output("ad_id", "advertising_id_info");
        replay_result(output, "ad_id::advertising_id_info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(outputs: Vec<(&str, serde_json::Value)>) -> CassetteReplayer {
        let interactions = outputs
            .into_iter()
            .zip(0u64..)
            .map(|((method, output), seq)| Interaction {
                seq,
                port: "ad_id".into(),
                method: method.into(),
                input: json!(null),
                output,
            })
            .collect();
        CassetteReplayer::new(&Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            recorder_version: "0.1.0".into(),
            interactions,
        })
    }

    #[test]
    fn replays_available_platform() {
        let probe = ReplayingAdIdService::probe(make_replayer(vec![
            ("probe", json!(true)),
            ("advertising_id_info", json!({"ok": {"id": "abc", "limit_ad_tracking": false}})),
            ("advertising_id_info", json!({"err": "binder died"})),
        ]));

        let service = probe.service().expect("probe recorded as available");
        assert_eq!(
            service.advertising_id_info().unwrap(),
            AdIdInfo { id: "abc".into(), limit_ad_tracking: false }
        );
        assert_eq!(service.advertising_id_info().unwrap_err().to_string(), "binder died");
    }

    #[test]
    fn replays_absent_platform() {
        let probe = ReplayingAdIdService::probe(make_replayer(vec![("probe", json!(false))]));
        assert!(!probe.is_available());
    }

    #[test]
    fn missing_probe_entry_is_absent() {
        assert!(!ReplayingAdIdService::probe(make_replayer(vec![])).is_available());
    }
}
