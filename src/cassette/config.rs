//! Cassette configuration for composable per-port replay.

use std::path::PathBuf;

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths.
///
/// A port without a cassette is not replayed: the ad-ID port then probes
/// as unavailable, and the id generator panics if it is ever called.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the platform ad-ID port cassette file.
    pub ad_id: Option<PathBuf>,
    /// Path to the ID generator port cassette file.
    pub id_gen: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the platform ad-ID port.
    pub ad_id: Option<CassetteReplayer>,
    /// Replayer for the ID generator port.
    pub id_gen: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &PathBuf| Cassette::load(path).map(|c| CassetteReplayer::new(&c));
        Ok(PortReplayers {
            ad_id: self.ad_id.as_ref().map(load).transpose()?,
            id_gen: self.id_gen.as_ref().map(load).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn load_all_with_no_cassettes() {
        let replayers = CassetteConfig::default().load_all().unwrap();
        assert!(replayers.ad_id.is_none());
        assert!(replayers.id_gen.is_none());
    }

    #[test]
    fn load_per_port_cassettes() {
        let dir = std::env::temp_dir().join("adprofile_config_test_ports");
        let _ = std::fs::remove_dir_all(&dir);
        let id_gen_path = dir.join("id_gen.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&id_gen_path, "id_gen");
        recorder.record("id_gen", "generate_id", json!(null), json!("uuid-001"));
        recorder.finish().unwrap();

        let config = CassetteConfig { id_gen: Some(id_gen_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        assert!(replayers.ad_id.is_none());
        let id_gen = replayers.id_gen.as_mut().unwrap();
        assert_eq!(id_gen.next_output("id_gen", "generate_id"), json!("uuid-001"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_all_fails_on_missing_file() {
        let config = CassetteConfig {
            ad_id: Some(PathBuf::from("/nonexistent/ad_id.cassette.yaml")),
            ..CassetteConfig::default()
        };
        assert!(config.load_all().is_err());
    }
}
