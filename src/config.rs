//! Runtime settings read from the environment.

use std::path::PathBuf;

/// Default location of the durable key-value store.
pub const DEFAULT_STORE_PATH: &str = ".adprofile/prefs.json";

/// Settings controlling how the device context is composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// JSON file backing the key-value store (`ADPROFILE_STORE`).
    pub store_path: PathBuf,
    /// Platform advertising-id document (`ADPROFILE_AD_ID_FILE`).
    pub ad_id_file: Option<PathBuf>,
    /// Directory to record cassettes into (`ADPROFILE_RECORD`).
    pub record_dir: Option<PathBuf>,
    /// Monolithic cassette to replay (`ADPROFILE_REPLAY`).
    pub replay_cassette: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            ad_id_file: None,
            record_dir: None,
            replay_cassette: None,
        }
    }
}

impl Settings {
    /// Loads settings from the process environment, after applying any `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Self {
            store_path: path("ADPROFILE_STORE").unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            ad_id_file: path("ADPROFILE_AD_ID_FILE"),
            record_dir: path("ADPROFILE_RECORD"),
            replay_cassette: path("ADPROFILE_REPLAY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_nothing_set() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    }

    #[test]
    fn reads_all_variables() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ADPROFILE_STORE", "/data/prefs.json"),
            ("ADPROFILE_AD_ID_FILE", "/data/ad_id.json"),
            ("ADPROFILE_RECORD", "/tmp/cassettes"),
            ("ADPROFILE_REPLAY", "/tmp/full.cassette.yaml"),
        ]);
        let settings = Settings::from_lookup(|k| vars.get(k).map(ToString::to_string));

        assert_eq!(settings.store_path, PathBuf::from("/data/prefs.json"));
        assert_eq!(settings.ad_id_file, Some(PathBuf::from("/data/ad_id.json")));
        assert_eq!(settings.record_dir, Some(PathBuf::from("/tmp/cassettes")));
        assert_eq!(settings.replay_cassette, Some(PathBuf::from("/tmp/full.cassette.yaml")));
    }

    #[test]
    fn empty_values_are_ignored() {
        let settings = Settings::from_lookup(|k| {
            (k == "ADPROFILE_STORE" || k == "ADPROFILE_AD_ID_FILE").then(|| "  ".to_string())
        });
        assert_eq!(settings.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert!(settings.ad_id_file.is_none());
    }
}
