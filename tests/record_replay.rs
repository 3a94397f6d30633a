//! Record-replay round-trip integration tests.
//!
//! Records a live resolution against a platform document, then replays the
//! cassettes without the document and checks the same profile comes back.

use serde_json::json;

use adprofile::cassette::config::CassetteConfig;
use adprofile::cassette::recorder::CassetteRecorder;
use adprofile::commands::resolve_profile;
use adprofile::config::Settings;
use adprofile::context::DeviceContext;

#[test]
fn record_then_replay_produces_identical_profile() {
    let dir = std::env::temp_dir().join("adprofile_record_replay_test");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let ad_id_file = dir.join("ad_id.json");
    std::fs::write(
        &ad_id_file,
        r#"{"id":"38400000-8cf0-11bd-b23e-10b96e40000d","limit_ad_tracking":true}"#,
    )
    .unwrap();
    let settings = Settings {
        store_path: dir.join("prefs.json"),
        ad_id_file: Some(ad_id_file.clone()),
        ..Settings::default()
    };

    // --- Phase 1: record a live resolution ---
    let (ctx, session) = DeviceContext::recording_at(dir.join("cassettes"), &settings).unwrap();
    let recorded = resolve_profile(ctx).unwrap();
    let out = session.finish().expect("context released its recorders");

    assert!(recorded.id_was_generated);
    assert!(recorded.limit_ad_tracking_enabled);
    assert_ne!(recorded.id, "38400000-8cf0-11bd-b23e-10b96e40000d");

    // --- Phase 2: replay without the platform document ---
    std::fs::remove_file(&ad_id_file).unwrap();
    let config = CassetteConfig {
        ad_id: Some(out.join("ad_id.cassette.yaml")),
        id_gen: Some(out.join("id_gen.cassette.yaml")),
    };
    let replayed = resolve_profile(DeviceContext::replaying_from(&config).unwrap()).unwrap();
    assert_eq!(replayed, recorded);

    // --- Phase 3: replay again for determinism ---
    let again = resolve_profile(DeviceContext::replaying_from(&config).unwrap()).unwrap();
    assert_eq!(again, replayed);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn monolithic_cassette_replays_platform_failure_as_fallback() {
    let dir = std::env::temp_dir().join("adprofile_record_replay_mono");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("full.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&path, "platform-crash");
    recorder.record("ad_id", "probe", json!(null), json!(true));
    recorder.record(
        "ad_id",
        "advertising_id_info",
        json!(null),
        json!({"err": "GooglePlayServicesNotAvailable"}),
    );
    recorder.record(
        "id_gen",
        "generate_id",
        json!(null),
        json!("5f0c7a1e-3b2d-4c8e-9a61-0d2f4b7e8c13"),
    );
    recorder.finish().unwrap();

    let profile = resolve_profile(DeviceContext::replaying(&path).unwrap()).unwrap();
    assert_eq!(profile.id, "5f0c7a1e-3b2d-4c8e-9a61-0d2f4b7e8c13");
    assert!(profile.id_was_generated);
    assert!(!profile.limit_ad_tracking_enabled);

    let _ = std::fs::remove_dir_all(&dir);
}
