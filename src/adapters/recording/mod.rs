//! Recording adapters that capture interactions to cassettes.

pub mod ad_id;
pub mod id_gen;

pub use ad_id::RecordingAdIdService;
pub use id_gen::RecordingIdGenerator;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record an interaction with a plain (non-Result) return value.
pub(crate) fn record_interaction<O: Serialize>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    output: &O,
) {
    let output_json = serde_json::to_value(output).expect("failed to serialize recording output");
    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, serde_json::Value::Null, output_json);
}

/// Record a `Result<T, E>` interaction.
///
/// `Ok(v)` is stored as `{"ok": v}` and `Err(e)` as `{"err": e.to_string()}`,
/// the shape `replaying::replay_result` reads back.
pub(crate) fn record_result<T, E>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
{
    let output_json = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize Ok value");
            serde_json::json!({ "ok": inner })
        }
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, serde_json::Value::Null, output_json);
}
