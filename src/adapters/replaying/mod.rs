//! Replaying adapters that serve recorded interactions.

pub mod ad_id;
pub mod id_gen;

pub use ad_id::ReplayingAdIdService;
pub use id_gen::ReplayingIdGenerator;

use std::error::Error;

/// Reads back a `Result` stored by `recording::record_result`.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
