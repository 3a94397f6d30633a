//! Command dispatch and handlers.

pub mod report;
pub mod resolve;

use std::sync::Arc;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::DeviceContext;
use crate::profile::AdvertisingProfile;
use crate::resolver::AdvertisingProfileResolver;

/// Dispatch a parsed command to its handler.
///
/// `ADPROFILE_REPLAY` replays a cassette instead of touching the device;
/// otherwise `ADPROFILE_RECORD` records platform and id-generator
/// interactions into per-port cassettes under that directory.
///
/// # Errors
///
/// Returns an error string if the context cannot be composed or the
/// selected command handler fails.
pub fn dispatch(command: &Command, settings: &Settings) -> Result<(), String> {
    let (ctx, session) = if let Some(path) = &settings.replay_cassette {
        (DeviceContext::replaying(path)?, None)
    } else if let Some(dir) = &settings.record_dir {
        let (ctx, session) = DeviceContext::recording_at(dir.clone(), settings)?;
        (ctx, Some(session))
    } else {
        (DeviceContext::live(settings), None)
    };

    let result = resolve_profile(ctx).and_then(|profile| match command {
        Command::Resolve { json } => resolve::run(&profile, *json),
        Command::Report => {
            report::run(&profile);
            Ok(())
        }
    });

    // Finish recording after the command completes (even on error)
    if let Some(session) = session {
        finish_recording(session)?;
    }

    result
}

/// Resolve the profile for `ctx` on a dedicated runtime.
///
/// The runtime, the resolver and the context are all dropped before this
/// returns, so recording adapters release their recorders.
///
/// # Errors
///
/// Returns an error string if the async runtime cannot be started.
pub fn resolve_profile(ctx: DeviceContext) -> Result<AdvertisingProfile, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let resolver = AdvertisingProfileResolver::new(Arc::new(ctx));
    Ok(runtime.block_on(resolver.get_profile()))
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
