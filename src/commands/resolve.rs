//! `resolve` command: print the resolved advertising profile.

use crate::profile::AdvertisingProfile;

/// Print `profile` to stdout, as JSON when `json` is set.
///
/// # Errors
///
/// Returns an error string if JSON serialization fails.
pub fn run(profile: &AdvertisingProfile, json: bool) -> Result<(), String> {
    println!("{}", render(profile, json)?);
    Ok(())
}

fn render(profile: &AdvertisingProfile, json: bool) -> Result<String, String> {
    if json {
        serde_json::to_string_pretty(profile)
            .map_err(|e| format!("Failed to serialize advertising profile: {e}"))
    } else {
        Ok(profile.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_text_and_json() {
        let profile = AdvertisingProfile::default();
        assert!(render(&profile, false).unwrap().starts_with("AdvertisingProfile(id='"));

        let json: serde_json::Value = serde_json::from_str(&render(&profile, true).unwrap()).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["idWasGenerated"], false);
    }
}
