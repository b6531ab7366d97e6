//! Static site generation
//!
//! Embeds both caches into an HTML template and rewrites its `firebase: {..}`
//! and `home: {..}` object literals from the configuration. The result is a
//! single self-contained page that can be hosted anywhere.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use serde_json::Value;
use tracing::info;

use crate::PlannerError;
use crate::config::{FirebaseConfig, HomeConfig, PathsConfig};

pub const PARKS_PLACEHOLDER: &str = "PARKS_PLACEHOLDER";
pub const DRIVE_TIMES_PLACEHOLDER: &str = "DRIVE_TIMES_PLACEHOLDER";

const FIREBASE_PATTERN: &str = r"firebase: \{[^}]+\}";
const HOME_PATTERN: &str = r"home: \{[^}]+\}";

/// Counts reported after generating the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSummary {
    pub parks: usize,
    pub drive_times: usize,
}

/// Build the site file from the configured template and caches
pub fn generate_site(
    paths: &PathsConfig,
    firebase: &FirebaseConfig,
    home: &HomeConfig,
) -> Result<SiteSummary> {
    info!("Loading park data...");
    let parks = load_embedded_json(&paths.parks_file)?;
    let drive_times = load_embedded_json(&paths.drive_times_file)?;
    let summary = SiteSummary {
        parks: entry_count(&parks),
        drive_times: entry_count(&drive_times),
    };
    info!("  Loaded {} parks", summary.parks);
    info!("  Loaded {} drive times", summary.drive_times);

    info!("Reading template {}", paths.template_file.display());
    if !paths.template_file.exists() {
        return Err(PlannerError::TemplateMissing {
            path: paths.template_file.clone(),
        }
        .into());
    }
    let template = fs::read_to_string(&paths.template_file)
        .with_context(|| format!("Failed to read {}", paths.template_file.display()))?;

    let page = render_site(&template, &parks, &drive_times, firebase, home)?;

    if let Some(parent) = paths.site_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&paths.site_file, page)
        .with_context(|| format!("Failed to write {}", paths.site_file.display()))?;
    info!("Generated: {}", paths.site_file.display());

    Ok(summary)
}

/// Fill a template. Pure, so the substitutions can be tested in isolation.
pub fn render_site(
    template: &str,
    parks: &Value,
    drive_times: &Value,
    firebase: &FirebaseConfig,
    home: &HomeConfig,
) -> Result<String> {
    let page = template
        .replace(PARKS_PLACEHOLDER, &serde_json::to_string_pretty(parks)?)
        .replace(DRIVE_TIMES_PLACEHOLDER, &serde_json::to_string_pretty(drive_times)?);

    let firebase_literal = format!("firebase: {}", firebase_object(firebase));
    let page = Regex::new(FIREBASE_PATTERN)?
        .replace_all(&page, NoExpand(&firebase_literal))
        .into_owned();

    let home_literal = format!("home: {}", home_object(home));
    let page = Regex::new(HOME_PATTERN)?
        .replace_all(&page, NoExpand(&home_literal))
        .into_owned();

    Ok(page)
}

/// Cache contents as generic JSON; a missing file embeds `{}`
fn load_embedded_json(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| PlannerError::cache(format!("{} is not valid: {e}", path.display())))?;
    Ok(value)
}

fn entry_count(value: &Value) -> usize {
    value.as_object().map_or(0, serde_json::Map::len)
}

fn firebase_object(firebase: &FirebaseConfig) -> String {
    format!(
        r#"{{
                apiKey: "{}",
                authDomain: "{}",
                databaseURL: "{}",
                projectId: "{}",
                storageBucket: "{}",
                messagingSenderId: "{}",
                appId: "{}"
            }}"#,
        firebase.api_key,
        firebase.auth_domain,
        firebase.database_url,
        firebase.project_id,
        firebase.storage_bucket,
        firebase.messaging_sender_id,
        firebase.app_id
    )
}

fn home_object(home: &HomeConfig) -> String {
    format!(
        r#"{{
                lat: {},
                lng: {},
                address: "{}"
            }}"#,
        home.latitude, home.longitude, home.address
    )
}
