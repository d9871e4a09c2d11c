//! Read-only listing commands: apps, versions and locales.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use storemeta_core::EditableRecord;
use storemeta_types::{App, AppStoreVersion, LocalizationField, Platform};

use super::{connect, open_version};
use crate::config::Config;

/// Run the apps command.
pub async fn apps(data_dir: &Path, config: &Config, search: Option<&str>) -> Result<()> {
    let service = connect(data_dir, config).await?;
    let apps = service.fetch_apps().await.context("Failed to fetch apps")?;
    let apps = filter_apps(apps, search);

    if apps.is_empty() {
        println!("No apps found.");
        return Ok(());
    }
    for app in &apps {
        println!("{}", app_line(app));
    }
    Ok(())
}

/// Run the versions command.
pub async fn versions(
    data_dir: &Path,
    config: &Config,
    app_id: &str,
    platform: Option<&str>,
) -> Result<()> {
    let service = connect(data_dir, config).await?;
    let versions = service
        .fetch_versions(app_id)
        .await
        .with_context(|| format!("Failed to fetch versions of app {app_id}"))?;

    let versions: Vec<AppStoreVersion> = versions
        .into_iter()
        .filter(|v| platform.map_or(true, |p| platform_matches(v.attributes.platform, p)))
        .collect();
    if versions.is_empty() {
        println!("No versions found.");
        return Ok(());
    }
    for version in &versions {
        println!("{}", version_line(version));
    }
    Ok(())
}

/// Run the locales command.
pub async fn locales(
    data_dir: &Path,
    config: &Config,
    version_id: &str,
    primary: Option<&str>,
    show: Option<&str>,
) -> Result<()> {
    let engine = open_version(data_dir, config, version_id, primary).await?;
    let state = engine.state();

    if let Some(locale) = show {
        let record = state
            .record(locale)
            .with_context(|| format!("Version {version_id} has no {locale} localization"))?;
        print!("{}", record_details(record));
        return Ok(());
    }

    if state.is_empty() {
        println!("Version {version_id} has no localizations.");
        return Ok(());
    }
    let primary = state.primary_locale();
    for locale in state.locales() {
        if let Some(record) = state.record(&locale) {
            let marker = if primary == Some(locale.as_str()) { "*" } else { " " };
            println!("{marker} {}", record_summary(record));
        }
    }
    Ok(())
}

/// Apps matching `search` (name or bundle id, case-insensitive), sorted by name.
fn filter_apps(apps: Vec<App>, search: Option<&str>) -> Vec<App> {
    let needle = search.map(str::to_lowercase);
    let mut apps: Vec<App> = apps
        .into_iter()
        .filter(|app| match &needle {
            Some(needle) => {
                app.attributes.name.to_lowercase().contains(needle.as_str())
                    || app.attributes.bundle_id.to_lowercase().contains(needle.as_str())
            }
            None => true,
        })
        .collect();
    apps.sort_by(|a, b| {
        a.attributes
            .name
            .to_lowercase()
            .cmp(&b.attributes.name.to_lowercase())
    });
    apps
}

fn app_line(app: &App) -> String {
    let mut line = format!(
        "{}  {}  ({})",
        app.id, app.attributes.name, app.attributes.bundle_id
    );
    if let Some(primary) = &app.attributes.primary_locale {
        line.push_str(&format!("  primary: {primary}"));
    }
    line
}

fn version_line(version: &AppStoreVersion) -> String {
    let attrs = &version.attributes;
    let platform = attrs.platform.map_or("unknown", |p| p.display_name());
    let state = attrs
        .app_store_state
        .map(|s| wire_name(&s))
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let editable = if attrs.app_store_state.is_some_and(|s| s.is_editable()) {
        "  (editable)"
    } else {
        ""
    };
    format!(
        "{}  {}  {}  {}{}",
        version.id,
        attrs.version_string.as_deref().unwrap_or("-"),
        platform,
        state,
        editable
    )
}

/// Match a platform against a wire name (`MAC_OS`) or display name (`macOS`).
fn platform_matches(platform: Option<Platform>, filter: &str) -> bool {
    match platform {
        Some(p) => {
            wire_name(&p).eq_ignore_ascii_case(filter) || p.display_name().eq_ignore_ascii_case(filter)
        }
        None => false,
    }
}

/// The serde name of a unit enum variant.
fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// One line per locale: which fields are filled and how close to their limit.
fn record_summary(record: &EditableRecord) -> String {
    let mut parts = Vec::new();
    for field in LocalizationField::ALL {
        if let Some(value) = record.get(field) {
            let len = value.chars().count();
            match field.max_length() {
                Some(limit) => parts.push(format!("{} {len}/{limit}", field.name())),
                None => parts.push(field.name().to_string()),
            }
        }
    }
    let fields = if parts.is_empty() {
        "(empty)".to_string()
    } else {
        parts.join(", ")
    };
    format!("{:<8} {}", record.locale(), fields)
}

fn record_details(record: &EditableRecord) -> String {
    let mut out = format!("[{}]\n", record.locale());
    for field in LocalizationField::ALL {
        let value = record.get(field).unwrap_or("");
        out.push_str(&format!("{}: {}\n", field.name(), value));
    }
    out
}
