//! Show credential and configuration status.

use anyhow::{Context, Result};
use std::path::Path;

use storemeta_client::{CredentialStore, FileCredentialStore, TokenAuthenticator};

use crate::config::{Config, CONFIG_FILE};

/// Run the status command.
pub async fn run(data_dir: &Path, config: &Config) -> Result<()> {
    println!("=== storemeta status ===");
    println!();
    println!("Data dir: {}", data_dir.display());
    println!("API:      {}", config.api.base_url);
    println!();

    let store = FileCredentialStore::in_dir(data_dir);
    let credentials = match store.load().await.context("Failed to read credentials")? {
        Some(credentials) => credentials,
        None => {
            println!("Credentials: NOT LOGGED IN");
            println!();
            println!("Run 'storemeta login --issuer <id> --key-id <id> --key-file <path>'.");
            return Ok(());
        }
    };

    println!("Credentials:");
    println!("  Issuer: {}", credentials.issuer_id());
    println!("  Key ID: {}", credentials.key_id());

    let auth = TokenAuthenticator::new();
    match auth.authenticate(credentials).await {
        Ok(()) => {
            if let Some(token) = auth.current_token().await {
                let remaining = token.expires_at().saturating_sub(unix_now());
                println!("  Token:  valid for {}", format_duration(remaining));
            }
        }
        Err(e) => {
            println!("  Token:  UNAVAILABLE ({e})");
        }
    }

    Ok(())
}

/// Run the config command.
pub async fn config(data_dir: &Path, config: &Config, init: bool) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    if init {
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            println!("{} already exists.", path.display());
        } else {
            config.save(data_dir).await?;
            println!("Wrote {}", path.display());
        }
        println!();
    }

    println!("[api]");
    println!("base_url      = {}", config.api.base_url);
    println!("timeout_secs  = {}", config.api.timeout_secs);
    println!("max_in_flight = {}", config.api.max_in_flight);
    println!();
    println!("[translation]");
    println!(
        "api_key  = {}",
        if config.translation.api_key.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("base_url = {}", config.translation.base_url);
    println!("model    = {}", config.translation.model);
    println!("use_mock = {}", config.translation.use_mock);
    Ok(())
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Format a number of seconds as a short human-readable string.
fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
