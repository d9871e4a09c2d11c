//! CLI command implementations.

pub mod browse;
pub mod edit;
pub mod login;
pub mod status;

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use storemeta_client::{
    FileCredentialStore, HttpClient, MetadataService, ReqwestTransport, SyncEngine,
    TokenAuthenticator,
};

use crate::config::Config;

/// Metadata service used by every networked command.
pub type Service = MetadataService<ReqwestTransport>;

/// Restore the stored credentials and connect to the configured API.
pub async fn connect(data_dir: &Path, config: &Config) -> Result<Service> {
    let auth = Arc::new(TokenAuthenticator::new());
    let store = FileCredentialStore::in_dir(data_dir);
    let restored = auth
        .restore_from(&store)
        .await
        .context("Failed to restore stored credentials")?;
    if !restored {
        bail!("Not logged in. Run 'storemeta login' first.");
    }

    let transport = ReqwestTransport::new().context("Failed to create HTTP client")?;
    let client = HttpClient::with_base_url(transport, auth, config.api.base_url.as_str());
    Ok(MetadataService::new(client))
}

/// Connect and load every localization of `version_id`.
///
/// The primary locale is `primary` when given, otherwise the owning app's
/// `primaryLocale`. Only when the app has none does the first locale the
/// server returns become primary.
pub async fn open_version(
    data_dir: &Path,
    config: &Config,
    version_id: &str,
    primary: Option<&str>,
) -> Result<SyncEngine<Service>> {
    let service = connect(data_dir, config).await?;
    let primary = match primary {
        Some(primary) => Some(primary.to_string()),
        None => service
            .fetch_app_for_version(version_id)
            .await
            .with_context(|| {
                format!("Failed to fetch the app of version {version_id} (pass --primary to skip)")
            })?
            .attributes
            .primary_locale,
    };
    debug!(version_id, primary = ?primary, "primary locale hint");

    let mut engine = SyncEngine::new(service, version_id)
        .with_max_in_flight(config.api.max_in_flight)
        .with_load_timeout(config.api.load_timeout());
    engine
        .load_remote(primary.as_deref())
        .await
        .with_context(|| format!("Failed to load localizations of version {version_id}"))?;
    Ok(engine)
}
