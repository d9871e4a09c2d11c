//! Store and remove API key credentials.

use anyhow::{Context, Result};
use std::path::Path;

use storemeta_client::{CredentialStore, Credentials, FileCredentialStore, TokenAuthenticator};

/// Run the login command.
///
/// The key is checked by minting a token before anything is written, so a
/// bad key never replaces working credentials.
pub async fn login(data_dir: &Path, issuer: &str, key_id: &str, key_file: &Path) -> Result<()> {
    let pem = tokio::fs::read_to_string(key_file)
        .await
        .with_context(|| format!("Failed to read private key {}", key_file.display()))?;
    let credentials = Credentials::new(issuer.trim(), key_id.trim(), pem);

    let auth = TokenAuthenticator::new();
    auth.authenticate(credentials.clone())
        .await
        .context("Credentials rejected")?;

    let store = FileCredentialStore::in_dir(data_dir);
    store
        .save(&credentials)
        .await
        .context("Failed to save credentials")?;

    println!("Logged in with key {}.", credentials.key_id());
    println!("Credentials saved to {}", store.path().display());
    Ok(())
}

/// Run the logout command.
pub async fn logout(data_dir: &Path) -> Result<()> {
    FileCredentialStore::in_dir(data_dir)
        .delete()
        .await
        .context("Failed to remove credentials")?;
    println!("Logged out.");
    Ok(())
}
