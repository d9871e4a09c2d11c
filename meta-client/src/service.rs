//! Metadata API operations.
//!
//! [`MetadataService`] wraps an [`HttpClient`] with the handful of endpoints
//! this client needs, and implements [`RemoteLocalizations`] so the sync
//! engine can submit through it.

use async_trait::async_trait;
use storemeta_types::{
    App, AppStoreVersion, LocalizationCreateRequest, LocalizationFields,
    LocalizationUpdateRequest, SingleDocument, VersionLocalization,
};
use tracing::debug;

use crate::http::HttpClient;
use crate::paginator::Paginator;
use crate::transport::{HttpMethod, Transport};
use crate::ClientError;

/// Page size requested for version and localization lists.
pub const PAGE_LIMIT: usize = 200;

/// Remote side of a localization edit session.
#[async_trait]
pub trait RemoteLocalizations: Send + Sync {
    /// Every localization of a version, in server order.
    async fn fetch_localizations(&self, version_id: &str) -> Result<Vec<VersionLocalization>, ClientError>;

    /// Update an existing localization with `fields`.
    async fn update_localization(
        &self,
        id: &str,
        fields: LocalizationFields,
    ) -> Result<VersionLocalization, ClientError>;

    /// Create a localization for `locale` under a version.
    async fn create_localization(
        &self,
        version_id: &str,
        locale: &str,
        fields: LocalizationFields,
    ) -> Result<VersionLocalization, ClientError>;
}

/// Typed access to the metadata API.
pub struct MetadataService<T: Transport> {
    client: HttpClient<T>,
}

impl<T: Transport> MetadataService<T> {
    /// A service over `client`.
    pub fn new(client: HttpClient<T>) -> Self {
        Self { client }
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &HttpClient<T> {
        &self.client
    }

    /// Every app visible to the credentials.
    pub async fn fetch_apps(&self) -> Result<Vec<App>, ClientError> {
        Paginator::new(&self.client)
            .fetch_all("/apps?include=appStoreVersions")
            .await
    }

    /// The app a store version belongs to.
    pub async fn fetch_app_for_version(&self, version_id: &str) -> Result<App, ClientError> {
        let doc: SingleDocument<App> = self
            .client
            .get(&format!("/appStoreVersions/{version_id}/app"))
            .await?;
        Ok(doc.data)
    }

    /// Every store version of an app.
    pub async fn fetch_versions(&self, app_id: &str) -> Result<Vec<AppStoreVersion>, ClientError> {
        let url = format!(
            "/apps/{app_id}/appStoreVersions?include=appStoreVersionLocalizations&limit={PAGE_LIMIT}"
        );
        Paginator::new(&self.client).fetch_all(&url).await
    }
}

#[async_trait]
impl<T: Transport> RemoteLocalizations for MetadataService<T> {
    async fn fetch_localizations(&self, version_id: &str) -> Result<Vec<VersionLocalization>, ClientError> {
        let url = format!("/appStoreVersions/{version_id}/appStoreVersionLocalizations?limit={PAGE_LIMIT}");
        Paginator::new(&self.client).fetch_all(&url).await
    }

    async fn update_localization(
        &self,
        id: &str,
        fields: LocalizationFields,
    ) -> Result<VersionLocalization, ClientError> {
        debug!(id, "updating localization");
        let body = LocalizationUpdateRequest::new(id, fields);
        let doc: SingleDocument<VersionLocalization> = self
            .client
            .send(
                &format!("/appStoreVersionLocalizations/{id}"),
                HttpMethod::Patch,
                Some(&body),
            )
            .await?;
        Ok(doc.data)
    }

    async fn create_localization(
        &self,
        version_id: &str,
        locale: &str,
        fields: LocalizationFields,
    ) -> Result<VersionLocalization, ClientError> {
        debug!(version_id, locale, "creating localization");
        let body = LocalizationCreateRequest::new(version_id, locale, fields);
        let doc: SingleDocument<VersionLocalization> = self
            .client
            .send("/appStoreVersionLocalizations", HttpMethod::Post, Some(&body))
            .await?;
        Ok(doc.data)
    }
}
