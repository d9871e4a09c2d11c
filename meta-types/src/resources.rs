//! Remote resources of the store metadata API.
//!
//! Only the attributes this client reads or writes are modelled; unknown
//! attributes are ignored on decode.

use serde::{Deserialize, Serialize};

use crate::LocalizationFields;

/// Resource type of a version localization.
pub const LOCALIZATION_TYPE: &str = "appStoreVersionLocalizations";

/// Resource type of a store version.
pub const VERSION_TYPE: &str = "appStoreVersions";

/// A `{type, id}` pointer to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource id.
    pub id: String,
}

/// A store entity (an app).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    /// App id.
    pub id: String,
    /// App attributes.
    pub attributes: AppAttributes,
}

/// Attributes of an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
    /// Display name.
    pub name: String,
    /// Bundle identifier.
    pub bundle_id: String,
    /// SKU.
    #[serde(default)]
    pub sku: Option<String>,
    /// Locale the store treats as primary for this app.
    #[serde(default)]
    pub primary_locale: Option<String>,
}

/// Platform a version ships on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    /// iOS
    Ios,
    /// macOS
    MacOs,
    /// tvOS
    TvOs,
    /// visionOS
    VisionOs,
    /// A platform this client does not know yet.
    #[serde(other)]
    Other,
}

impl Platform {
    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ios => "iOS",
            Self::MacOs => "macOS",
            Self::TvOs => "tvOS",
            Self::VisionOs => "visionOS",
            Self::Other => "other",
        }
    }
}

/// Review and release state of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppStoreState {
    /// Draft; metadata can be edited.
    PrepareForSubmission,
    /// Submitted, waiting for review.
    WaitingForReview,
    /// Under review.
    InReview,
    /// Approved, waiting for the developer to release.
    PendingDeveloperRelease,
    /// Live.
    ReadyForSale,
    /// Rejected.
    Rejected,
    /// Metadata rejected.
    MetadataRejected,
    /// Removed from sale.
    RemovedFromSale,
    /// Removed from sale by the developer.
    DeveloperRemovedFromSale,
    /// Approved, waiting for scheduled release.
    PendingAppleRelease,
    /// Processing.
    ProcessingForAppStore,
    /// Superseded by a newer version.
    ReplacedWithNewVersion,
    /// Binary rejected.
    InvalidBinary,
    /// A state this client does not know yet.
    #[serde(other)]
    Other,
}

impl AppStoreState {
    /// Whether localizations of a version in this state can be edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::PrepareForSubmission)
    }
}

/// A store version of an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppStoreVersion {
    /// Version id.
    pub id: String,
    /// Version attributes.
    pub attributes: VersionAttributes,
}

/// Attributes of a store version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionAttributes {
    /// Marketing version string, e.g. `2.4.1`.
    #[serde(default)]
    pub version_string: Option<String>,
    /// Platform.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Review state.
    #[serde(default)]
    pub app_store_state: Option<AppStoreState>,
    /// Copyright line.
    #[serde(default)]
    pub copyright: Option<String>,
    /// Release type (manual, after approval, scheduled).
    #[serde(default)]
    pub release_type: Option<String>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_date: Option<String>,
}

/// Per-locale text of a store version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionLocalization {
    /// Localization id.
    pub id: String,
    /// Locale and text.
    pub attributes: LocalizationAttributes,
}

/// Attributes of a version localization as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationAttributes {
    /// Locale code, e.g. `en-US`. Immutable once created.
    pub locale: String,
    /// Text fields.
    #[serde(flatten)]
    pub fields: LocalizationFields,
}

/// `PATCH` body for a localization. The locale is immutable and omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationUpdateRequest {
    /// Resource payload.
    pub data: LocalizationUpdateData,
}

/// Payload of a [`LocalizationUpdateRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationUpdateData {
    /// Always [`LOCALIZATION_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Localization id.
    pub id: String,
    /// Changed text.
    pub attributes: LocalizationFields,
}

impl LocalizationUpdateRequest {
    /// Build an update for the given localization.
    pub fn new(id: &str, fields: LocalizationFields) -> Self {
        Self {
            data: LocalizationUpdateData {
                kind: LOCALIZATION_TYPE.to_string(),
                id: id.to_string(),
                attributes: fields,
            },
        }
    }
}

/// `POST` body creating a localization under a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationCreateRequest {
    /// Resource payload.
    pub data: LocalizationCreateData,
}

/// Payload of a [`LocalizationCreateRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationCreateData {
    /// Always [`LOCALIZATION_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Locale and text.
    pub attributes: LocalizationAttributes,
    /// Owning version.
    pub relationships: LocalizationCreateRelationships,
}

/// Relationships of a new localization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationCreateRelationships {
    /// The version the localization belongs to.
    pub app_store_version: LocalizationCreateVersion,
}

/// To-one link to the owning version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationCreateVersion {
    /// Version pointer.
    pub data: ResourceRef,
}

impl LocalizationCreateRequest {
    /// Build a create request for `locale` under `version_id`.
    pub fn new(version_id: &str, locale: &str, fields: LocalizationFields) -> Self {
        Self {
            data: LocalizationCreateData {
                kind: LOCALIZATION_TYPE.to_string(),
                attributes: LocalizationAttributes {
                    locale: locale.to_string(),
                    fields,
                },
                relationships: LocalizationCreateRelationships {
                    app_store_version: LocalizationCreateVersion {
                        data: ResourceRef {
                            kind: VERSION_TYPE.to_string(),
                            id: version_id.to_string(),
                        },
                    },
                },
            },
        }
    }
}
