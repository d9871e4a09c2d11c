//! # meta-types
//!
//! Wire format types for the storemeta store listing metadata client.
//!
//! This crate provides the foundational types used across all storemeta crates:
//! - [`Document`], [`SingleDocument`], [`Links`] - JSON:API envelopes
//! - [`Page`] - One batch of records plus the cursor to the next batch
//! - [`App`], [`AppStoreVersion`], [`VersionLocalization`] - Remote resources
//! - [`LocalizationField`], [`LocalizationFields`] - Editable text fields and their limits
//! - [`WireError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod document;
mod error;
mod fields;
mod resources;

pub use document::{Document, Links, Page, SingleDocument};
pub use error::WireError;
pub use fields::{LocalizationField, LocalizationFields};
pub use resources::{
    App, AppAttributes, AppStoreState, AppStoreVersion, LocalizationAttributes,
    LocalizationCreateData, LocalizationCreateRelationships, LocalizationCreateRequest,
    LocalizationCreateVersion, LocalizationUpdateData, LocalizationUpdateRequest, Platform,
    ResourceRef, VersionAttributes, VersionLocalization, LOCALIZATION_TYPE, VERSION_TYPE,
};
