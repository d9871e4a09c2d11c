//! Editable text fields of a version localization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WireError;

/// A named text field of a version localization.
///
/// The wire name (camelCase) is both the serde representation and the
/// key used when talking to the translation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocalizationField {
    /// Promotional text shown above the description.
    PromotionalText,
    /// Full listing description.
    Description,
    /// Release notes for this version.
    WhatsNew,
    /// Comma separated search keywords.
    Keywords,
    /// Support page URL.
    SupportUrl,
    /// Marketing page URL.
    MarketingUrl,
}

impl LocalizationField {
    /// Every field, in submission order.
    pub const ALL: [LocalizationField; 6] = [
        Self::PromotionalText,
        Self::Description,
        Self::WhatsNew,
        Self::Keywords,
        Self::SupportUrl,
        Self::MarketingUrl,
    ];

    /// Fields that carry prose and can be sent for translation.
    pub const TRANSLATABLE: [LocalizationField; 4] = [
        Self::PromotionalText,
        Self::Description,
        Self::WhatsNew,
        Self::Keywords,
    ];

    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PromotionalText => "promotionalText",
            Self::Description => "description",
            Self::WhatsNew => "whatsNew",
            Self::Keywords => "keywords",
            Self::SupportUrl => "supportUrl",
            Self::MarketingUrl => "marketingUrl",
        }
    }

    /// Maximum length in characters, if the store enforces one.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Self::PromotionalText => Some(170),
            Self::Description => Some(4000),
            Self::WhatsNew => Some(4000),
            Self::Keywords => Some(100),
            Self::SupportUrl | Self::MarketingUrl => None,
        }
    }
}

impl fmt::Display for LocalizationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LocalizationField {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| WireError::UnknownField(s.to_string()))
    }
}

/// The text content of a localization.
///
/// Absent fields are omitted from serialized update payloads so the server
/// keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationFields {
    /// Promotional text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotional_text: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Release notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whats_new: Option<String>,
    /// Keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Support URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
    /// Marketing URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_url: Option<String>,
}

impl LocalizationFields {
    /// Get the value of a field.
    pub fn get(&self, field: LocalizationField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: LocalizationField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Iterate over every field and its value.
    pub fn iter(&self) -> impl Iterator<Item = (LocalizationField, Option<&str>)> + '_ {
        LocalizationField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    fn slot(&self, field: LocalizationField) -> &Option<String> {
        match field {
            LocalizationField::PromotionalText => &self.promotional_text,
            LocalizationField::Description => &self.description,
            LocalizationField::WhatsNew => &self.whats_new,
            LocalizationField::Keywords => &self.keywords,
            LocalizationField::SupportUrl => &self.support_url,
            LocalizationField::MarketingUrl => &self.marketing_url,
        }
    }

    fn slot_mut(&mut self, field: LocalizationField) -> &mut Option<String> {
        match field {
            LocalizationField::PromotionalText => &mut self.promotional_text,
            LocalizationField::Description => &mut self.description,
            LocalizationField::WhatsNew => &mut self.whats_new,
            LocalizationField::Keywords => &mut self.keywords,
            LocalizationField::SupportUrl => &mut self.support_url,
            LocalizationField::MarketingUrl => &mut self.marketing_url,
        }
    }
}
