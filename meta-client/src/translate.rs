//! Translation collaborator.
//!
//! Translation itself happens outside this crate. A [`Translator`] takes the
//! source text per field plus each field's character limit and returns the
//! translated text per field. [`MockTranslator`] returns fixed text and is
//! what tests and offline runs use.

use std::collections::BTreeMap;

use async_trait::async_trait;
use storemeta_types::LocalizationField;

use crate::ClientError;

/// Default chat-completions endpoint for translation services.
pub const DEFAULT_TRANSLATION_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default translation model.
pub const DEFAULT_TRANSLATION_MODEL: &str = "openai/gpt-4o";

/// Translates field values between locales.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `fields` from `source` to `target`, keeping each value
    /// within its entry in `limits` (characters).
    async fn translate_fields(
        &self,
        fields: &BTreeMap<LocalizationField, String>,
        limits: &BTreeMap<LocalizationField, usize>,
        source: &str,
        target: &str,
    ) -> Result<BTreeMap<LocalizationField, String>, ClientError>;
}

/// Deterministic translator returning canned text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTranslator;

impl MockTranslator {
    fn canned(field: LocalizationField, source: &str, target: &str) -> String {
        match field {
            LocalizationField::PromotionalText => "Promotional test".to_string(),
            LocalizationField::Description => "Test description".to_string(),
            LocalizationField::WhatsNew => "Test what's new".to_string(),
            LocalizationField::Keywords => "test keywords".to_string(),
            other => format!("Mock translation of {other} from {source} to {target}"),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate_fields(
        &self,
        fields: &BTreeMap<LocalizationField, String>,
        limits: &BTreeMap<LocalizationField, usize>,
        source: &str,
        target: &str,
    ) -> Result<BTreeMap<LocalizationField, String>, ClientError> {
        Ok(fields
            .keys()
            .map(|field| {
                let text = Self::canned(*field, source, target);
                let text = match limits.get(field) {
                    Some(limit) => text.chars().take(*limit).collect(),
                    None => text,
                };
                (*field, text)
            })
            .collect())
    }
}

/// Per-field character limits for a translation request.
pub fn limits_for<'a, I>(fields: I) -> BTreeMap<LocalizationField, usize>
where
    I: IntoIterator<Item = &'a LocalizationField>,
{
    fields
        .into_iter()
        .filter_map(|f| f.max_length().map(|limit| (*f, limit)))
        .collect()
}
