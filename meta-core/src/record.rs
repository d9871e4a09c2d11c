//! Editable localization records.
//!
//! A record is the local, mutable view of one version localization. Its
//! identity stays `None` until the server has acknowledged it, and its locale
//! can't change once the record exists.

use storemeta_types::{LocalizationField, LocalizationFields, VersionLocalization};

use crate::CoreError;

/// Treat an empty string and an absent value as the same "no value".
pub fn normalize(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// One locale's text, as edited locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableRecord {
    id: Option<String>,
    locale: String,
    fields: LocalizationFields,
}

impl EditableRecord {
    /// A new, empty record that the server doesn't know yet.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            id: None,
            locale: locale.into(),
            fields: LocalizationFields::default(),
        }
    }

    /// A record with the given identity and content.
    pub fn with_fields(
        id: Option<String>,
        locale: impl Into<String>,
        fields: LocalizationFields,
    ) -> Self {
        Self {
            id,
            locale: locale.into(),
            fields,
        }
    }

    /// Server identity, `None` until first synced.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Locale code.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Text content.
    pub fn fields(&self) -> &LocalizationFields {
        &self.fields
    }

    /// Read a single field, normalized.
    pub fn get(&self, field: LocalizationField) -> Option<&str> {
        normalize(self.fields.get(field))
    }

    /// Set a field after checking its character limit.
    pub fn set(&mut self, field: LocalizationField, value: Option<String>) -> Result<(), CoreError> {
        if let (Some(limit), Some(v)) = (field.max_length(), value.as_deref()) {
            let len = v.chars().count();
            if len > limit {
                return Err(CoreError::FieldTooLong { field, limit, len });
            }
        }
        self.fields.set(field, value);
        Ok(())
    }

    /// Set a field without checking limits.
    pub(crate) fn set_unchecked(&mut self, field: LocalizationField, value: Option<String>) {
        self.fields.set(field, value);
    }

    /// Replace every field with the values of `other`, keeping identity and locale.
    pub fn copy_fields_from(&mut self, other: &EditableRecord) {
        self.fields = other.fields.clone();
    }

    /// Adopt a server identity.
    pub fn assign_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Whether any field has a non-empty value.
    pub fn has_content(&self) -> bool {
        self.fields.iter().any(|(_, v)| normalize(v).is_some())
    }

    /// Whether both records carry the same text once empty and absent are
    /// treated alike. Identity is not compared.
    pub fn same_content(&self, other: &EditableRecord) -> bool {
        LocalizationField::ALL
            .into_iter()
            .all(|field| self.get(field) == other.get(field))
    }

    /// Fields whose value differs from `base`, ready for submission.
    ///
    /// A field cleared locally is sent as an empty string so the server
    /// clears it too; unchanged fields are omitted.
    pub fn changes_from(&self, base: &EditableRecord) -> LocalizationFields {
        let mut out = LocalizationFields::default();
        for field in LocalizationField::ALL {
            let current = self.get(field);
            if current != base.get(field) {
                out.set(field, Some(current.unwrap_or_default().to_string()));
            }
        }
        out
    }
}

impl From<VersionLocalization> for EditableRecord {
    fn from(remote: VersionLocalization) -> Self {
        Self {
            id: Some(remote.id),
            locale: remote.attributes.locale,
            fields: remote.attributes.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storemeta_types::LocalizationAttributes;

    fn record(description: Option<&str>) -> EditableRecord {
        EditableRecord::with_fields(
            Some("loc-1".into()),
            "en-US",
            LocalizationFields {
                description: description.map(String::from),
                ..Default::default()
            },
        )
    }

    #[test]
    fn normalize_collapses_empty() {
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("x")), Some("x"));
    }

    #[test]
    fn empty_and_absent_are_same_content() {
        assert!(record(Some("")).same_content(&record(None)));
        assert!(!record(Some("a")).same_content(&record(None)));
    }

    #[test]
    fn has_content_ignores_empty_strings() {
        assert!(!record(Some("")).has_content());
        assert!(!EditableRecord::new("fr-FR").has_content());
        assert!(record(Some("Bonjour")).has_content());
    }

    #[test]
    fn set_rejects_values_over_limit() {
        let mut r = EditableRecord::new("en-US");
        let long = "k".repeat(101);
        let err = r.set(LocalizationField::Keywords, Some(long)).unwrap_err();
        assert_eq!(
            err,
            CoreError::FieldTooLong {
                field: LocalizationField::Keywords,
                limit: 100,
                len: 101
            }
        );
        assert_eq!(r.get(LocalizationField::Keywords), None);
    }

    #[test]
    fn set_counts_characters_not_bytes() {
        let mut r = EditableRecord::new("ja");
        // 100 three-byte characters fit the keyword limit.
        let kana = "あ".repeat(100);
        r.set(LocalizationField::Keywords, Some(kana)).unwrap();
        assert!(r.has_content());
    }

    #[test]
    fn unlimited_fields_accept_long_values() {
        let mut r = EditableRecord::new("en-US");
        let url = format!("https://example.com/{}", "a".repeat(5000));
        r.set(LocalizationField::SupportUrl, Some(url)).unwrap();
    }

    #[test]
    fn copy_fields_keeps_identity_and_locale() {
        let source = record(Some("Hello"));
        let mut target = EditableRecord::with_fields(
            Some("loc-2".into()),
            "fr-FR",
            LocalizationFields::default(),
        );
        target.copy_fields_from(&source);
        assert_eq!(target.id(), Some("loc-2"));
        assert_eq!(target.locale(), "fr-FR");
        assert_eq!(target.get(LocalizationField::Description), Some("Hello"));
    }

    #[test]
    fn changes_from_lists_only_changed_fields() {
        let base = EditableRecord::with_fields(
            Some("loc-1".into()),
            "en-US",
            LocalizationFields {
                description: Some("Old".into()),
                keywords: Some("a,b".into()),
                promotional_text: Some("Same".into()),
                ..Default::default()
            },
        );
        let mut edited = base.clone();
        edited.set(LocalizationField::Description, Some("New".into())).unwrap();
        edited.set(LocalizationField::Keywords, None).unwrap();

        let changes = edited.changes_from(&base);
        assert_eq!(changes.description.as_deref(), Some("New"));
        assert_eq!(changes.keywords.as_deref(), Some(""));
        assert_eq!(changes.promotional_text, None);
        assert_eq!(changes.whats_new, None);
    }

    #[test]
    fn changes_from_empty_base_is_all_content() {
        let mut r = EditableRecord::new("it");
        r.set(LocalizationField::WhatsNew, Some("Novità".into())).unwrap();
        r.set(LocalizationField::Keywords, Some(String::new())).unwrap();
        let changes = r.changes_from(&EditableRecord::new("it"));
        assert_eq!(changes.whats_new.as_deref(), Some("Novità"));
        assert_eq!(changes.keywords, None);
    }

    #[test]
    fn from_remote_localization() {
        let remote = VersionLocalization {
            id: "loc-7".into(),
            attributes: LocalizationAttributes {
                locale: "de-DE".into(),
                fields: LocalizationFields {
                    whats_new: Some("Fehlerbehebungen".into()),
                    ..Default::default()
                },
            },
        };
        let r = EditableRecord::from(remote);
        assert_eq!(r.id(), Some("loc-7"));
        assert_eq!(r.locale(), "de-DE");
        assert_eq!(r.get(LocalizationField::WhatsNew), Some("Fehlerbehebungen"));
    }
}
