//! Working set versus last-synced snapshot.
//!
//! [`SyncState`] owns one editing session of a store version: for every
//! locale it keeps the working copy the operator edits and the snapshot of
//! what the server last acknowledged. A locale is pending when the two differ
//! (empty and absent count as equal) or when the working copy has content but
//! no server identity yet.
//!
//! Submission is done elsewhere; this module only hands out the batch and
//! folds the results back in.

use std::collections::BTreeMap;

use storemeta_types::{LocalizationField, LocalizationFields};

use crate::locale::{resolve_primary, sort_locales};
use crate::{CoreError, EditableRecord};

/// Per-locale working copies and snapshots for one store version.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    working: BTreeMap<String, EditableRecord>,
    synced: BTreeMap<String, EditableRecord>,
    primary: Option<String>,
}

impl SyncState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with freshly fetched records.
    ///
    /// `records` must be in server order: without a usable hint the first
    /// record becomes the primary locale. Both working copy and snapshot
    /// start out identical, so nothing is pending after a load.
    pub fn load(
        &mut self,
        records: Vec<EditableRecord>,
        primary_hint: Option<&str>,
    ) -> Result<(), CoreError> {
        let mut working = BTreeMap::new();
        let mut order = Vec::with_capacity(records.len());
        for record in records {
            let locale = record.locale().to_string();
            if working.contains_key(&locale) {
                return Err(CoreError::DuplicateLocale(locale));
            }
            order.push(locale.clone());
            working.insert(locale, record);
        }

        self.primary = resolve_primary(&order, primary_hint);
        self.synced = working.clone();
        self.working = working;
        Ok(())
    }

    /// The primary locale, if anything is loaded.
    pub fn primary_locale(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// Number of locales.
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Whether no locales are loaded.
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Locales with the primary first and the rest case-insensitively sorted.
    pub fn locales(&self) -> Vec<String> {
        sort_locales(self.working.keys().cloned(), self.primary.as_deref())
    }

    /// The working copy of a locale.
    pub fn record(&self, locale: &str) -> Option<&EditableRecord> {
        self.working.get(locale)
    }

    /// The last-synced snapshot of a locale.
    pub fn synced(&self, locale: &str) -> Option<&EditableRecord> {
        self.synced.get(locale)
    }

    /// Whether a locale has unsubmitted changes. Unknown locales are never
    /// pending.
    pub fn is_pending(&self, locale: &str) -> bool {
        let Some(working) = self.working.get(locale) else {
            return false;
        };
        if working.id().is_none() && working.has_content() {
            return true;
        }
        match self.synced.get(locale) {
            Some(synced) => !working.same_content(synced),
            None => working.has_content(),
        }
    }

    /// Every pending locale, in display order.
    pub fn pending_locales(&self) -> Vec<String> {
        self.locales()
            .into_iter()
            .filter(|locale| self.is_pending(locale))
            .collect()
    }

    /// Copy every field of `source` into `target`. The target keeps its
    /// identity and locale.
    pub fn apply_mirror(&mut self, source: &str, target: &str) -> Result<(), CoreError> {
        let source_record = self
            .working
            .get(source)
            .cloned()
            .ok_or_else(|| CoreError::UnknownLocale(source.to_string()))?;
        let target_record = self.working_mut(target)?;
        target_record.copy_fields_from(&source_record);
        Ok(())
    }

    /// Mirror the primary locale into `target`.
    pub fn mirror_primary(&mut self, target: &str) -> Result<(), CoreError> {
        let primary = self
            .primary
            .clone()
            .ok_or(CoreError::NoPrimaryLocale)?;
        self.apply_mirror(&primary, target)
    }

    /// Overwrite only the supplied fields of `target`.
    pub fn apply_translation(
        &mut self,
        target: &str,
        values: &BTreeMap<LocalizationField, String>,
    ) -> Result<(), CoreError> {
        let record = self.working_mut(target)?;
        for (field, value) in values {
            record.set_unchecked(*field, Some(value.clone()));
        }
        Ok(())
    }

    /// A direct edit of one field, rejected when over the field's limit.
    pub fn set_field(
        &mut self,
        locale: &str,
        field: LocalizationField,
        value: Option<String>,
    ) -> Result<(), CoreError> {
        self.working_mut(locale)?.set(field, value)
    }

    /// Add an empty locale the server doesn't know yet.
    ///
    /// The record becomes pending once it has content and is created on the
    /// next synchronization.
    pub fn add_locale(&mut self, locale: &str) -> Result<(), CoreError> {
        if self.working.contains_key(locale) {
            return Err(CoreError::DuplicateLocale(locale.to_string()));
        }
        let record = EditableRecord::new(locale);
        self.synced.insert(locale.to_string(), record.clone());
        self.working.insert(locale.to_string(), record);
        if self.primary.is_none() {
            self.primary = Some(locale.to_string());
        }
        Ok(())
    }

    /// Working copies to submit: pending and with content, in display order.
    ///
    /// Pending records without content stay pending and are left out.
    pub fn submission_batch(&self) -> Vec<EditableRecord> {
        self.pending_locales()
            .into_iter()
            .filter_map(|locale| self.working.get(&locale))
            .filter(|record| record.has_content())
            .cloned()
            .collect()
    }

    /// The fields to send for a locale: everything for a record without
    /// identity, otherwise only what differs from the snapshot.
    pub fn changes(&self, locale: &str) -> Result<LocalizationFields, CoreError> {
        let working = self
            .working
            .get(locale)
            .ok_or_else(|| CoreError::UnknownLocale(locale.to_string()))?;
        let base = match (working.id(), self.synced.get(locale)) {
            (Some(_), Some(synced)) => synced.clone(),
            _ => EditableRecord::new(locale),
        };
        Ok(working.changes_from(&base))
    }

    /// Record a successful submission: adopt the server identity (if given)
    /// and make the working copy the new snapshot.
    pub fn mark_synced(&mut self, locale: &str, id: Option<String>) -> Result<(), CoreError> {
        let record = self.working_mut(locale)?;
        if let Some(id) = id {
            record.assign_id(id);
        }
        let snapshot = record.clone();
        self.synced.insert(locale.to_string(), snapshot);
        Ok(())
    }

    fn working_mut(&mut self, locale: &str) -> Result<&mut EditableRecord, CoreError> {
        self.working
            .get_mut(locale)
            .ok_or_else(|| CoreError::UnknownLocale(locale.to_string()))
    }
}
