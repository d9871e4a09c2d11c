//! SyncEngine - one editing session of a store version.
//!
//! The engine owns the pure [`SyncState`] from meta-core plus the remote
//! collaborator. Edits are local until [`SyncEngine::synchronize`] submits
//! every pending record that has content.
//!
//! ```text
//! operator edits → SyncState (working vs snapshot)
//!                      ↓ submission batch
//!              SyncEngine::synchronize → RemoteLocalizations → API
//!                      ↓ per-record results
//!                  SyncReport
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut engine = SyncEngine::new(service, "version-id");
//! engine.load_remote(app.attributes.primary_locale.as_deref()).await?;
//! engine.mirror_primary("fr-FR")?;
//! let report = engine.synchronize(|p| println!("{}/{} {}", p.completed, p.total, p.locale)).await;
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use storemeta_core::{
    CoreError, EditableRecord, ProgressCounter, SyncProgress, SyncReport, SyncState,
};
use storemeta_types::{LocalizationField, LocalizationFields, VersionLocalization};
use tracing::{debug, info, warn};

use crate::service::RemoteLocalizations;
use crate::timeout::{with_timeout, DEFAULT_LOAD_TIMEOUT};
use crate::translate::{limits_for, Translator};
use crate::ClientError;

/// Default number of records submitted concurrently.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Edits and synchronizes the localizations of one store version.
pub struct SyncEngine<R: RemoteLocalizations> {
    remote: R,
    version_id: String,
    state: SyncState,
    max_in_flight: usize,
    load_timeout: Duration,
}

impl<R: RemoteLocalizations> SyncEngine<R> {
    /// An engine for `version_id` with nothing loaded.
    pub fn new(remote: R, version_id: impl Into<String>) -> Self {
        Self {
            remote,
            version_id: version_id.into(),
            state: SyncState::new(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Limit concurrent submissions (at least one).
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Deadline for [`Self::load_remote`].
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// The version being edited.
    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    /// Read access to the working set and snapshots.
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// The remote collaborator.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Replace the working set with `records` (in server order).
    pub fn load(
        &mut self,
        records: Vec<EditableRecord>,
        primary_hint: Option<&str>,
    ) -> Result<(), ClientError> {
        self.state.load(records, primary_hint)?;
        debug!(
            version_id = %self.version_id,
            locales = self.state.len(),
            primary = ?self.state.primary_locale(),
            "loaded localizations"
        );
        Ok(())
    }

    /// Fetch every localization of the version and load it, within the
    /// load deadline. Returns the number of locales loaded.
    pub async fn load_remote(&mut self, primary_hint: Option<&str>) -> Result<usize, ClientError> {
        let remote: Vec<VersionLocalization> = with_timeout(
            self.load_timeout,
            self.remote.fetch_localizations(&self.version_id),
        )
        .await?;
        let records = remote.into_iter().map(EditableRecord::from).collect();
        self.load(records, primary_hint)?;
        Ok(self.state.len())
    }

    /// Whether a locale has unsubmitted changes.
    pub fn is_pending(&self, locale: &str) -> bool {
        self.state.is_pending(locale)
    }

    /// Copy every field of `source` into `target`.
    pub fn apply_mirror(&mut self, source: &str, target: &str) -> Result<(), ClientError> {
        Ok(self.state.apply_mirror(source, target)?)
    }

    /// Copy the primary locale into `target`.
    pub fn mirror_primary(&mut self, target: &str) -> Result<(), ClientError> {
        Ok(self.state.mirror_primary(target)?)
    }

    /// Overwrite only the supplied fields of `target`.
    pub fn apply_translation(
        &mut self,
        target: &str,
        values: &BTreeMap<LocalizationField, String>,
    ) -> Result<(), ClientError> {
        Ok(self.state.apply_translation(target, values)?)
    }

    /// Edit one field directly.
    pub fn set_field(
        &mut self,
        locale: &str,
        field: LocalizationField,
        value: Option<String>,
    ) -> Result<(), ClientError> {
        Ok(self.state.set_field(locale, field, value)?)
    }

    /// Add a locale the server doesn't have yet.
    pub fn add_locale(&mut self, locale: &str) -> Result<(), ClientError> {
        Ok(self.state.add_locale(locale)?)
    }

    /// Translate the primary locale's non-empty `fields` into `target` and
    /// apply the result.
    pub async fn translate_from_primary(
        &mut self,
        translator: &dyn Translator,
        target: &str,
        fields: &[LocalizationField],
    ) -> Result<(), ClientError> {
        let primary = self
            .state
            .primary_locale()
            .ok_or(CoreError::NoPrimaryLocale)?
            .to_string();
        if primary == target {
            return Err(CoreError::PrimaryTarget(primary).into());
        }
        if self.state.record(target).is_none() {
            return Err(CoreError::UnknownLocale(target.to_string()).into());
        }
        let source = self
            .state
            .record(&primary)
            .ok_or_else(|| CoreError::UnknownLocale(primary.clone()))?;

        let request: BTreeMap<LocalizationField, String> = fields
            .iter()
            .filter_map(|field| source.get(*field).map(|v| (*field, v.to_string())))
            .collect();
        if request.is_empty() {
            debug!(%primary, target, "nothing to translate");
            return Ok(());
        }

        let limits = limits_for(request.keys());
        let translated = translator
            .translate_fields(&request, &limits, &primary, target)
            .await?;
        info!(%primary, target, fields = translated.len(), "applying translation");
        self.apply_translation(target, &translated)
    }

    /// Submit every pending record with content.
    ///
    /// Records are submitted independently, at most `max_in_flight` at a
    /// time. Successes become the new snapshot; failures stay pending and
    /// are listed in the report. `progress` is called once per finished
    /// record with a strictly increasing counter.
    pub async fn synchronize<F>(&mut self, mut progress: F) -> SyncReport
    where
        F: FnMut(SyncProgress),
    {
        let batch = self.state.submission_batch();
        let total = batch.len();
        let mut report = SyncReport::new(total);
        if total == 0 {
            info!(version_id = %self.version_id, "nothing to synchronize");
            return report;
        }
        info!(version_id = %self.version_id, total, "synchronizing localizations");

        let jobs: Vec<(String, Option<String>, LocalizationFields)> = batch
            .iter()
            .map(|record| {
                let fields = self
                    .state
                    .changes(record.locale())
                    .unwrap_or_else(|_| record.fields().clone());
                (
                    record.locale().to_string(),
                    record.id().map(str::to_string),
                    fields,
                )
            })
            .collect();

        let remote = &self.remote;
        let version_id = self.version_id.as_str();
        let mut results = stream::iter(jobs.into_iter().map(|(locale, id, fields)| async move {
            let result = match id {
                Some(id) => remote.update_localization(&id, fields).await,
                None => remote.create_localization(version_id, &locale, fields).await,
            };
            (locale, result)
        }))
        .buffer_unordered(self.max_in_flight);

        let mut counter = ProgressCounter::new(total);
        while let Some((locale, result)) = results.next().await {
            match result {
                Ok(saved) => match self.state.mark_synced(&locale, Some(saved.id)) {
                    Ok(()) => {
                        debug!(%locale, "localization synchronized");
                        report.record_success(locale.as_str());
                    }
                    Err(e) => report.record_failure(locale.as_str(), e.to_string()),
                },
                Err(e) => {
                    warn!(%locale, error = %e, "localization failed to synchronize");
                    report.record_failure(locale.as_str(), e.to_string());
                }
            }
            progress(counter.advance(locale));
        }

        report.sort();
        info!(
            version_id = %self.version_id,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "synchronization finished"
        );
        report
    }
}
