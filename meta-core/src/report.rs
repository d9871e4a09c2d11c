//! Batch submission results and progress.

use std::fmt;

/// Overall result of a synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Every submitted record succeeded (or nothing was pending).
    Success,
    /// Some records succeeded, some failed.
    PartialSuccess,
    /// Every submitted record failed.
    Failure,
}

/// What happened to one synchronization batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of records submitted.
    pub attempted: usize,
    /// Locales that were accepted.
    pub succeeded: Vec<String>,
    /// Locales that failed, with the reason.
    pub failed: Vec<(String, String)>,
}

impl SyncReport {
    /// Start a report for a batch of `attempted` records.
    pub fn new(attempted: usize) -> Self {
        Self {
            attempted,
            ..Default::default()
        }
    }

    /// Record an accepted locale.
    pub fn record_success(&mut self, locale: impl Into<String>) {
        self.succeeded.push(locale.into());
    }

    /// Record a rejected locale.
    pub fn record_failure(&mut self, locale: impl Into<String>, message: impl Into<String>) {
        self.failed.push((locale.into(), message.into()));
    }

    /// Classify the batch. An empty batch is a success.
    pub fn outcome(&self) -> SyncOutcome {
        match (self.succeeded.is_empty(), self.failed.is_empty()) {
            (_, true) => SyncOutcome::Success,
            (true, false) => SyncOutcome::Failure,
            (false, false) => SyncOutcome::PartialSuccess,
        }
    }

    /// Whether every submitted record succeeded.
    pub fn is_success(&self) -> bool {
        self.outcome() == SyncOutcome::Success
    }

    /// Locales that failed, without messages.
    pub fn failed_locales(&self) -> Vec<&str> {
        self.failed.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Sort successes and failures by locale.
    ///
    /// Results arrive in completion order; callers that display them want a
    /// stable order.
    pub fn sort(&mut self) {
        self.succeeded.sort();
        self.failed.sort();
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome() {
            SyncOutcome::Success if self.attempted == 0 => write!(f, "nothing to synchronize"),
            SyncOutcome::Success => write!(f, "synchronized {} locale(s)", self.succeeded.len()),
            SyncOutcome::PartialSuccess => write!(
                f,
                "synchronized {} of {} locale(s); failed: {}",
                self.succeeded.len(),
                self.attempted,
                self.failed_locales().join(", ")
            ),
            SyncOutcome::Failure => write!(
                f,
                "all {} locale(s) failed: {}",
                self.attempted,
                self.failed_locales().join(", ")
            ),
        }
    }
}

/// One progress notification: `completed` of `total` records are done, the
/// latest being `locale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncProgress {
    /// Records finished so far, including this one.
    pub completed: usize,
    /// Records in the batch.
    pub total: usize,
    /// Locale that just finished.
    pub locale: String,
}

/// Hands out strictly increasing progress counters.
#[derive(Debug, Clone)]
pub struct ProgressCounter {
    completed: usize,
    total: usize,
}

impl ProgressCounter {
    /// A counter for a batch of `total` records.
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    /// Count one more finished record.
    pub fn advance(&mut self, locale: impl Into<String>) -> SyncProgress {
        self.completed = (self.completed + 1).min(self.total);
        SyncProgress {
            completed: self.completed,
            total: self.total,
            locale: locale.into(),
        }
    }

    /// Records finished so far.
    pub fn completed(&self) -> usize {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_success() {
        let report = SyncReport::new(0);
        assert_eq!(report.outcome(), SyncOutcome::Success);
        assert_eq!(report.to_string(), "nothing to synchronize");
    }

    #[test]
    fn mixed_results_are_partial_success() {
        let mut report = SyncReport::new(2);
        report.record_success("en-US");
        report.record_failure("de-DE", "server error: 409");
        assert_eq!(report.outcome(), SyncOutcome::PartialSuccess);
        assert_eq!(report.failed_locales(), vec!["de-DE"]);
        assert_eq!(
            report.to_string(),
            "synchronized 1 of 2 locale(s); failed: de-DE"
        );
    }

    #[test]
    fn all_failed_is_failure() {
        let mut report = SyncReport::new(1);
        report.record_failure("ja", "timeout");
        assert_eq!(report.outcome(), SyncOutcome::Failure);
        assert!(!report.is_success());
    }

    #[test]
    fn sort_orders_by_locale() {
        let mut report = SyncReport::new(3);
        report.record_success("fr-FR");
        report.record_success("de-DE");
        report.record_failure("ja", "x");
        report.sort();
        assert_eq!(report.succeeded, vec!["de-DE", "fr-FR"]);
    }

    #[test]
    fn progress_is_monotonic() {
        let mut counter = ProgressCounter::new(3);
        let seen: Vec<usize> = ["a", "b", "c"]
            .iter()
            .map(|l| counter.advance(*l).completed)
            .collect();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(counter.completed(), 3);
    }

    #[test]
    fn progress_carries_locale_and_total() {
        let mut counter = ProgressCounter::new(2);
        let event = counter.advance("it");
        assert_eq!(
            event,
            SyncProgress {
                completed: 1,
                total: 2,
                locale: "it".into()
            }
        );
    }
}
