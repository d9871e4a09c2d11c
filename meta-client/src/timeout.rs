//! Deadlines for long-running operations.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::ClientError;

/// Deadline for loading a version's localizations.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Race `operation` against a timer.
///
/// Whichever finishes first wins. When the timer wins, the operation is
/// dropped (cancelled at its next suspension point) and the result is
/// [`ClientError::Timeout`].
pub async fn with_timeout<F, R>(duration: Duration, operation: F) -> Result<R, ClientError>
where
    F: Future<Output = Result<R, ClientError>>,
{
    match tokio::time::timeout(duration, operation).await {
        Ok(result) => result,
        Err(_) => {
            warn!(?duration, "operation timed out");
            Err(ClientError::Timeout)
        }
    }
}
