//! Client errors.

use storemeta_core::CoreError;
use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;
use crate::transport::TransportError;

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The server rejected the credentials, even after re-minting the token.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered with a non-2xx status other than 401.
    #[error("server error: HTTP {0}")]
    ServerError(u16),

    /// The response body did not have the expected shape.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// The request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Transport fault.
    #[error("unknown error: {0}")]
    Unknown(#[from] TransportError),

    /// The operation did not finish before its deadline.
    #[error("operation timed out")]
    Timeout,

    /// Credential store error.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Local edit rejected.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The translation collaborator failed.
    #[error("translation failed: {0}")]
    Translation(String),
}
