//! # meta-client
//!
//! Client library for the App Store Connect localization metadata API.
//!
//! This is the library the `storemeta` CLI (and any other front end) uses to
//! read and edit store listing text.
//!
//! ## Features
//!
//! - **Self-minted tokens**: ES256 JWTs, renewed before expiry and re-minted once on 401
//! - **Pagination**: follows `links.next` and preserves server order
//! - **Dirty tracking**: only changed locales are submitted, with bounded concurrency
//! - **Transport Abstraction**: Pluggable transport layer (reqwest, mock)
//! - **Pure State Machine**: Uses meta-core for side-effect-free logic
//!
//! ## Example
//!
//! ```ignore
//! use storemeta_client::{
//!     Credentials, HttpClient, MetadataService, ReqwestTransport, SyncEngine, TokenAuthenticator,
//! };
//!
//! let auth = Arc::new(TokenAuthenticator::new());
//! auth.authenticate(Credentials::new(issuer, key_id, pem)).await?;
//!
//! let client = HttpClient::new(ReqwestTransport::new()?, auth);
//! let mut engine = SyncEngine::new(MetadataService::new(client), version_id);
//! engine.load_remote(None).await?;
//! engine.mirror_primary("fr-FR")?;
//! let report = engine.synchronize(|_| {}).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod engine;
pub mod error;
pub mod http;
pub mod paginator;
pub mod service;
pub mod signer;
pub mod store;
pub mod timeout;
pub mod translate;
pub mod transport;

pub use auth::{AuthError, Credentials, Token, TokenAuthenticator, TokenProvider, AUDIENCE};
pub use engine::{SyncEngine, DEFAULT_MAX_IN_FLIGHT};
pub use error::ClientError;
pub use http::{HttpClient, DEFAULT_BASE_URL};
pub use paginator::Paginator;
pub use service::{MetadataService, RemoteLocalizations};
pub use signer::{Es256Signer, Signer, SignerError};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreError};
pub use timeout::{with_timeout, DEFAULT_LOAD_TIMEOUT};
pub use translate::{MockTranslator, Translator};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, MockTransport, ReqwestTransport, Transport,
    TransportError,
};
