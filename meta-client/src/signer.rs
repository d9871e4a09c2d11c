//! ES256 signing of token input.
//!
//! The signer turns `header.claims` into a raw P-256 ECDSA signature
//! (64 bytes, `r || s`). It never touches disk or network.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::{Algorithm, EncodingKey};
use thiserror::Error;

/// Signature length of ES256 in fixed (`r || s`) encoding.
pub const SIGNATURE_LEN: usize = 64;

/// Signer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    /// The key is not a usable P-256 private key.
    #[error("invalid private key: {0}")]
    InvalidKey(String),
}

/// Produces ES256 signatures.
pub trait Signer: Send + Sync {
    /// Sign `signing_input` with a PEM-encoded P-256 PKCS#8 private key.
    fn sign(&self, signing_input: &[u8], private_key_pem: &str) -> Result<Vec<u8>, SignerError>;
}

/// [`Signer`] backed by `jsonwebtoken`'s ES256 primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Es256Signer;

impl Signer for Es256Signer {
    fn sign(&self, signing_input: &[u8], private_key_pem: &str) -> Result<Vec<u8>, SignerError> {
        let key = EncodingKey::from_ec_pem(private_key_pem.as_bytes())
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;

        // Curve mismatches surface here rather than at PEM parsing.
        let encoded = jsonwebtoken::crypto::sign(signing_input, &key, Algorithm::ES256)
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;

        let signature = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        if signature.len() != SIGNATURE_LEN {
            return Err(SignerError::InvalidKey(format!(
                "unexpected signature length {}",
                signature.len()
            )));
        }
        Ok(signature)
    }
}
