// src/keychain.rs
//! Record-facing facade: parse → validate → encrypt, and the reverse

use crate::codec;
use crate::config::{EnvKeySource, KeySource};
use crate::error::{Error, Result};
use crate::validate::ValidatorRegistry;

/// Entry point the credential-record layer talks to.
///
/// Holds no cipher state; every call re-reads the key source.
pub struct Keychain<S = EnvKeySource> {
    source: S,
    validators: ValidatorRegistry,
}

impl Keychain<EnvKeySource> {
    /// Keychain backed by the `KEYCHAIN_*` environment variables.
    pub fn from_env(validators: ValidatorRegistry) -> Self {
        Self::new(EnvKeySource, validators)
    }
}

impl<S: KeySource> Keychain<S> {
    pub fn new(source: S, validators: ValidatorRegistry) -> Self {
        Self { source, validators }
    }

    /// Validate and encrypt raw credential text for one record.
    ///
    /// Empty input means "no change" and returns `Ok(None)`; the caller
    /// keeps whatever blob it already stores. Validation runs before any
    /// cipher resolution, so rejected input never produces ciphertext. On
    /// success the encrypted blob covers the input text exactly as given,
    /// not a re-serialization.
    pub fn set_credentials(&self, namespace: &str, input: &str) -> Result<Option<Vec<u8>>> {
        if input.is_empty() {
            return Ok(None);
        }
        let parsed = serde_json::from_str(input).map_err(Error::CredentialsNotJson)?;
        if !self.validators.validate(namespace, &parsed)? {
            return Err(Error::CredentialsInvalid {
                namespace: namespace.to_string(),
            });
        }
        codec::encode(&self.source, input).map(Some)
    }

    /// Decrypt a record's stored blob back to plaintext JSON text.
    pub fn get_credentials(&self, namespace: &str, framed: &[u8]) -> Result<String> {
        codec::decode(&self.source, namespace, framed)
    }
}
