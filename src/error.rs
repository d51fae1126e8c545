// src/error.rs
//! Public error type for the entire crate
//!
//! Every variant is user- or operator-visible; none are transient, so
//! nothing here is retried. Callers wanting retry/backoff build it above
//! this layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::keys::KeyHalf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {key_type} key file `{}`: {source}", path.display())]
    KeyFileUnreadable {
        key_type: KeyHalf,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing or invalid {key_type} key `{}`: {reason}", path.display())]
    KeyFileInvalid {
        key_type: KeyHalf,
        path: PathBuf,
        reason: String,
    },

    #[error("missing or invalid symmetric key: {reason}")]
    SymmetricKeyInvalid { reason: String },

    #[error("private key is not set, unable to decode credentials")]
    PrivateKeyMissing,

    #[error("public key is not set, unable to encode credentials")]
    PublicKeyMissing,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error(
        "credentials have been encrypted with a different key; unless you can \
         recover the previous key, they are unreadable (keychain: {namespace})"
    )]
    CredentialsUndecryptable { namespace: String },

    #[error("credentials should be valid JSON")]
    CredentialsNotJson(#[source] serde_json::Error),

    #[error("credentials not valid (keychain: {namespace})")]
    CredentialsInvalid { namespace: String },

    #[error("no validator registered for namespace `{0}`")]
    UnknownNamespace(String),

    #[error("cannot read config file `{}`: {source}", path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file `{}`: {source}", path.display())]
    ConfigInvalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
