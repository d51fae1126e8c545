// src/lib.rs
//! credential-keychain — encryption core for account credentials at rest
//!
//! Features:
//! - AES-256-GCM symmetric or RSA-OAEP(SHA-256) asymmetric encryption,
//!   selected per call from freshly read key material
//! - PEM key-file loading with precise failure modes
//! - base64-framed opaque blobs handed to an external record store
//! - per-namespace validation of credential JSON before encryption

pub mod cipher;
pub mod codec;
pub mod config;
pub mod consts;
pub mod error;
pub mod keychain;
pub mod keys;
pub mod validate;

// Re-export everything users need at the crate root
pub use cipher::{resolve_cipher, DecryptFailure, OaepParams, ResolvedCipher, SymmetricCipher};
pub use codec::{decode, encode};
pub use config::{EnvKeySource, FileKeySource, KeyMaterial, KeySource, StaticKeySource};
pub use error::{Error, Result};
pub use keychain::Keychain;
pub use keys::{load_asymmetric_key, AsymmetricKey, KeyHalf};
pub use validate::{NamespaceValidator, ValidatorRegistry};
