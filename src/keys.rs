// src/keys.rs
//! PEM key loading for the asymmetric strategy
//!
//! Passphrase-protected private keys are not supported.

use std::fmt;
use std::fs;
use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::{Error, Result};

/// Which half of the keypair is being loaded. Carried in errors for
/// operator diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHalf {
    Public,
    Private,
}

impl KeyHalf {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyHalf::Public => "public",
            KeyHalf::Private => "private",
        }
    }
}

impl fmt::Display for KeyHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed RSA key — exactly one half.
#[derive(Debug, Clone)]
pub enum AsymmetricKey {
    Public(RsaPublicKey),
    Private(RsaPrivateKey),
}

/// Load and parse a PEM key file.
///
/// Private keys parse as PKCS#8 with a PKCS#1 fallback; public keys as SPKI
/// with a PKCS#1 fallback. An unreadable path and a malformed file are
/// distinct failures.
pub fn load_asymmetric_key(path: &Path, half: KeyHalf) -> Result<AsymmetricKey> {
    let raw = fs::read(path).map_err(|source| Error::KeyFileUnreadable {
        key_type: half,
        path: path.to_path_buf(),
        source,
    })?;
    let pem = String::from_utf8(raw).map_err(|err| invalid(half, path, err))?;
    match half {
        KeyHalf::Private => RsaPrivateKey::from_pkcs8_pem(&pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&pem))
            .map(AsymmetricKey::Private)
            .map_err(|err| invalid(half, path, err)),
        KeyHalf::Public => RsaPublicKey::from_public_key_pem(&pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(&pem))
            .map(AsymmetricKey::Public)
            .map_err(|err| invalid(half, path, err)),
    }
}

fn invalid(half: KeyHalf, path: &Path, err: impl fmt::Display) -> Error {
    Error::KeyFileInvalid {
        key_type: half,
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
