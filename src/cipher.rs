// src/cipher.rs
//! Cipher resolution — one strategy per call, built from fresh key material
//!
//! Precedence: asymmetric wins whenever either key path is configured; a
//! symmetric key present at the same time is ignored with a warning, never
//! combined. The two strategies are never mixed within one encode/decode.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::Oaep;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{KeyMaterial, KeySource};
use crate::consts::{NONCE_LEN, SYMMETRIC_KEY_LEN};
use crate::error::{Error, Result};
use crate::keys::{load_asymmetric_key, AsymmetricKey, KeyHalf};

/// OAEP parameters for the asymmetric strategy: SHA-256 for both the OAEP
/// digest and the MGF1 mask function, no label. Fixed for the lifetime of a
/// key; there is no cross-version negotiation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OaepParams;

impl OaepParams {
    fn padding(self) -> Oaep {
        Oaep::new::<Sha256>()
    }
}

/// Post-resolution decryption failure.
///
/// A wrong key, a rotated key and a corrupted payload are indistinguishable
/// here; the codec collapses this into
/// [`Error::CredentialsUndecryptable`] with the record's namespace attached.
#[derive(Debug, Error)]
#[error("decryption failed: {detail}")]
pub struct DecryptFailure {
    detail: String,
}

impl DecryptFailure {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// AES-256-GCM cipher built from the configured symmetric key string.
pub struct SymmetricCipher {
    aead: Aes256Gcm,
}

impl std::fmt::Debug for SymmetricCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricCipher").finish_non_exhaustive()
    }
}

impl SymmetricCipher {
    /// The key string is standard base64 of exactly
    /// [`SYMMETRIC_KEY_LEN`] bytes. An absent key reports through the same
    /// error kind as a malformed one.
    fn from_key(key: Option<&str>) -> Result<Self> {
        let key = key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::SymmetricKeyInvalid {
                reason: "key is not set".into(),
            })?;
        let bytes = Zeroizing::new(STANDARD.decode(key).map_err(|err| {
            Error::SymmetricKeyInvalid {
                reason: format!("not valid base64: {err}"),
            }
        })?);
        if bytes.len() != SYMMETRIC_KEY_LEN {
            return Err(Error::SymmetricKeyInvalid {
                reason: format!("expected {SYMMETRIC_KEY_LEN} bytes, got {}", bytes.len()),
            });
        }
        let aead = Aes256Gcm::new_from_slice(&bytes).map_err(|err| Error::SymmetricKeyInvalid {
            reason: err.to_string(),
        })?;
        Ok(Self { aead })
    }

    /// Fresh random nonce per call, prepended to the ciphertext.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let ciphertext = self
            .aead
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|err| Error::EncryptionFailed(err.to_string()))?;
        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, data: &[u8]) -> std::result::Result<Vec<u8>, DecryptFailure> {
        if data.len() < NONCE_LEN {
            return Err(DecryptFailure::new("ciphertext shorter than nonce"));
        }
        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        self.aead
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| DecryptFailure::new("authentication failed"))
    }
}

/// The outcome of one resolution: exactly one strategy, plus the padding
/// parameters the asymmetric operations need.
///
/// Owned by the call that resolved it and discarded at the end — never
/// cached, since configuration may change between calls.
#[derive(Debug)]
pub enum ResolvedCipher {
    Symmetric(SymmetricCipher),
    Asymmetric {
        key: AsymmetricKey,
        padding: OaepParams,
    },
}

impl ResolvedCipher {
    pub fn is_symmetric(&self) -> bool {
        matches!(self, ResolvedCipher::Symmetric(_))
    }

    pub fn is_asymmetric(&self) -> bool {
        matches!(self, ResolvedCipher::Asymmetric { .. })
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        match self {
            ResolvedCipher::Symmetric(cipher) => cipher.encrypt(plaintext),
            ResolvedCipher::Asymmetric {
                key: AsymmetricKey::Public(key),
                padding,
            } => key
                .encrypt(&mut OsRng, padding.padding(), plaintext)
                .map_err(|err| Error::EncryptionFailed(err.to_string())),
            ResolvedCipher::Asymmetric {
                key: AsymmetricKey::Private(_),
                ..
            } => Err(Error::EncryptionFailed(
                "cipher was resolved for decryption".into(),
            )),
        }
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> std::result::Result<Vec<u8>, DecryptFailure> {
        match self {
            ResolvedCipher::Symmetric(cipher) => cipher.decrypt(ciphertext),
            ResolvedCipher::Asymmetric {
                key: AsymmetricKey::Private(key),
                padding,
            } => key
                .decrypt(padding.padding(), ciphertext)
                .map_err(|err| DecryptFailure::new(err.to_string())),
            ResolvedCipher::Asymmetric {
                key: AsymmetricKey::Public(_),
                ..
            } => Err(DecryptFailure::new("cipher was resolved for encryption")),
        }
    }
}

/// Select and construct the cipher for one encode/decode call.
pub fn resolve_cipher<S: KeySource>(source: &S, for_decryption: bool) -> Result<ResolvedCipher> {
    let material = source.key_material()?;
    if material.has_asymmetric() {
        if material.symmetric_key.is_some() {
            tracing::warn!(
                "both symmetric and asymmetric keys are set, \
                 defaulting to asymmetric encryption"
            );
        }
        return resolve_asymmetric(&material, for_decryption);
    }
    SymmetricCipher::from_key(material.symmetric_key.as_deref()).map(ResolvedCipher::Symmetric)
}

fn resolve_asymmetric(material: &KeyMaterial, for_decryption: bool) -> Result<ResolvedCipher> {
    let (path, half) = if for_decryption {
        (
            material
                .private_key_path
                .as_deref()
                .ok_or(Error::PrivateKeyMissing)?,
            KeyHalf::Private,
        )
    } else {
        (
            material
                .public_key_path
                .as_deref()
                .ok_or(Error::PublicKeyMissing)?,
            KeyHalf::Public,
        )
    };
    let key = load_asymmetric_key(path, half)?;
    Ok(ResolvedCipher::Asymmetric {
        key,
        padding: OaepParams,
    })
}
