// src/codec.rs
//! Credential encode/decode — the operations the record store calls

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::cipher::resolve_cipher;
use crate::config::KeySource;
use crate::error::{Error, Result};

/// Encrypt plaintext credentials and wrap the ciphertext in base64 framing.
///
/// Empty plaintext encodes as the empty string rather than failing. Beyond
/// cipher resolution (and the RSA-OAEP payload size limit) there is no
/// failure path of its own.
pub fn encode<S: KeySource>(source: &S, plaintext: &str) -> Result<Vec<u8>> {
    let cipher = resolve_cipher(source, false)?;
    let ciphertext = cipher.encrypt(plaintext.as_bytes())?;
    Ok(STANDARD.encode(ciphertext).into_bytes())
}

/// Un-frame and decrypt an opaque credential blob back to UTF-8 text.
///
/// Malformed framing, a wrong or rotated key and a corrupted payload are one
/// failure class: [`Error::CredentialsUndecryptable`], tagged with the
/// record's namespace for operator diagnosis. The low-level detail only goes
/// to the debug log.
pub fn decode<S: KeySource>(source: &S, namespace: &str, framed: &[u8]) -> Result<String> {
    let cipher = resolve_cipher(source, true)?;
    let ciphertext = STANDARD
        .decode(framed)
        .map_err(|err| undecryptable(namespace, err))?;
    let plaintext = cipher
        .decrypt(&ciphertext)
        .map_err(|err| undecryptable(namespace, err))?;
    String::from_utf8(plaintext).map_err(|err| undecryptable(namespace, err))
}

fn undecryptable(namespace: &str, detail: impl std::fmt::Display) -> Error {
    tracing::debug!(namespace, %detail, "credential decode failed");
    Error::CredentialsUndecryptable {
        namespace: namespace.to_string(),
    }
}
