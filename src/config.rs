// src/config.rs
//! Key material sources — read fresh on every cipher resolution
//!
//! Nothing here is cached. Configuration may change between calls, so each
//! encode/decode re-reads whatever is currently configured; concurrent
//! callers never share a cipher and never observe a torn key swap.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::consts::{KEYCHAIN_KEY, KEYCHAIN_PRIVATE_KEY, KEYCHAIN_PUBLIC_KEY};
use crate::error::{Error, Result};

/// Key material currently configured for the process.
///
/// At most one strategy is used per call: if either asymmetric path is set
/// it wins over a simultaneously configured symmetric key (see
/// [`resolve_cipher`](crate::cipher::resolve_cipher)).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMaterial {
    pub symmetric_key: Option<String>,
    pub private_key_path: Option<PathBuf>,
    pub public_key_path: Option<PathBuf>,
}

impl KeyMaterial {
    /// True when either asymmetric key path is configured.
    pub fn has_asymmetric(&self) -> bool {
        self.private_key_path.is_some() || self.public_key_path.is_some()
    }
}

/// Where the cipher resolver reads key material from.
///
/// Implementations must not validate the values; the loader and the cipher
/// constructors own that, with their precise error kinds.
pub trait KeySource {
    fn key_material(&self) -> Result<KeyMaterial>;
}

/// Reads `KEYCHAIN_KEY`, `KEYCHAIN_PRIVATE_KEY` and `KEYCHAIN_PUBLIC_KEY`
/// from the environment. Empty values count as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvKeySource;

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

impl KeySource for EnvKeySource {
    fn key_material(&self) -> Result<KeyMaterial> {
        Ok(KeyMaterial {
            symmetric_key: env_value(KEYCHAIN_KEY),
            private_key_path: env_value(KEYCHAIN_PRIVATE_KEY).map(PathBuf::from),
            public_key_path: env_value(KEYCHAIN_PUBLIC_KEY).map(PathBuf::from),
        })
    }
}

/// Fixed key material, handed in by the embedding application or a test.
#[derive(Debug, Clone, Default)]
pub struct StaticKeySource(pub KeyMaterial);

impl KeySource for StaticKeySource {
    fn key_material(&self) -> Result<KeyMaterial> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    keys: KeysSection,
}

#[derive(Debug, Default, Deserialize)]
struct KeysSection {
    symmetric_key: Option<String>,
    private_key_path: Option<PathBuf>,
    public_key_path: Option<PathBuf>,
}

/// TOML-backed key source.
///
/// The file is re-read on every resolution, so a live edit is picked up by
/// the next encode/decode without restarting the process.
///
/// ```toml
/// [keys]
/// symmetric_key = "…base64…"
/// private_key_path = "/etc/keychain/private.pem"
/// public_key_path = "/etc/keychain/public.pem"
/// ```
#[derive(Debug, Clone)]
pub struct FileKeySource {
    path: PathBuf,
}

impl FileKeySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeySource for FileKeySource {
    fn key_material(&self) -> Result<KeyMaterial> {
        let content = fs::read_to_string(&self.path).map_err(|source| Error::ConfigUnreadable {
            path: self.path.clone(),
            source,
        })?;
        let parsed: FileConfig = toml::from_str(&content).map_err(|source| Error::ConfigInvalid {
            path: self.path.clone(),
            source,
        })?;
        Ok(KeyMaterial {
            symmetric_key: parsed.keys.symmetric_key.filter(|key| !key.is_empty()),
            private_key_path: parsed.keys.private_key_path,
            public_key_path: parsed.keys.public_key_path,
        })
    }
}
