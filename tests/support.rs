// tests/support.rs
//! Test fixtures — RSA PEM pairs, symmetric keys, env plumbing

#![allow(dead_code)] // each test binary uses a different subset

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use credential_keychain::consts::{KEYCHAIN_KEY, KEYCHAIN_PRIVATE_KEY, KEYCHAIN_PUBLIC_KEY};
use credential_keychain::{KeyMaterial, StaticKeySource};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tempfile::TempDir;

/// Standard base64 of 32 fixed bytes — a valid AES-256-GCM key.
pub fn symmetric_key() -> String {
    STANDARD.encode(*b"0123456789abcdef0123456789abcdef")
}

/// A second, different symmetric key for mismatch tests.
pub fn other_symmetric_key() -> String {
    STANDARD.encode(*b"fedcba9876543210fedcba9876543210")
}

pub fn symmetric_source() -> StaticKeySource {
    StaticKeySource(KeyMaterial {
        symmetric_key: Some(symmetric_key()),
        ..Default::default()
    })
}

fn generate_pem_pair() -> (String, String) {
    let private = RsaPrivateKey::new(&mut rand::rngs::OsRng, 2048).expect("generate rsa key");
    let public = RsaPublicKey::from(&private);
    (
        private
            .to_pkcs8_pem(LineEnding::LF)
            .expect("encode private pem")
            .to_string(),
        public
            .to_public_key_pem(LineEnding::LF)
            .expect("encode public pem"),
    )
}

// 2048-bit keygen is slow; generate one pair per test binary.
fn pem_pair() -> &'static (String, String) {
    static PAIR: OnceLock<(String, String)> = OnceLock::new();
    PAIR.get_or_init(generate_pem_pair)
}

// Unrelated pair for key-mismatch tests.
fn other_pem_pair() -> &'static (String, String) {
    static PAIR: OnceLock<(String, String)> = OnceLock::new();
    PAIR.get_or_init(generate_pem_pair)
}

pub struct AsymmetricFixture {
    // Held so the key files outlive the fixture's sources
    pub dir: TempDir,
    pub private_pem: PathBuf,
    pub public_pem: PathBuf,
}

impl AsymmetricFixture {
    /// Key material with both halves configured.
    pub fn source(&self) -> StaticKeySource {
        StaticKeySource(KeyMaterial {
            private_key_path: Some(self.private_pem.clone()),
            public_key_path: Some(self.public_pem.clone()),
            ..Default::default()
        })
    }

    /// Only the public half — encrypt-capable, decrypt must fail.
    pub fn encrypt_only(&self) -> StaticKeySource {
        StaticKeySource(KeyMaterial {
            public_key_path: Some(self.public_pem.clone()),
            ..Default::default()
        })
    }

    /// Only the private half — decrypt-capable, encrypt must fail.
    pub fn decrypt_only(&self) -> StaticKeySource {
        StaticKeySource(KeyMaterial {
            private_key_path: Some(self.private_pem.clone()),
            ..Default::default()
        })
    }

    /// Both halves plus a symmetric key, for precedence tests.
    pub fn with_symmetric(&self) -> StaticKeySource {
        StaticKeySource(KeyMaterial {
            symmetric_key: Some(symmetric_key()),
            private_key_path: Some(self.private_pem.clone()),
            public_key_path: Some(self.public_pem.clone()),
        })
    }
}

fn write_fixture(pair: &(String, String)) -> AsymmetricFixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let private_pem = dir.path().join("private.pem");
    let public_pem = dir.path().join("public.pem");
    fs::write(&private_pem, &pair.0).expect("write private pem");
    fs::write(&public_pem, &pair.1).expect("write public pem");
    AsymmetricFixture {
        dir,
        private_pem,
        public_pem,
    }
}

pub fn asymmetric_fixture() -> AsymmetricFixture {
    write_fixture(pem_pair())
}

pub fn other_asymmetric_fixture() -> AsymmetricFixture {
    write_fixture(other_pem_pair())
}

/// Counts WARN-level events emitted while `f` runs. Just enough of a
/// [`tracing::Subscriber`] to observe the precedence warning.
struct WarnCounter(Arc<AtomicUsize>);

impl tracing::Subscriber for WarnCounter {
    fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        tracing::span::Id::from_u64(1)
    }

    fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}

    fn event(&self, event: &tracing::Event<'_>) {
        if event.metadata().level() == &tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn enter(&self, _: &tracing::span::Id) {}

    fn exit(&self, _: &tracing::span::Id) {}
}

pub fn count_warnings(f: impl FnOnce()) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    tracing::subscriber::with_default(WarnCounter(count.clone()), f);
    count.load(Ordering::SeqCst)
}

/// Clears the `KEYCHAIN_*` variables on construction and drop so env-backed
/// tests start and finish clean. Combine with `#[serial]`.
pub struct EnvGuard;

impl EnvGuard {
    pub fn clear() -> Self {
        for var in [KEYCHAIN_KEY, KEYCHAIN_PRIVATE_KEY, KEYCHAIN_PUBLIC_KEY] {
            std::env::remove_var(var);
        }
        Self
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in [KEYCHAIN_KEY, KEYCHAIN_PRIVATE_KEY, KEYCHAIN_PUBLIC_KEY] {
            std::env::remove_var(var);
        }
    }
}
