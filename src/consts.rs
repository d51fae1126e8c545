// src/consts.rs
//! Shared constants — configuration keys and cipher parameters

/// Environment variable holding the base64 symmetric key
pub const KEYCHAIN_KEY: &str = "KEYCHAIN_KEY";

/// Environment variable holding the private key file path
pub const KEYCHAIN_PRIVATE_KEY: &str = "KEYCHAIN_PRIVATE_KEY";

/// Environment variable holding the public key file path
pub const KEYCHAIN_PUBLIC_KEY: &str = "KEYCHAIN_PUBLIC_KEY";

/// AES-256-GCM key length in bytes
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes, prepended to each ciphertext
pub const NONCE_LEN: usize = 12;
