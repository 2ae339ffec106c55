// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cipher key acquisition.
//!
//! Two sources, in order of preference:
//! 1. An environment variable (named by `crypto.key_env_var`) holding a
//!    URL-safe-base64 encoded 32-byte key, for headless/Docker/systemd.
//! 2. An explicit passphrase, stretched through Argon2id with a caller-held
//!    salt.
//!
//! A missing or malformed key source is a hard configuration error. There is
//! no built-in fallback key.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use secrecy::{ExposeSecret, SecretString};
use shroud_config::CryptoConfig;
use shroud_core::ShroudError;
use zeroize::Zeroizing;

use crate::cipher;
use crate::kdf;

/// Read a 32-byte cipher key from the environment variable `var_name`.
///
/// The value must be URL-safe base64 and decode to exactly 32 bytes.
pub fn key_from_env(var_name: &str) -> Result<Zeroizing<[u8; 32]>, ShroudError> {
    let encoded = match std::env::var(var_name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            return Err(ShroudError::Config(format!(
                "no cipher key found: set {var_name} to a URL-safe base64 32-byte key \
                 (generate one with shroud_crypto::generate_encoded_key)"
            )));
        }
    };

    let decoded = URL_SAFE
        .decode(encoded.trim())
        .map_err(|e| ShroudError::Config(format!("{var_name} is not valid base64: {e}")))?;

    let key: [u8; 32] = decoded.try_into().map_err(|v: Vec<u8>| {
        ShroudError::Config(format!(
            "{var_name} must decode to 32 bytes, got {}",
            v.len()
        ))
    })?;

    Ok(Zeroizing::new(key))
}

/// Derive a 32-byte cipher key from a passphrase and salt via Argon2id.
///
/// The salt is caller-held: the same (passphrase, salt) pair must be supplied
/// to decrypt blobs produced earlier.
pub fn key_from_passphrase(
    passphrase: &SecretString,
    salt: &[u8; kdf::SALT_LEN],
    config: &CryptoConfig,
) -> Result<Zeroizing<[u8; 32]>, ShroudError> {
    if passphrase.expose_secret().is_empty() {
        return Err(ShroudError::Config(
            "empty passphrase not allowed".to_string(),
        ));
    }
    kdf::derive_key(passphrase.expose_secret().as_bytes(), salt, config)
}

/// Generate a fresh random key, URL-safe base64 encoded, ready to be placed
/// in the key environment variable.
pub fn generate_encoded_key() -> Result<String, ShroudError> {
    let key = cipher::generate_key()?;
    Ok(URL_SAFE.encode(&*key))
}
