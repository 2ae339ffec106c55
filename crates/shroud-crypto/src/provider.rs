// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`AeadCipher`]: the concrete [`SecretCipher`] implementation.
//!
//! A blob is the URL-safe base64 encoding of a sealed payload
//! (`nonce || ciphertext || tag`, see [`cipher`]) over the JSON serialization
//! of the placeholder mapping.
//!
//! Decryption of a foreign, truncated, or tampered blob yields `Ok(None)`,
//! never an error: the vault's load path continues with no recovered secrets
//! rather than failing the whole task.
//!
//! [`cipher`]: crate::cipher

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use secrecy::SecretString;
use shroud_config::CryptoConfig;
use shroud_core::{SecretCipher, SecretMap, ShroudError};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher;
use crate::keysource;

/// AES-256-GCM cipher over JSON-serialized placeholder mappings.
///
/// Holds the 32-byte key in memory only, zeroed on drop. Constructed
/// explicitly and injected into the vault; there is no process-wide default
/// instance.
pub struct AeadCipher {
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for AeadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AeadCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl AeadCipher {
    /// Build a cipher from raw key material.
    pub fn new(key: Zeroizing<[u8; 32]>) -> Self {
        Self { key }
    }

    /// Build a cipher from the environment variable named in `config`.
    pub fn from_env(config: &CryptoConfig) -> Result<Self, ShroudError> {
        let key = keysource::key_from_env(&config.key_env_var)?;
        Ok(Self::new(key))
    }

    /// Build a cipher from a passphrase and salt via Argon2id.
    pub fn from_passphrase(
        passphrase: &SecretString,
        salt: &[u8; 16],
        config: &CryptoConfig,
    ) -> Result<Self, ShroudError> {
        let key = keysource::key_from_passphrase(passphrase, salt, config)?;
        Ok(Self::new(key))
    }
}

impl SecretCipher for AeadCipher {
    fn encrypt_data(&self, data: &SecretMap) -> Result<String, ShroudError> {
        let payload = serde_json::to_vec(data)
            .map_err(|e| ShroudError::Encryption(format!("failed to serialize mapping: {e}")))?;

        let sealed = cipher::seal_payload(&self.key, &payload)?;
        Ok(URL_SAFE.encode(sealed))
    }

    fn decrypt_data(&self, blob: &str) -> Result<Option<SecretMap>, ShroudError> {
        let Ok(sealed) = URL_SAFE.decode(blob.trim()) else {
            debug!("blob is not valid base64, treating as unreadable");
            return Ok(None);
        };

        let Ok(payload) = cipher::open_payload(&self.key, &sealed) else {
            debug!("blob failed authentication, treating as unreadable");
            return Ok(None);
        };

        match serde_json::from_slice::<SecretMap>(&payload) {
            Ok(map) => Ok(Some(map)),
            Err(_) => {
                debug!("decrypted payload is not a placeholder mapping, treating as unreadable");
                Ok(None)
            }
        }
    }
}
