// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The cipher trait the vault depends on for encrypted persistence.

use crate::error::ShroudError;
use crate::types::SecretMap;

/// Encrypts and decrypts serialized placeholder mappings.
///
/// Implementations must round-trip: for any mapping `m` and a cipher holding
/// the same key material, `decrypt_data(&encrypt_data(&m)?)` yields
/// `Ok(Some(m))`. A blob that was produced by a different key, or that has
/// been tampered with, must yield `Ok(None)` rather than an error -- the
/// vault's load path treats an unreadable blob as "no secrets recovered" and
/// continues.
///
/// Ciphers are injected into the vault at construction time. There is no
/// process-wide default instance.
pub trait SecretCipher: Send + Sync {
    /// Serialize and encrypt a placeholder mapping into an opaque string.
    fn encrypt_data(&self, data: &SecretMap) -> Result<String, ShroudError>;

    /// Decrypt and deserialize a blob previously produced by [`encrypt_data`].
    ///
    /// Returns `Ok(None)` for a foreign, corrupt, or tampered blob.
    ///
    /// [`encrypt_data`]: SecretCipher::encrypt_data
    fn decrypt_data(&self, blob: &str) -> Result<Option<SecretMap>, ShroudError>;
}
