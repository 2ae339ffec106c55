// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM sealing of mapping payloads.
//!
//! A sealed payload is `nonce || ciphertext || tag`. The 12-byte nonce is
//! drawn from the system CSPRNG on every seal and travels at the front of the
//! sealed bytes, so the caller stores a single opaque buffer. GCM tolerates
//! no nonce reuse under one key.

use ring::aead::{AES_256_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use shroud_core::ShroudError;
use zeroize::Zeroizing;

/// Nonce prefix length of a sealed payload.
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag length appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// Encrypt a serialized mapping payload.
///
/// Returns `nonce || ciphertext || tag` as one buffer, ready for transport
/// encoding.
pub fn seal_payload(key: &[u8; 32], payload: &[u8]) -> Result<Vec<u8>, ShroudError> {
    let gcm = gcm_key(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    SystemRandom::new()
        .fill(&mut nonce_bytes)
        .map_err(|_| ShroudError::Encryption("system CSPRNG refused a nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = payload.to_vec();
    gcm.seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| ShroudError::Encryption("AES-256-GCM seal failed".to_string()))?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + in_out.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&in_out);
    Ok(sealed)
}

/// Decrypt a buffer produced by [`seal_payload`].
///
/// Fails for a truncated buffer, a rotated or foreign key, or any bit flip
/// in the nonce, ciphertext, or tag.
pub fn open_payload(key: &[u8; 32], sealed: &[u8]) -> Result<Vec<u8>, ShroudError> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(ShroudError::Decryption(format!(
            "sealed payload too short: {} bytes",
            sealed.len()
        )));
    }

    let gcm = gcm_key(key)?;

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
        .map_err(|_| ShroudError::Decryption("malformed nonce prefix".to_string()))?;

    let mut in_out = ciphertext.to_vec();
    let plaintext = gcm
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| {
            ShroudError::Decryption("authentication failed -- wrong key or altered data".to_string())
        })?;

    Ok(plaintext.to_vec())
}

/// Generate a random 32-byte AES-256-GCM key, zeroed on drop.
pub fn generate_key() -> Result<Zeroizing<[u8; 32]>, ShroudError> {
    let mut key = Zeroizing::new([0u8; 32]);
    SystemRandom::new()
        .fill(key.as_mut())
        .map_err(|_| ShroudError::Encryption("system CSPRNG refused a key".to_string()))?;
    Ok(key)
}

// Key length is fixed by the array type, so ring rejecting it would be a bug
// on our side, not bad input.
fn gcm_key(key: &[u8; 32]) -> Result<LessSafeKey, ShroudError> {
    UnboundKey::new(&AES_256_GCM, key)
        .map(LessSafeKey::new)
        .map_err(|_| ShroudError::Internal("ring rejected a 32-byte GCM key".to_string()))
}
