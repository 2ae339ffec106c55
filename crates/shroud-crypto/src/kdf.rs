// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id passphrase stretching.
//!
//! Turns an operator passphrase into a 32-byte cipher key using Argon2id
//! with the cost parameters from the `[crypto]` config section. The salt is
//! caller-held: blobs sealed under a (passphrase, salt) pair need the same
//! pair to open again.

use ring::rand::{SecureRandom, SystemRandom};
use shroud_config::CryptoConfig;
use shroud_core::ShroudError;
use zeroize::Zeroizing;

/// Argon2id salt length.
pub const SALT_LEN: usize = 16;

/// Stretch `passphrase` into a 32-byte key with the KDF costs in `config`.
///
/// The key is zeroed on drop. Out-of-range cost parameters surface as a
/// `Config` error so the operator sees which knob to fix.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; SALT_LEN],
    config: &CryptoConfig,
) -> Result<Zeroizing<[u8; 32]>, ShroudError> {
    let params = argon2::Params::new(
        config.kdf_memory_cost,
        config.kdf_iterations,
        config.kdf_parallelism,
        Some(32),
    )
    .map_err(|e| ShroudError::Config(format!("crypto.kdf_* parameters rejected: {e}")))?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(passphrase, salt, key.as_mut())
        .map_err(|e| ShroudError::Encryption(format!("passphrase stretching failed: {e}")))?;

    Ok(key)
}

/// Draw a random Argon2id salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], ShroudError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| ShroudError::Encryption("system CSPRNG refused a salt".to_string()))?;
    Ok(salt)
}
