// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Shroud placeholder vault.

use thiserror::Error;

/// The primary error type used across Shroud crates.
#[derive(Debug, Error)]
pub enum ShroudError {
    /// Configuration errors (invalid TOML, malformed key material, bad KDF parameters).
    #[error("configuration error: {0}")]
    Config(String),

    /// The cipher failed to encrypt a placeholder mapping.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The cipher failed to decrypt in a way that is not the ordinary
    /// "foreign or corrupt blob" case (that case yields an empty result,
    /// not an error).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
