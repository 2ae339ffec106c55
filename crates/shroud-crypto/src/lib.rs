// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM cipher provider for the Shroud placeholder vault.
//!
//! Implements the `shroud-core` [`SecretCipher`] trait over JSON-serialized
//! placeholder mappings, with key sourcing from an environment variable or an
//! Argon2id-stretched passphrase.
//!
//! [`SecretCipher`]: shroud_core::SecretCipher

pub mod cipher;
pub mod kdf;
pub mod keysource;
pub mod provider;

pub use keysource::{generate_encoded_key, key_from_env, key_from_passphrase};
pub use provider::AeadCipher;
