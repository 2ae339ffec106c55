// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Shroud placeholder vault.
//!
//! This crate provides the error taxonomy, the shared [`SecretMap`] type, and
//! the [`SecretCipher`] trait that the vault uses for encrypted persistence.
//! Concrete ciphers live in `shroud-crypto`; the vault itself lives in
//! `shroud-vault`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShroudError;
pub use traits::SecretCipher;
pub use types::{SecretMap, TaskId};
