// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the Shroud crates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A placeholder-name to secret-value mapping.
///
/// Keys are placeholder names such as `PASSWORD_1`; values are the real
/// secrets they stand in for. A `BTreeMap` gives deterministic iteration
/// order for serialization, which keeps encrypted blobs reproducible for a
/// given key and nonce.
pub type SecretMap = BTreeMap<String, String>;

/// Opaque identifier correlating a placeholder mapping with one unit of
/// automated work.
///
/// The vault treats this purely as a label for logging around the
/// encrypt/decrypt call. It is never validated, never required to be unique,
/// and never used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
