// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shroud.toml` > `~/.config/shroud/shroud.toml` >
//! `/etc/shroud/shroud.toml` with environment variable overrides via the
//! `SHROUD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ShroudConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shroud/shroud.toml` (system-wide)
/// 3. `~/.config/shroud/shroud.toml` (user XDG config)
/// 4. `./shroud.toml` (local directory)
/// 5. `SHROUD_*` environment variables
pub fn load_config() -> Result<ShroudConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ShroudConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShroudConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShroudConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShroudConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShroudConfig::default()))
        .merge(Toml::file("/etc/shroud/shroud.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("shroud/shroud.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("shroud.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay intact: `SHROUD_CRYPTO_KEY_ENV_VAR` must map to
/// `crypto.key_env_var`, not `crypto.key.env.var`.
fn env_provider() -> Env {
    Env::prefixed("SHROUD_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SHROUD_CRYPTO_KDF_ITERATIONS -> "crypto_kdf_iterations"
        key.as_str().replacen("crypto_", "crypto.", 1).into()
    })
}
