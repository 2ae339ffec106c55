// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-zero KDF parameters and a well-formed env var name.

use crate::diagnostic::ConfigError;
use crate::model::ShroudConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShroudConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let env_var = config.crypto.key_env_var.trim();
    if env_var.is_empty() {
        errors.push(ConfigError::Validation {
            message: "crypto.key_env_var must not be empty".to_string(),
        });
    } else if !env_var
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        errors.push(ConfigError::Validation {
            message: format!("crypto.key_env_var `{env_var}` is not a valid env var name"),
        });
    }

    // Argon2 rejects a zero for any of these at key-derivation time; catching
    // it here gives the operator a config-shaped error instead.
    if config.crypto.kdf_memory_cost == 0 {
        errors.push(ConfigError::Validation {
            message: "crypto.kdf_memory_cost must be greater than zero".to_string(),
        });
    }
    if config.crypto.kdf_iterations == 0 {
        errors.push(ConfigError::Validation {
            message: "crypto.kdf_iterations must be greater than zero".to_string(),
        });
    }
    if config.crypto.kdf_parallelism == 0 {
        errors.push(ConfigError::Validation {
            message: "crypto.kdf_parallelism must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CryptoConfig;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ShroudConfig::default()).is_ok());
    }

    #[test]
    fn zero_kdf_params_are_all_reported() {
        let config = ShroudConfig {
            crypto: CryptoConfig {
                kdf_memory_cost: 0,
                kdf_iterations: 0,
                kdf_parallelism: 0,
                ..CryptoConfig::default()
            },
        };
        let errors = validate_config(&config).expect_err("should collect errors");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn empty_key_env_var_is_rejected() {
        let config = ShroudConfig {
            crypto: CryptoConfig {
                key_env_var: "  ".to_string(),
                ..CryptoConfig::default()
            },
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn key_env_var_with_spaces_is_rejected() {
        let config = ShroudConfig {
            crypto: CryptoConfig {
                key_env_var: "MY KEY".to_string(),
                ..CryptoConfig::default()
            },
        };
        assert!(validate_config(&config).is_err());
    }
}
