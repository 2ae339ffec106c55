// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Shroud configuration system.

use shroud_config::diagnostic::{ConfigError, suggest_key};
use shroud_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_shroud_config() {
    let toml = r#"
[crypto]
key_env_var = "AGENT_VAULT_KEY"
kdf_memory_cost = 32768
kdf_iterations = 2
kdf_parallelism = 1
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.crypto.key_env_var, "AGENT_VAULT_KEY");
    assert_eq!(config.crypto.kdf_memory_cost, 32768);
    assert_eq!(config.crypto.kdf_iterations, 2);
    assert_eq!(config.crypto.kdf_parallelism, 1);
}

/// Unknown field in [crypto] section is rejected.
#[test]
fn unknown_field_in_crypto_produces_error() {
    let toml = r#"
[crypto]
key_env_vr = "X"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error.
    assert!(
        err_str.contains("unknown field") || err_str.contains("key_env_vr"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_top_level_section_produces_error() {
    let toml = r#"
[cyrpto]
kdf_iterations = 2
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// The diagnostic path produces an UnknownKey with a typo suggestion.
#[test]
fn unknown_field_gets_typo_suggestion() {
    let toml = r#"
[crypto]
kdf_iteratons = 2
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce diagnostics");
    assert!(!errors.is_empty());
    let has_suggestion = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey {
                suggestion: Some(s),
                ..
            } if s == "kdf_iterations"
        )
    });
    assert!(has_suggestion, "expected a kdf_iterations suggestion");
}

/// Wrong value type surfaces as a diagnostic, not a panic.
#[test]
fn wrong_type_for_kdf_iterations_produces_error() {
    let toml = r#"
[crypto]
kdf_iterations = "three"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce diagnostics");
    assert!(!errors.is_empty());
}

/// Semantic validation runs after deserialization.
#[test]
fn zero_kdf_iterations_fails_validation() {
    let toml = r#"
[crypto]
kdf_iterations = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    let err_str = format!("{}", errors[0]);
    assert!(err_str.contains("kdf_iterations"));
}

/// suggest_key is exported and usable directly.
#[test]
fn suggest_key_finds_close_match() {
    assert_eq!(
        suggest_key("kdf_memry_cost", &["key_env_var", "kdf_memory_cost"]),
        Some("kdf_memory_cost".to_string())
    );
}
