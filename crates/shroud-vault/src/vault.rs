// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault lifecycle: register secrets, persist them encrypted, and move text
//! across the confidentiality boundary in both directions.
//!
//! The vault owns a single placeholder -> secret mapping for the process.
//! Prompts headed for the model go through [`PlaceholderVault::mask_prompt`];
//! scraped page text goes through [`PlaceholderVault::filter_page_content`];
//! action parameters get their real values back through
//! [`PlaceholderVault::unmask_action`] just before execution. Secrets live in
//! memory only; the encrypted blob returned by
//! [`PlaceholderVault::store_sensitive_data`] is the only form that may be
//! persisted.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};
use shroud_core::{SecretCipher, SecretMap, ShroudError, TaskId};
use tracing::{debug, info, warn};

use crate::masking;

/// The in-memory placeholder vault.
///
/// Mutating operations (register, store, load) take the write lock; the text
/// transforms take the read lock, so no caller ever observes a mapping
/// mid-merge. The mapping grows monotonically: names are added or
/// overwritten, never removed, until the process ends.
///
/// Debug output intentionally omits the mapping contents.
pub struct PlaceholderVault {
    cipher: Arc<dyn SecretCipher>,
    /// Insertion-ordered (placeholder, secret) entries, unique by placeholder.
    placeholders: RwLock<Vec<(String, String)>>,
}

impl std::fmt::Debug for PlaceholderVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderVault")
            .field("placeholders", &"[REDACTED]")
            .finish()
    }
}

impl PlaceholderVault {
    /// Create an empty vault around an injected cipher.
    pub fn new(cipher: Arc<dyn SecretCipher>) -> Self {
        Self {
            cipher,
            placeholders: RwLock::new(Vec::new()),
        }
    }

    /// Register sensitive data for the current session.
    ///
    /// Merges `data` into the mapping, overwriting entries whose placeholder
    /// name already exists. An empty mapping is a no-op.
    pub fn add_sensitive_data(&self, data: &SecretMap) {
        if data.is_empty() {
            return;
        }

        self.merge(data);
        info!(count = data.len(), "sensitive data registered");
    }

    /// Encrypt `data` for persistence and register it for the session.
    ///
    /// Returns the encrypted blob, or an empty string for empty `data`.
    /// Encryption runs before the merge: if the cipher fails, the error
    /// propagates and the mapping is left untouched.
    pub fn store_sensitive_data(
        &self,
        task_id: &TaskId,
        data: &SecretMap,
    ) -> Result<String, ShroudError> {
        if data.is_empty() {
            return Ok(String::new());
        }

        let blob = self.cipher.encrypt_data(data)?;

        self.merge(data);
        info!(task = %task_id, count = data.len(), "sensitive data stored");

        Ok(blob)
    }

    /// Decrypt a previously stored blob and register its contents.
    ///
    /// An empty blob yields an empty mapping with no side effect. A blob the
    /// cipher cannot read (foreign key, corruption, tampering) also yields an
    /// empty mapping: the task continues with reduced secret context instead
    /// of failing. Genuine cipher errors propagate.
    pub fn load_sensitive_data(&self, encrypted_data: &str) -> Result<SecretMap, ShroudError> {
        if encrypted_data.is_empty() {
            return Ok(SecretMap::new());
        }

        let Some(data) = self.cipher.decrypt_data(encrypted_data)? else {
            warn!("stored blob could not be decrypted, continuing without it");
            return Ok(SecretMap::new());
        };

        if !data.is_empty() {
            self.merge(&data);
            info!(count = data.len(), "sensitive data loaded");
        }

        Ok(data)
    }

    /// Replace secret values in an outbound prompt with placeholder tokens.
    ///
    /// Empty text, or an empty mapping, returns the input unchanged.
    pub fn mask_prompt(&self, text: &str) -> String {
        if text.is_empty() {
            return text.to_string();
        }

        let entries = self.read_entries();
        if entries.is_empty() {
            return text.to_string();
        }

        masking::mask_text(text, &entries)
    }

    /// Replace secret values in scraped page content with placeholder tokens.
    ///
    /// Same substitution as [`mask_prompt`], kept as a distinct operation
    /// because the trust boundary differs: this guards inbound page text
    /// before it is shown to the model, not an outbound prompt.
    ///
    /// [`mask_prompt`]: PlaceholderVault::mask_prompt
    pub fn filter_page_content(&self, content: &str) -> String {
        if content.is_empty() {
            return content.to_string();
        }

        let entries = self.read_entries();
        if entries.is_empty() {
            return content.to_string();
        }

        masking::mask_text(content, &entries)
    }

    /// Restore real secret values in action parameters just before execution.
    ///
    /// Two rules per string parameter: every `[placeholder]` token is
    /// replaced with its secret, and a value exactly equal to a bare
    /// placeholder name is replaced wholesale. Arrays and objects are walked
    /// recursively; other value types pass through. `action_name` is
    /// call-site context for logging only.
    pub fn unmask_action(
        &self,
        action_name: &str,
        params: &Map<String, Value>,
    ) -> Map<String, Value> {
        let entries = self.read_entries();
        if entries.is_empty() || params.is_empty() {
            return params.clone();
        }

        debug!(action = action_name, "restoring secrets in action parameters");

        params
            .iter()
            .map(|(key, value)| (key.clone(), masking::unmask_value(value, &entries)))
            .collect()
    }

    /// Build the placeholder disclosure block for a system prompt.
    ///
    /// Lists placeholder names only, never values, and instructs the model to
    /// reference the data exclusively through the tokens. Empty when no
    /// secrets are registered.
    pub fn placeholder_description(&self) -> String {
        let entries = self.read_entries();
        if entries.is_empty() {
            return String::new();
        }

        let mut description = String::from("SENSITIVE DATA:\n");
        description.push_str("The following placeholders stand in for sensitive values:\n");

        for (placeholder, _) in entries.iter() {
            description.push_str(&format!(
                "- [{placeholder}]: use this placeholder whenever you need to reference this value\n"
            ));
        }

        description.push_str(
            "\nNEVER try to guess or reconstruct the real values behind these placeholders. \
             Always use the placeholders.",
        );

        description
    }

    /// True if no sensitive data has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Merge `data` into the mapping, keeping the original position of
    /// overwritten entries.
    fn merge(&self, data: &SecretMap) {
        let mut entries = self.write_entries();
        for (name, value) in data {
            if let Some(slot) = entries.iter_mut().find(|(existing, _)| existing == name) {
                slot.1 = value.clone();
            } else {
                entries.push((name.clone(), value.clone()));
            }
        }
    }

    // Lock poisoning only happens if a panic hit mid-merge; the entries are
    // still structurally valid, so recover the guard rather than propagate
    // the panic to every later caller.
    fn read_entries(&self) -> RwLockReadGuard<'_, Vec<(String, String)>> {
        match self.placeholders.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Vec<(String, String)>> {
        match self.placeholders.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shroud_crypto::AeadCipher;
    use tracing_test::traced_test;
    use zeroize::Zeroizing;

    /// Cipher that always fails to encrypt, for merge-ordering tests.
    struct FailingCipher;

    impl SecretCipher for FailingCipher {
        fn encrypt_data(&self, _data: &SecretMap) -> Result<String, ShroudError> {
            Err(ShroudError::Encryption("simulated failure".to_string()))
        }

        fn decrypt_data(&self, _blob: &str) -> Result<Option<SecretMap>, ShroudError> {
            Ok(None)
        }
    }

    fn test_vault() -> PlaceholderVault {
        PlaceholderVault::new(Arc::new(AeadCipher::new(Zeroizing::new([9u8; 32]))))
    }

    fn sample_data() -> SecretMap {
        SecretMap::from([
            ("PWD".to_string(), "secret123".to_string()),
            ("TOKEN".to_string(), "tok-55aa".to_string()),
        ])
    }

    #[test]
    fn mask_prompt_replaces_secret_with_token() {
        let vault = test_vault();
        vault.add_sensitive_data(&sample_data());

        assert_eq!(vault.mask_prompt("login with secret123"), "login with [PWD]");
    }

    #[test]
    fn mask_prompt_with_empty_mapping_is_identity() {
        let vault = test_vault();
        assert_eq!(vault.mask_prompt("login with secret123"), "login with secret123");
    }

    #[test]
    fn mask_prompt_on_empty_text_is_identity() {
        let vault = test_vault();
        vault.add_sensitive_data(&sample_data());
        assert_eq!(vault.mask_prompt(""), "");
    }

    #[test]
    fn filter_page_content_masks_scraped_text() {
        let vault = test_vault();
        vault.add_sensitive_data(&sample_data());

        let filtered = vault.filter_page_content("<p>Your token is tok-55aa</p>");
        assert_eq!(filtered, "<p>Your token is [TOKEN]</p>");
    }

    #[test]
    fn unmask_action_restores_bracketed_token() {
        let vault = test_vault();
        vault.add_sensitive_data(&sample_data());

        let params = json!({"password": "[PWD]"});
        let result = vault.unmask_action("fill", params.as_object().unwrap());
        assert_eq!(result.get("password"), Some(&json!("secret123")));
    }

    #[test]
    fn unmask_action_restores_bare_placeholder_name() {
        let vault = test_vault();
        vault.add_sensitive_data(&sample_data());

        let params = json!({"password": "PWD"});
        let result = vault.unmask_action("fill", params.as_object().unwrap());
        assert_eq!(result.get("password"), Some(&json!("secret123")));
    }

    #[test]
    fn unmask_action_with_empty_mapping_returns_params_unchanged() {
        let vault = test_vault();
        let params = json!({"password": "[PWD]", "count": 2});
        let result = vault.unmask_action("fill", params.as_object().unwrap());
        assert_eq!(Value::Object(result), params);
    }

    #[test]
    fn unmask_action_keeps_non_string_params() {
        let vault = test_vault();
        vault.add_sensitive_data(&sample_data());

        let params = json!({"password": "[PWD]", "timeout_ms": 500, "strict": false});
        let result = vault.unmask_action("fill", params.as_object().unwrap());
        assert_eq!(result.get("timeout_ms"), Some(&json!(500)));
        assert_eq!(result.get("strict"), Some(&json!(false)));
    }

    #[test]
    fn store_then_load_round_trips_mapping() {
        let cipher = Arc::new(AeadCipher::new(Zeroizing::new([3u8; 32])));
        let vault = PlaceholderVault::new(cipher.clone());

        let blob = vault
            .store_sensitive_data(&TaskId::from("task-1"), &sample_data())
            .unwrap();
        assert!(!blob.is_empty());

        // A second vault sharing the key material recovers the same mapping.
        let other = PlaceholderVault::new(cipher);
        let recovered = other.load_sensitive_data(&blob).unwrap();
        assert_eq!(recovered, sample_data());
        assert_eq!(other.mask_prompt("secret123"), "[PWD]");
    }

    #[test]
    fn store_empty_data_returns_empty_string_without_mutation() {
        let vault = test_vault();
        let blob = vault
            .store_sensitive_data(&TaskId::from("task-1"), &SecretMap::new())
            .unwrap();
        assert_eq!(blob, "");
        assert!(vault.is_empty());
    }

    #[test]
    fn store_failure_propagates_and_skips_merge() {
        let vault = PlaceholderVault::new(Arc::new(FailingCipher));
        let result = vault.store_sensitive_data(&TaskId::from("task-1"), &sample_data());

        assert!(matches!(result, Err(ShroudError::Encryption(_))));
        // The provider call happens first; a failed store must not register anything.
        assert!(vault.is_empty());
        assert_eq!(vault.mask_prompt("secret123"), "secret123");
    }

    #[test]
    fn load_empty_blob_returns_empty_mapping_without_mutation() {
        let vault = test_vault();
        let recovered = vault.load_sensitive_data("").unwrap();
        assert!(recovered.is_empty());
        assert!(vault.is_empty());
    }

    #[test]
    fn load_unreadable_blob_degrades_to_empty_mapping() {
        let vault = test_vault();
        let recovered = vault.load_sensitive_data("AAAA-not-a-real-blob").unwrap();
        assert!(recovered.is_empty());
        assert!(vault.is_empty());
    }

    #[test]
    fn load_foreign_blob_degrades_to_empty_mapping() {
        let writer = PlaceholderVault::new(Arc::new(AeadCipher::new(Zeroizing::new([1u8; 32]))));
        let reader = PlaceholderVault::new(Arc::new(AeadCipher::new(Zeroizing::new([2u8; 32]))));

        let blob = writer
            .store_sensitive_data(&TaskId::from("task-1"), &sample_data())
            .unwrap();
        let recovered = reader.load_sensitive_data(&blob).unwrap();
        assert!(recovered.is_empty());
        assert!(reader.is_empty());
    }

    #[test]
    fn add_overwrites_existing_placeholder() {
        let vault = test_vault();
        vault.add_sensitive_data(&SecretMap::from([("PWD".to_string(), "old".to_string())]));
        vault.add_sensitive_data(&SecretMap::from([("PWD".to_string(), "new".to_string())]));

        assert_eq!(vault.mask_prompt("new"), "[PWD]");
        assert_eq!(vault.mask_prompt("old"), "old");
    }

    #[test]
    fn add_empty_data_is_a_noop() {
        let vault = test_vault();
        vault.add_sensitive_data(&SecretMap::new());
        assert!(vault.is_empty());
    }

    #[test]
    fn description_lists_names_and_never_values() {
        let vault = test_vault();
        vault.add_sensitive_data(&SecretMap::from([
            ("PWD".to_string(), "x".to_string()),
            ("TOKEN".to_string(), "y".to_string()),
        ]));

        let description = vault.placeholder_description();
        assert!(description.contains("[PWD]"));
        assert!(description.contains("[TOKEN]"));
        assert!(!description.contains("\"x\""));
        assert!(!description.contains(": x"));
        assert!(!description.contains(": y"));
        assert!(description.contains("NEVER"));
    }

    #[test]
    fn description_is_empty_for_empty_mapping() {
        let vault = test_vault();
        assert_eq!(vault.placeholder_description(), "");
    }

    #[test]
    fn debug_output_redacts_mapping() {
        let vault = test_vault();
        vault.add_sensitive_data(&sample_data());
        let rendered = format!("{vault:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret123"));
    }

    #[test]
    #[traced_test]
    fn logs_record_counts_not_values() {
        let vault = test_vault();
        vault.add_sensitive_data(&sample_data());

        assert!(!logs_contain("secret123"));
        assert!(!logs_contain("tok-55aa"));
    }

    #[test]
    fn concurrent_masking_during_merges() {
        let vault = Arc::new(test_vault());
        vault.add_sensitive_data(&sample_data());

        let mut handles = Vec::new();
        for i in 0..4 {
            let vault = vault.clone();
            handles.push(std::thread::spawn(move || {
                for j in 0..50 {
                    vault.add_sensitive_data(&SecretMap::from([(
                        format!("EXTRA_{i}_{j}"),
                        format!("value-{i}-{j}"),
                    )]));
                    // Readers must always see a consistent mapping.
                    assert_eq!(vault.mask_prompt("secret123"), "[PWD]");
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
