// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text substitution primitives shared by the vault operations.
//!
//! Masking replaces secret values with bracketed placeholder tokens
//! (`hunter2` -> `[PASSWORD_1]`). Unmasking reverses it inside action
//! parameters, with an extra rule: a parameter whose entire value is a bare
//! placeholder name (no brackets) is also swapped for the secret.

use serde_json::Value;

/// Replace every occurrence of each non-empty secret value with its
/// `[placeholder]` token.
///
/// Entries are applied longest value first (stable, so insertion order breaks
/// ties). A secret that is a substring of another secret can therefore never
/// claim the longer secret's text region first.
pub(crate) fn mask_text(text: &str, entries: &[(String, String)]) -> String {
    let mut ordered: Vec<&(String, String)> = entries.iter().collect();
    ordered.sort_by_key(|(_, value)| std::cmp::Reverse(value.len()));

    let mut masked = text.to_string();
    for (placeholder, value) in ordered {
        if !value.is_empty() && masked.contains(value.as_str()) {
            masked = masked.replace(value.as_str(), &format!("[{placeholder}]"));
        }
    }

    masked
}

/// Restore secrets in a single action parameter value.
///
/// Strings get both unmasking rules; arrays and objects are walked
/// recursively; numbers, booleans, and null pass through unchanged.
pub(crate) fn unmask_value(value: &Value, entries: &[(String, String)]) -> Value {
    match value {
        Value::String(s) => Value::String(unmask_str(s, entries)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| unmask_value(item, entries))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), unmask_value(item, entries)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Apply the two unmasking rules to a string, in entry insertion order.
///
/// Rule 1: every occurrence of the bracketed token `[placeholder]` becomes
/// the secret value. Rule 2: a value exactly equal to the bare placeholder
/// name becomes the secret value. Rule 2 only fires for an entry when rule 1
/// did not, and later entries see the result of earlier substitutions.
fn unmask_str(s: &str, entries: &[(String, String)]) -> String {
    let mut current = s.to_string();

    for (placeholder, secret) in entries {
        let token = format!("[{placeholder}]");
        if current.contains(&token) {
            current = current.replace(&token, secret);
        } else if current == *placeholder {
            current = secret.clone();
        }
    }

    current
}
