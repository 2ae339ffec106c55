// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placeholder vault for LLM-driven browser automation.
//!
//! Secrets registered with the vault are substituted with opaque
//! `[PLACEHOLDER]` tokens in every prompt and every piece of scraped page
//! content before the text reaches the model, and substituted back into
//! action parameters only at the moment an action executes. The mapping can
//! be persisted across process restarts as an encrypted blob produced by an
//! injected [`SecretCipher`].
//!
//! ```
//! use std::sync::Arc;
//! use shroud_core::SecretMap;
//! use shroud_crypto::AeadCipher;
//! use shroud_vault::PlaceholderVault;
//! use zeroize::Zeroizing;
//!
//! let cipher = Arc::new(AeadCipher::new(Zeroizing::new([0u8; 32])));
//! let vault = PlaceholderVault::new(cipher);
//!
//! vault.add_sensitive_data(&SecretMap::from([
//!     ("PASSWORD_1".to_string(), "hunter2".to_string()),
//! ]));
//!
//! assert_eq!(vault.mask_prompt("log in with hunter2"), "log in with [PASSWORD_1]");
//! ```
//!
//! [`SecretCipher`]: shroud_core::SecretCipher

mod masking;
pub mod vault;

pub use vault::PlaceholderVault;
