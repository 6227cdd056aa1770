//! Account record
//!
//! Five plain strings stored under one key. Each field loads on its own and
//! only when it is a non-empty string.

use pawprint_core::Notice;
use pawprint_store::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info, warn};

/// Storage key of the account record
pub const ACCOUNT_KEY: &str = "user_account_v1";

/// Email shown when none is stored
pub const EMAIL_PLACEHOLDER: &str = "user@example.com";

/// Account form contents
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPayload {
    pub email: String,
    /// Stored in clear text to stay compatible with existing records
    pub password: String,
    pub birthday: String,
    pub location: String,
    pub language: String,
}

impl fmt::Debug for AccountPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("AccountPayload")
            .field("email", &self.email)
            .field("password", &password)
            .field("birthday", &self.birthday)
            .field("location", &self.location)
            .field("language", &self.language)
            .finish()
    }
}

impl AccountPayload {
    /// Take every non-empty string field from a stored record
    pub fn from_record(raw: &str) -> Self {
        let mut account = Self::default();
        let map = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("Stored account is not an object, ignoring");
                return account;
            }
            Err(e) => {
                warn!(error = %e, "Stored account unreadable, ignoring");
                return account;
            }
        };

        let fields = [
            ("email", &mut account.email),
            ("password", &mut account.password),
            ("birthday", &mut account.birthday),
            ("location", &mut account.location),
            ("language", &mut account.language),
        ];
        for (key, slot) in fields {
            match map.get(key) {
                Some(Value::String(s)) if !s.is_empty() => *slot = s.clone(),
                Some(Value::String(_)) | Some(Value::Null) | None => {}
                Some(_) => debug!(field = key, "Ignoring non-string account field"),
            }
        }
        account
    }

    /// Fill in display placeholders for empty fields
    pub fn with_placeholders(mut self) -> Self {
        if self.email.is_empty() {
            self.email = EMAIL_PLACEHOLDER.to_string();
        }
        self
    }
}

/// Loads and saves the account record
#[derive(Debug, Clone)]
pub struct AccountRepository<S> {
    store: S,
}

impl<S: KeyValueStore> AccountRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the account as the form shows it: stored fields, then the
    /// email placeholder when no email is stored
    pub fn load(&self) -> AccountPayload {
        let stored = match self.store.get(ACCOUNT_KEY) {
            Ok(Some(raw)) => AccountPayload::from_record(&raw),
            Ok(None) => AccountPayload::default(),
            Err(e) => {
                warn!(error = %e, "Account storage unavailable, using empty form");
                AccountPayload::default()
            }
        };
        stored.with_placeholders()
    }

    /// Write all five fields
    pub fn save(&mut self, account: &AccountPayload) -> Result<(), StoreError> {
        let record = serde_json::to_string(account)?;
        self.store.set(ACCOUNT_KEY, &record).inspect_err(|e| {
            error!(error = %e, "Failed to save account");
        })?;
        info!(location = %account.location, "Saved account");
        Ok(())
    }

    /// Save and answer with the notice to show
    pub fn save_with_notice(&mut self, account: &AccountPayload) -> Notice {
        match self.save(account) {
            Ok(()) => Notice::AccountSaved,
            Err(_) => Notice::SaveFailed,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
