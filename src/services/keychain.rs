// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Secure credential storage stand-in.
//!
//! Models the platform keychain at its interface boundary: synchronous
//! save/read/delete with best-effort semantics and no transactionality.
//! Backed by an in-memory map with an optional JSON file so a cached
//! identity survives process restarts in development and tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Keys the core stores in the keychain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeychainKey {
    /// Stable user identifier from the identity provider
    IdentityUserId,
}

impl KeychainKey {
    fn as_str(self) -> &'static str {
        match self {
            KeychainKey::IdentityUserId => "identity_user_id",
        }
    }
}

/// Keychain handle. Cheap operations, all best-effort: an I/O failure is
/// logged and swallowed, never propagated.
pub struct Keychain {
    entries: Mutex<HashMap<String, String>>,
    file_path: Option<PathBuf>,
}

impl Keychain {
    /// Create an in-memory keychain (tests, previews).
    pub fn in_memory() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            file_path: None,
        }
    }

    /// Open a keychain backed by a JSON file. A missing or unreadable
    /// file yields an empty keychain (first launch, or soft data loss).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Keychain file unreadable, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            entries: Mutex::new(entries),
            file_path: Some(path),
        }
    }

    /// Save a value for a key, replacing any existing value.
    pub fn save(&self, value: &str, key: KeychainKey) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.as_str().to_string(), value.to_string());
        self.flush(&entries);
    }

    /// Read the value for a key, if any.
    pub fn read(&self, key: KeychainKey) -> Option<String> {
        self.entries.lock().unwrap().get(key.as_str()).cloned()
    }

    /// Delete the value for a key. No-op if absent.
    pub fn delete(&self, key: KeychainKey) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key.as_str());
        self.flush(&entries);
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        let Some(path) = &self.file_path else {
            return;
        };

        let result = serde_json::to_vec(entries)
            .map_err(std::io::Error::other)
            .and_then(|bytes| std::fs::write(path, bytes));

        if let Err(e) = result {
            tracing::warn!(error = %e, path = %path.display(), "Keychain write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_read_delete_round_trip() {
        let keychain = Keychain::in_memory();
        assert_eq!(keychain.read(KeychainKey::IdentityUserId), None);

        keychain.save("user-123", KeychainKey::IdentityUserId);
        assert_eq!(
            keychain.read(KeychainKey::IdentityUserId).as_deref(),
            Some("user-123")
        );

        keychain.save("user-456", KeychainKey::IdentityUserId);
        assert_eq!(
            keychain.read(KeychainKey::IdentityUserId).as_deref(),
            Some("user-456")
        );

        keychain.delete(KeychainKey::IdentityUserId);
        assert_eq!(keychain.read(KeychainKey::IdentityUserId), None);
    }

    #[test]
    fn test_file_backed_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keychain.json");

        let keychain = Keychain::open(&path);
        keychain.save("user-123", KeychainKey::IdentityUserId);

        let reopened = Keychain::open(&path);
        assert_eq!(
            reopened.read(KeychainKey::IdentityUserId).as_deref(),
            Some("user-123")
        );
    }
}
