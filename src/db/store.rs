// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local structured store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage, keyed by identity string)
//! - Categories (workout categories, keyed by name)
//! - Workouts (templates with exercises and history)
//!
//! The store is the one resource with true external concurrency (the
//! platform sync layer can race a local write from the companion device).
//! Uniqueness of the user identity string is enforced atomically at
//! insert time and is the sole backstop against duplicate-profile
//! creation from concurrent resolve-or-create calls.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::db::collections;
use crate::models::{Category, UserProfile, Workout};

/// Store error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Unique constraint violation in {collection}: {key}")]
    UniqueViolation { collection: &'static str, key: String },
}

/// Local data store handle.
///
/// Cheap to clone; all clones share the same collections. Optionally
/// snapshots to a JSON file after each write (best effort — a failed
/// snapshot is logged and swallowed, the in-memory state stays correct).
#[derive(Clone)]
pub struct DataStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    users: DashMap<String, UserProfile>,
    categories: DashMap<String, Category>,
    workouts: DashMap<u64, Workout>,
    snapshot_path: Option<PathBuf>,
}

/// On-disk snapshot format.
#[derive(Default, Serialize, Deserialize)]
struct StoreSnapshot {
    #[serde(default)]
    users: Vec<UserProfile>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    workouts: Vec<Workout>,
}

impl DataStore {
    /// Create an in-memory store (tests, previews).
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                users: DashMap::new(),
                categories: DashMap::new(),
                workouts: DashMap::new(),
                snapshot_path: None,
            }),
        }
    }

    /// Open a store backed by a JSON snapshot file.
    ///
    /// A missing file is the normal first-launch case and yields an empty
    /// store; a corrupt file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<StoreSnapshot>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreSnapshot::default(),
            Err(e) => return Err(e.into()),
        };

        let store = Self {
            inner: Arc::new(StoreInner {
                users: snapshot
                    .users
                    .into_iter()
                    .map(|u| (u.identity_id.clone(), u))
                    .collect(),
                categories: snapshot
                    .categories
                    .into_iter()
                    .map(|c| (c.name.clone(), c))
                    .collect(),
                workouts: snapshot
                    .workouts
                    .into_iter()
                    .map(|w| (w.id, w))
                    .collect(),
                snapshot_path: Some(path.clone()),
            }),
        };

        tracing::info!(
            path = %path.display(),
            users = store.inner.users.len(),
            "Opened local data store"
        );

        Ok(store)
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Look up a user profile by identity string.
    pub async fn find_user_by_identity(
        &self,
        identity_id: &str,
    ) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.inner.users.get(identity_id).map(|u| u.value().clone()))
    }

    /// Insert a new user profile and commit.
    ///
    /// Fails with [`StoreError::UniqueViolation`] if a profile already
    /// exists for the identity string. The check-and-insert is atomic, so
    /// two concurrent inserts for the same identity cannot both succeed;
    /// callers treat the violation as "already exists, re-fetch".
    pub async fn insert_user(&self, profile: UserProfile) -> Result<(), StoreError> {
        match self.inner.users.entry(profile.identity_id.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::UniqueViolation {
                    collection: collections::USERS,
                    key: profile.identity_id,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(profile);
            }
        }
        self.snapshot_best_effort();
        Ok(())
    }

    /// Update an existing user profile (upsert on identity string).
    pub async fn update_user(&self, profile: UserProfile) -> Result<(), StoreError> {
        self.inner
            .users
            .insert(profile.identity_id.clone(), profile);
        self.snapshot_best_effort();
        Ok(())
    }

    /// Number of user profiles in the store.
    pub async fn count_users(&self) -> Result<usize, StoreError> {
        Ok(self.inner.users.len())
    }

    // ─── Category Operations ─────────────────────────────────────

    /// Insert a category; name must be unique.
    pub async fn insert_category(&self, category: Category) -> Result<(), StoreError> {
        match self.inner.categories.entry(category.name.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::UniqueViolation {
                    collection: collections::CATEGORIES,
                    key: category.name,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(category);
            }
        }
        self.snapshot_best_effort();
        Ok(())
    }

    /// All categories, sorted by name.
    pub async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> = self
            .inner
            .categories
            .iter()
            .map(|c| c.value().clone())
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// Number of categories in the store.
    pub async fn count_categories(&self) -> Result<usize, StoreError> {
        Ok(self.inner.categories.len())
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get a workout by ID.
    pub async fn get_workout(&self, id: u64) -> Result<Option<Workout>, StoreError> {
        Ok(self.inner.workouts.get(&id).map(|w| w.value().clone()))
    }

    /// Create or update a workout.
    pub async fn upsert_workout(&self, workout: Workout) -> Result<(), StoreError> {
        self.inner.workouts.insert(workout.id, workout);
        self.snapshot_best_effort();
        Ok(())
    }

    /// All workouts, most recently created first.
    pub async fn list_workouts(&self) -> Result<Vec<Workout>, StoreError> {
        let mut workouts: Vec<Workout> =
            self.inner.workouts.iter().map(|w| w.value().clone()).collect();
        workouts.sort_by(|a, b| b.date_created.cmp(&a.date_created));
        Ok(workouts)
    }

    // ─── Snapshot ────────────────────────────────────────────────

    /// Write the JSON snapshot if a path is configured. Best effort.
    fn snapshot_best_effort(&self) {
        let Some(path) = &self.inner.snapshot_path else {
            return;
        };

        let snapshot = StoreSnapshot {
            users: self.inner.users.iter().map(|u| u.value().clone()).collect(),
            categories: self.inner.categories.iter().map(|c| c.value().clone()).collect(),
            workouts: self.inner.workouts.iter().map(|w| w.value().clone()).collect(),
        };

        let result = serde_json::to_vec_pretty(&snapshot)
            .map_err(StoreError::from)
            .and_then(|bytes| std::fs::write(path, bytes).map_err(StoreError::from));

        if let Err(e) = result {
            tracing::warn!(error = %e, path = %path.display(), "Store snapshot failed");
        }
    }
}
