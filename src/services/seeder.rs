// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-time default-data seeding.

use futures_util::{stream, StreamExt};

use crate::db::{DataStore, StoreError};
use crate::models::{Category, CategoryKind};

const MAX_CONCURRENT_DB_OPS: usize = 8;

/// Ensure the default category set exists.
///
/// Only seeds on true first launch: if any user or any category already
/// exists this is a no-op, so sync restoring data from the cloud never
/// gets overwritten. Safe to call on every startup. Failures are logged,
/// never surfaced.
pub async fn ensure_defaults(store: &DataStore) {
    let user_count = store.count_users().await.unwrap_or(0);
    if user_count > 0 {
        return;
    }

    let category_count = store.count_categories().await.unwrap_or(0);
    if category_count > 0 {
        return;
    }

    tracing::info!("First launch detected, seeding default categories");

    let results: Vec<Result<(), StoreError>> = stream::iter(default_categories())
        .map(|category| async move { store.insert_category(category).await })
        .buffer_unordered(MAX_CONCURRENT_DB_OPS)
        .collect()
        .await;

    let failed = results
        .into_iter()
        .filter(|r| {
            // A concurrent seeder (companion device) hitting the same
            // name is fine; only real I/O failures are worth noting.
            !matches!(r, Ok(()) | Err(StoreError::UniqueViolation { .. }))
        })
        .count();

    if failed > 0 {
        tracing::error!(failed, "Failed to seed some default categories");
    } else {
        tracing::info!("Default categories seeded");
    }
}

fn default_categories() -> Vec<Category> {
    vec![
        Category::new("HIIT", "dumbbell.fill", CategoryKind::HIIT),
        Category::new(
            "Strength",
            "figure.strengthtraining.traditional",
            CategoryKind::Strength,
        ),
        Category::new("Run", "figure.run", CategoryKind::Run),
        Category::new("Yoga", "figure.yoga", CategoryKind::Yoga),
        Category::new("Cycling", "figure.outdoor.cycle", CategoryKind::Cycling),
        Category::new("Swimming", "figure.pool.swim", CategoryKind::Swimming),
        Category::new("Wrestling", "figure.wrestling", CategoryKind::Grappling),
        Category::new("Recovery", "figure.mind.and.body", CategoryKind::Recovery),
        Category::new("Walk", "figure.walk.motion", CategoryKind::Walk),
        Category::new("Stretch", "figure.cooldown", CategoryKind::Stretch),
        Category::new(
            "Cross-Train",
            "figure.cross.training",
            CategoryKind::CrossTrain,
        ),
        Category::new(
            "Power",
            "figure.strengthtraining.traditional",
            CategoryKind::Power,
        ),
        Category::new("Pilates", "figure.pilates", CategoryKind::Pilates),
        Category::new("Cardio", "figure.mixed.cardio", CategoryKind::Cardio),
        Category::new("Test", "stopwatch", CategoryKind::Test),
        Category::new("Hiking", "figure.hiking", CategoryKind::Hiking),
        Category::new("Rowing", "figure.outdoor.rowing", CategoryKind::Rowing),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;

    #[tokio::test]
    async fn test_seeds_on_first_launch_and_is_idempotent() {
        let store = DataStore::in_memory();

        ensure_defaults(&store).await;
        let seeded = store.count_categories().await.unwrap();
        assert_eq!(seeded, default_categories().len());

        // Second run changes nothing
        ensure_defaults(&store).await;
        assert_eq!(store.count_categories().await.unwrap(), seeded);
    }

    #[tokio::test]
    async fn test_skipped_when_a_user_exists() {
        let store = DataStore::in_memory();
        store
            .insert_user(UserProfile::new("id-1".to_string(), None, None))
            .await
            .unwrap();

        ensure_defaults(&store).await;
        assert_eq!(store.count_categories().await.unwrap(), 0);
    }
}
