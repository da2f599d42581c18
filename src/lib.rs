// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PulseSplit core: session, alerts, and local data for a workout
//! split-timing app.
//!
//! This crate is the headless shared core linked by the phone and watch
//! shells. It owns the sign-in state machine and the user-facing alert
//! queue, plus the persisted domain models and the local collaborator
//! stand-ins (store, keychain) they sit on. All platform surfaces (UI,
//! real keychain, health frameworks, cloud sync) live in the shells.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;

use config::Config;
use db::{DataStore, StoreError};
use services::{AlertCoordinator, HealthBackend, HealthManager, Keychain, SessionManager};

/// Shared application context, constructed once at process start by the
/// shell and passed to every consumer. Replaces ambient singletons: the
/// context lives for the process duration and owns all core state.
pub struct AppContext {
    pub config: Config,
    pub store: DataStore,
    pub keychain: Arc<Keychain>,
    pub alerts: Arc<AlertCoordinator>,
    pub session: SessionManager,
    pub health: HealthManager,
}

impl AppContext {
    /// Build the context. The shell supplies the platform health backend.
    pub fn new(config: Config, health_backend: Box<dyn HealthBackend>) -> Result<Self, StoreError> {
        let (store, keychain) = match &config.data_dir {
            Some(dir) => (
                DataStore::open(dir.join("store.json"))?,
                Keychain::open(dir.join("keychain.json")),
            ),
            None => (DataStore::in_memory(), Keychain::in_memory()),
        };

        let keychain = Arc::new(keychain);
        let alerts = Arc::new(AlertCoordinator::new());
        let session = SessionManager::new(store.clone(), keychain.clone(), alerts.clone());
        let health = HealthManager::new(health_backend, alerts.clone());

        Ok(Self {
            config,
            store,
            keychain,
            alerts,
            session,
            health,
        })
    }

    /// One-time startup work: seed defaults and restore the previous
    /// session. Call after `new`, before presenting UI.
    pub async fn start(&self) {
        services::seeder::ensure_defaults(&self.store).await;
        self.session.restore_session().await;
    }
}

/// Initialize structured logging. The shell calls this once at startup.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pulsesplit_core=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
