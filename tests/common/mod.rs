// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use pulsesplit_core::db::DataStore;
use pulsesplit_core::services::{
    AlertCoordinator, AuthorizationStatus, Credential, HealthBackend, Keychain, SessionManager,
    SignInError,
};

/// Health backend that reports a fixed availability/status.
#[allow(dead_code)]
pub struct FakeHealthBackend {
    pub available: bool,
    pub status: AuthorizationStatus,
}

impl HealthBackend for FakeHealthBackend {
    fn is_available(&self) -> bool {
        self.available
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    fn request_authorization(&self) -> Result<(), String> {
        Ok(())
    }
}

#[allow(dead_code)]
pub fn authorized_backend() -> Box<dyn HealthBackend> {
    Box::new(FakeHealthBackend {
        available: true,
        status: AuthorizationStatus::Authorized,
    })
}

/// A session manager plus its collaborators, all in memory.
#[allow(dead_code)]
pub struct TestSession {
    pub store: DataStore,
    pub keychain: Arc<Keychain>,
    pub alerts: Arc<AlertCoordinator>,
    pub manager: SessionManager,
}

#[allow(dead_code)]
pub fn test_session() -> TestSession {
    let store = DataStore::in_memory();
    let keychain = Arc::new(Keychain::in_memory());
    let alerts = Arc::new(AlertCoordinator::new());
    let manager = SessionManager::new(store.clone(), keychain.clone(), alerts.clone());

    TestSession {
        store,
        keychain,
        alerts,
        manager,
    }
}

/// Fresh manager over the same store and keychain, simulating a new
/// process start against the same local data.
#[allow(dead_code)]
pub fn relaunch(session: &TestSession) -> SessionManager {
    SessionManager::new(
        session.store.clone(),
        session.keychain.clone(),
        Arc::new(AlertCoordinator::new()),
    )
}

#[allow(dead_code)]
pub fn credential(user_id: &str) -> Credential {
    Credential {
        user_id: user_id.to_string(),
        email: Some(format!("{}@example.com", user_id)),
        full_name: Some("Test User".to_string()),
    }
}

#[allow(dead_code)]
pub fn provider_failure(reason: &str) -> SignInError {
    SignInError::Failed(reason.to_string())
}
