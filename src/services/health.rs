// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health-data authorization manager.
//!
//! Wraps the platform health service at its interface boundary: the core
//! tracks authorization state and routes denial/unavailability through
//! the alert coordinator. Live session recording and sample I/O stay on
//! the platform side of the [`HealthBackend`] seam.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::services::alerts::{AlertAction, AlertCoordinator};

/// Authorization state for health-data access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Authorized,
    Denied,
    Unavailable,
}

/// Platform health service boundary.
pub trait HealthBackend: Send + Sync {
    /// Whether health data is supported on this device at all.
    fn is_available(&self) -> bool;

    /// Current authorization status as reported by the platform.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Run the platform authorization prompt.
    fn request_authorization(&self) -> Result<(), String>;
}

/// Health-access manager.
pub struct HealthManager {
    backend: Box<dyn HealthBackend>,
    alerts: Arc<AlertCoordinator>,
    status: Mutex<AuthorizationStatus>,
}

impl HealthManager {
    pub fn new(backend: Box<dyn HealthBackend>, alerts: Arc<AlertCoordinator>) -> Self {
        let status = if backend.is_available() {
            backend.authorization_status()
        } else {
            AuthorizationStatus::Unavailable
        };

        Self {
            backend,
            alerts,
            status: Mutex::new(status),
        }
    }

    pub fn status(&self) -> AuthorizationStatus {
        *self.status.lock().unwrap()
    }

    pub fn is_authorized(&self) -> bool {
        self.status() == AuthorizationStatus::Authorized
    }

    /// Request health-data authorization from the platform.
    ///
    /// Unavailability and denial surface through the alert coordinator;
    /// denial carries an "Open Settings" secondary action.
    pub fn request_authorization(&self) {
        if !self.backend.is_available() {
            *self.status.lock().unwrap() = AuthorizationStatus::Unavailable;
            self.alerts.report(&AppError::HealthUnavailable, None);
            return;
        }

        tracing::info!("Requesting health-data permissions");
        if let Err(e) = self.backend.request_authorization() {
            tracing::warn!(error = %e, "Health authorization request failed");
        }

        let status = self.backend.authorization_status();
        *self.status.lock().unwrap() = status;

        if status == AuthorizationStatus::Denied {
            self.alerts.report(
                &AppError::HealthNotAuthorized,
                Some(AlertAction::new("Open Settings")),
            );
        }
    }
}
