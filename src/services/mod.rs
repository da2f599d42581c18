// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod alerts;
pub mod health;
pub mod identity;
pub mod keychain;
pub mod seeder;
pub mod session;

pub use alerts::{Alert, AlertAction, AlertCoordinator};
pub use health::{AuthorizationStatus, HealthBackend, HealthManager};
pub use identity::{Credential, Scope, SignInError, SignInRequest, SignInResult};
pub use keychain::{Keychain, KeychainKey};
pub use session::SessionManager;
