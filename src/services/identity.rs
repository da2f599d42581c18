// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity-provider boundary types.
//!
//! The asynchronous credential exchange itself is owned by the platform
//! shell; the core configures the outgoing request and consumes the
//! completed result.

/// Credential scopes the app can request from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    FullName,
    Email,
}

/// An outgoing sign-in request, configured before the shell hands it to
/// the provider.
#[derive(Debug, Default)]
pub struct SignInRequest {
    pub requested_scopes: Vec<Scope>,
}

/// A completed credential from the identity provider.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Stable user identifier issued by the provider
    pub user_id: String,
    /// Email, present only if the user shared it
    pub email: Option<String>,
    /// Formatted full name, present only on first authorization
    pub full_name: Option<String>,
}

/// Failure outcome of a credential exchange.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignInError {
    /// The user dismissed the provider sheet. Not a reportable error.
    #[error("sign-in cancelled by user")]
    Cancelled,

    /// Any other provider failure, with the provider's description.
    #[error("{0}")]
    Failed(String),
}

/// Outcome of the provider's asynchronous exchange.
pub type SignInResult = Result<Credential, SignInError>;
