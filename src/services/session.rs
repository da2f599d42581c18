// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session manager: the signed-in/signed-out state machine.
//!
//! Reconciles an externally issued identity credential with the locally
//! persisted user profile and is the sole writer of "current user". The
//! cached identity string in the keychain is the source of truth for who
//! was last signed in; the profile row in the store is durable and
//! retained across sign-outs.
//!
//! Serialization point: one mutex around the session cell. Store and
//! keychain I/O happens outside the lock; every observable mutation is a
//! single lock scope. Each in-flight operation captures the session
//! generation at entry and re-checks it before installing its result, so
//! a completion that lost a race with sign-out (or a newer sign-in) is
//! discarded instead of resurrecting a stale session.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::db::{DataStore, StoreError};
use crate::models::UserProfile;
use crate::services::alerts::AlertCoordinator;
use crate::services::identity::{Credential, Scope, SignInRequest, SignInResult};
use crate::services::keychain::{Keychain, KeychainKey};

struct SessionState {
    current_user: Option<UserProfile>,
    /// Monotonic counter, advanced by sign-out and by each installed
    /// sign-in. In-flight completions from an older generation are stale.
    generation: u64,
}

/// Session manager. One per process, shared between phone and watch UI.
pub struct SessionManager {
    store: DataStore,
    keychain: Arc<Keychain>,
    alerts: Arc<AlertCoordinator>,
    state: Mutex<SessionState>,
    session_tx: watch::Sender<Option<UserProfile>>,
}

impl SessionManager {
    pub fn new(store: DataStore, keychain: Arc<Keychain>, alerts: Arc<AlertCoordinator>) -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            store,
            keychain,
            alerts,
            state: Mutex::new(SessionState {
                current_user: None,
                generation: 0,
            }),
            session_tx,
        }
    }

    // ─── Public API ──────────────────────────────────────────────

    /// Restore a previous session from the cached identity, if any.
    ///
    /// Called once at process start. A missing cached identity is the
    /// normal signed-out path; a cached identity with no matching profile
    /// is soft data and also leaves the session signed out, silently.
    pub async fn restore_session(&self) {
        let Some(identity_id) = self.keychain.read(KeychainKey::IdentityUserId) else {
            tracing::debug!("No cached identity, starting signed out");
            return;
        };

        let generation = self.state.lock().unwrap().generation;

        match self.store.find_user_by_identity(&identity_id).await {
            Ok(Some(profile)) => {
                if self.install_user(profile, generation) {
                    tracing::info!(
                        identity = %redact(&identity_id),
                        "Session restored"
                    );
                }
            }
            Ok(None) => {
                tracing::debug!(
                    identity = %redact(&identity_id),
                    "Cached identity has no matching profile, staying signed out"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile lookup failed during restore");
            }
        }
    }

    /// Configure an outgoing identity-provider request. Pure.
    pub fn begin_sign_in(&self, request: &mut SignInRequest) {
        request.requested_scopes = vec![Scope::FullName, Scope::Email];
        tracing::info!("Identity request prepared");
    }

    /// Complete a sign-in with the provider's result.
    ///
    /// On success the identity is cached, the profile resolved or created
    /// (idempotently), and installed as the current user. Cancellation is
    /// suppressed; any other failure surfaces through the alert
    /// coordinator as the generic unknown error.
    pub async fn complete_sign_in(&self, result: SignInResult) {
        match result {
            Ok(credential) => self.process_credential(credential).await,
            Err(crate::services::identity::SignInError::Cancelled) => {
                tracing::debug!("Sign-in cancelled by user");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in failed");
                self.alerts.report_unknown(e);
            }
        }
    }

    /// Sign out: erase the cached identity and clear the current user.
    ///
    /// Unconditional and synchronous; the profile row is retained for
    /// future re-sign-in.
    pub fn sign_out(&self) {
        self.keychain.delete(KeychainKey::IdentityUserId);

        let mut state = self.state.lock().unwrap();
        state.generation += 1;
        state.current_user = None;
        let _ = self.session_tx.send(None);

        tracing::info!("User signed out");
    }

    /// Mark onboarding complete for the current user, best effort.
    pub async fn complete_onboarding(&self) {
        // Capture the profile and generation in one lock scope at entry,
        // so a sign-out interleaving with the save below makes this
        // result stale instead of resurrecting the session.
        let (mut profile, generation) = {
            let state = self.state.lock().unwrap();
            match &state.current_user {
                Some(profile) => (profile.clone(), state.generation),
                None => return,
            }
        };
        profile.is_onboarding_complete = true;

        if let Err(e) = self.store.update_user(profile.clone()).await {
            tracing::warn!(error = %e, "Onboarding flag not saved");
        }

        self.install_user(profile, generation);
    }

    // ─── Observation ─────────────────────────────────────────────

    pub fn is_signed_in(&self) -> bool {
        self.state.lock().unwrap().current_user.is_some()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.lock().unwrap().current_user.clone()
    }

    /// Subscribe to current-user changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.session_tx.subscribe()
    }

    // ─── Credential Processing ───────────────────────────────────

    async fn process_credential(&self, credential: Credential) {
        let generation = self.state.lock().unwrap().generation;

        // The keychain entry is the source of truth for restore_session.
        self.keychain
            .save(&credential.user_id, KeychainKey::IdentityUserId);

        if let Some(profile) = self.resolve_or_create(&credential).await {
            if self.install_user(profile, generation) {
                tracing::info!(
                    identity = %redact(&credential.user_id),
                    "Signed in"
                );
            } else {
                self.uncache_discarded_identity(&credential.user_id);
            }
        }
    }

    /// Drop the keychain entry a discarded sign-in left behind.
    ///
    /// Only removes the entry if it still holds this sign-in's identity:
    /// when the staleness came from a newer sign-in rather than a
    /// sign-out, the keychain already holds the newer identity and must
    /// be left alone. Without this, a sign-out racing the keychain save
    /// leaves the stale identity cached and the next restore would
    /// silently re-sign-in a signed-out user.
    fn uncache_discarded_identity(&self, user_id: &str) {
        if self.keychain.read(KeychainKey::IdentityUserId).as_deref() == Some(user_id) {
            tracing::info!(
                identity = %redact(user_id),
                "Removing cached identity from discarded sign-in"
            );
            self.keychain.delete(KeychainKey::IdentityUserId);
        }
    }

    /// Find the profile for this identity, or create it on first sign-in.
    ///
    /// Idempotent: the store's uniqueness constraint on the identity
    /// string means a concurrent create (companion device, sync race) is
    /// detected and the existing row is re-fetched instead of duplicated.
    /// All persistence failures here are best-effort: a miss or failed
    /// save costs a re-prompt on next launch, not a user-facing error.
    async fn resolve_or_create(&self, credential: &Credential) -> Option<UserProfile> {
        // Lookup failure is treated as "not found"; the insert's
        // constraint check still protects against duplication.
        match self.store.find_user_by_identity(&credential.user_id).await {
            Ok(Some(existing)) => return Some(existing),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Profile lookup failed, attempting create");
            }
        }

        let profile = UserProfile::new(
            credential.user_id.clone(),
            credential.email.clone(),
            credential.full_name.clone(),
        );

        match self.store.insert_user(profile.clone()).await {
            Ok(()) => Some(profile),
            Err(StoreError::UniqueViolation { .. }) => {
                tracing::debug!("Profile already exists, re-fetching");
                self.store
                    .find_user_by_identity(&credential.user_id)
                    .await
                    .ok()
                    .flatten()
            }
            Err(e) => {
                // Not saved; keep the in-memory session usable anyway.
                tracing::warn!(error = %e, "Profile save failed");
                Some(profile)
            }
        }
    }

    /// Install a profile as the current user if the session generation
    /// has not advanced since `observed_generation` was captured.
    ///
    /// Returns false when the result is stale (a sign-out or newer
    /// sign-in happened while this operation was in flight).
    fn install_user(&self, profile: UserProfile, observed_generation: u64) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.generation != observed_generation {
            tracing::warn!(
                observed = observed_generation,
                current = state.generation,
                "Discarding stale sign-in result"
            );
            return false;
        }

        state.generation += 1;
        state.current_user = Some(profile.clone());
        let _ = self.session_tx.send(Some(profile));
        true
    }
}

/// Log-safe prefix of an identity string.
fn redact(identity_id: &str) -> String {
    let prefix: String = identity_id.chars().take(8).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(
            DataStore::in_memory(),
            Arc::new(Keychain::in_memory()),
            Arc::new(AlertCoordinator::new()),
        )
    }

    #[tokio::test]
    async fn test_stale_install_discarded_after_sign_out() {
        let manager = manager();

        // Simulate an in-flight sign-in: capture the generation, then
        // have a sign-out advance it before the result lands.
        let observed = manager.state.lock().unwrap().generation;
        manager.sign_out();

        let profile = UserProfile::new("late".to_string(), None, None);
        assert!(!manager.install_user(profile, observed));
        assert!(!manager.is_signed_in());
    }

    #[tokio::test]
    async fn test_stale_onboarding_update_discarded_after_sign_out() {
        let manager = manager();

        let credential = Credential {
            user_id: "user-1".to_string(),
            email: None,
            full_name: None,
        };
        manager.complete_sign_in(Ok(credential)).await;

        // An onboarding update captures the generation at entry; a
        // sign-out landing before its result installs makes it stale.
        let observed = manager.state.lock().unwrap().generation;
        manager.sign_out();

        let mut profile = UserProfile::new("user-1".to_string(), None, None);
        profile.is_onboarding_complete = true;
        assert!(!manager.install_user(profile, observed));
        assert!(!manager.is_signed_in());
    }

    #[tokio::test]
    async fn test_onboarding_after_sign_out_is_noop() {
        let manager = manager();

        let credential = Credential {
            user_id: "user-1".to_string(),
            email: None,
            full_name: None,
        };
        manager.complete_sign_in(Ok(credential)).await;
        manager.sign_out();

        manager.complete_onboarding().await;

        assert!(!manager.is_signed_in());
        let stored = manager
            .store
            .find_user_by_identity("user-1")
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_onboarding_complete);
    }

    #[tokio::test]
    async fn test_discarded_sign_in_removes_its_cached_identity() {
        let manager = manager();

        // A sign-out races the credential processing: the identity was
        // already cached, then the install is discarded as stale.
        manager.keychain.save("user-1", KeychainKey::IdentityUserId);
        manager.uncache_discarded_identity("user-1");

        assert_eq!(manager.keychain.read(KeychainKey::IdentityUserId), None);
    }

    #[tokio::test]
    async fn test_discarded_sign_in_keeps_newer_cached_identity() {
        let manager = manager();

        // The staleness came from a newer sign-in, not a sign-out: the
        // keychain holds the newer identity and must survive.
        manager.keychain.save("user-2", KeychainKey::IdentityUserId);
        manager.uncache_discarded_identity("user-1");

        assert_eq!(
            manager.keychain.read(KeychainKey::IdentityUserId).as_deref(),
            Some("user-2")
        );
    }

    #[tokio::test]
    async fn test_install_advances_generation() {
        let manager = manager();

        let observed = manager.state.lock().unwrap().generation;
        let profile = UserProfile::new("first".to_string(), None, None);
        assert!(manager.install_user(profile, observed));

        // A second in-flight result from the same observation point is
        // now stale too.
        let profile = UserProfile::new("second".to_string(), None, None);
        assert!(!manager.install_user(profile, observed));
        assert_eq!(manager.current_user().unwrap().identity_id, "first");
    }
}
