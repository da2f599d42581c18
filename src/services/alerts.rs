// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Centralized alert coordination.
//!
//! Serializes failure reports from any producer (session, sync, health
//! permissions) into one FIFO queue with a single presented alert. Every
//! report is guaranteed eventual visibility: nothing is dropped or
//! coalesced, and alerts are presented in exact arrival order.
//!
//! Serialization point: a single mutex around the queue state. The lock
//! is held only for the synchronous transition, never across awaits, so
//! each mutation is one atomic step relative to observers.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::watch;

use crate::error::AppError;

/// A user-facing alert. Immutable once enqueued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub primary: AlertAction,
    pub secondary: Option<AlertAction>,
}

/// A button on an alert. The label is presentation-agnostic; the shell
/// decides what tapping it does beyond dismissal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertAction {
    pub label: String,
}

impl AlertAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    /// The default dismiss action.
    pub fn ok() -> Self {
        Self::new("OK")
    }
}

struct QueueState {
    current: Option<Alert>,
    pending: VecDeque<Alert>,
}

/// Alert coordinator: one presented alert, FIFO backlog behind it.
pub struct AlertCoordinator {
    state: Mutex<QueueState>,
    current_tx: watch::Sender<Option<Alert>>,
}

impl Default for AlertCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertCoordinator {
    pub fn new() -> Self {
        let (current_tx, _) = watch::channel(None);
        Self {
            state: Mutex::new(QueueState {
                current: None,
                pending: VecDeque::new(),
            }),
            current_tx,
        }
    }

    // ─── Reporting ───────────────────────────────────────────────

    /// Present an explicit title + message pair.
    pub fn present(&self, title: impl Into<String>, message: impl Into<String>) {
        self.enqueue(Alert {
            title: title.into(),
            message: message.into(),
            primary: AlertAction::ok(),
            secondary: None,
        });
    }

    /// Report a domain error, with an optional secondary action.
    ///
    /// The message is the error's reason followed, if present, by its
    /// recovery suggestion separated by a blank line.
    pub fn report(&self, error: &AppError, secondary: Option<AlertAction>) {
        let mut message = error.reason();
        if let Some(recovery) = error.recovery_suggestion() {
            if !recovery.is_empty() {
                message.push_str("\n\n");
                message.push_str(recovery);
            }
        }

        self.enqueue(Alert {
            title: error.title().to_string(),
            message,
            primary: AlertAction::ok(),
            secondary,
        });
    }

    /// Report an arbitrary failure as the generic unknown error.
    pub fn report_unknown(&self, error: impl std::fmt::Display) {
        self.report(&AppError::Unknown(anyhow::anyhow!("{}", error)), None);
    }

    // ─── Queue Discipline ────────────────────────────────────────

    /// Dismiss the presented alert and promote the queue head, if any.
    /// No-op when nothing is presented.
    pub fn dismiss_current(&self) {
        let mut state = self.state.lock().unwrap();
        if state.current.is_none() {
            return;
        }

        state.current = state.pending.pop_front();
        match &state.current {
            Some(next) => tracing::info!(title = %next.title, "Alert promoted from queue"),
            None => tracing::info!("Alert dismissed, queue empty"),
        }
        let _ = self.current_tx.send(state.current.clone());
    }

    fn enqueue(&self, alert: Alert) {
        let mut state = self.state.lock().unwrap();
        if state.current.is_some() {
            tracing::info!(title = %alert.title, queued = state.pending.len() + 1, "Alert queued");
            state.pending.push_back(alert);
        } else {
            tracing::info!(title = %alert.title, "Alert presented");
            state.current = Some(alert);
            let _ = self.current_tx.send(state.current.clone());
        }
    }

    // ─── Observation ─────────────────────────────────────────────

    /// Snapshot of the presented alert, if any.
    pub fn current_alert(&self) -> Option<Alert> {
        self.state.lock().unwrap().current.clone()
    }

    /// Number of alerts waiting behind the presented one.
    pub fn pending_count(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }

    /// Subscribe to presented-alert changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Alert>> {
        self.current_tx.subscribe()
    }
}
