// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use pulsesplit_core::error::AppError;
use pulsesplit_core::services::AlertCoordinator;

#[test]
fn test_alerts_presented_in_arrival_order() {
    let coordinator = AlertCoordinator::new();

    coordinator.present("A", "first");
    coordinator.present("B", "second");
    coordinator.present("C", "third");

    assert_eq!(coordinator.current_alert().unwrap().title, "A");
    assert_eq!(coordinator.pending_count(), 2);

    coordinator.dismiss_current();
    assert_eq!(coordinator.current_alert().unwrap().title, "B");

    coordinator.dismiss_current();
    assert_eq!(coordinator.current_alert().unwrap().title, "C");
    assert_eq!(coordinator.pending_count(), 0);

    coordinator.dismiss_current();
    assert!(coordinator.current_alert().is_none());
}

#[test]
fn test_dismiss_on_idle_is_noop() {
    let coordinator = AlertCoordinator::new();

    coordinator.dismiss_current();
    assert!(coordinator.current_alert().is_none());
    assert_eq!(coordinator.pending_count(), 0);
}

#[test]
fn test_report_on_idle_presents_immediately() {
    let coordinator = AlertCoordinator::new();

    coordinator.report(&AppError::CloudSyncUnavailable, None);

    let alert = coordinator.current_alert().unwrap();
    assert_eq!(alert.title, "Cloud Sync Unavailable");
    assert_eq!(coordinator.pending_count(), 0);
}

#[test]
fn test_report_while_showing_queues_behind_current() {
    let coordinator = AlertCoordinator::new();

    coordinator.report(&AppError::Database, None);
    coordinator.report(&AppError::PurchaseFailed, None);

    // Current alert is untouched by the second report
    assert_eq!(coordinator.current_alert().unwrap().title, "Database Error");
    assert_eq!(coordinator.pending_count(), 1);

    coordinator.dismiss_current();
    assert_eq!(
        coordinator.current_alert().unwrap().title,
        "Purchase Failed"
    );
}

#[test]
fn test_dismissal_after_backlog_drains_returns_to_idle() {
    let coordinator = AlertCoordinator::new();

    coordinator.present("only", "one alert");
    coordinator.dismiss_current();

    assert!(coordinator.current_alert().is_none());

    // Coordinator keeps working after going idle
    coordinator.present("again", "back");
    assert_eq!(coordinator.current_alert().unwrap().title, "again");
}

#[tokio::test]
async fn test_concurrent_reports_all_reach_presentation() {
    let coordinator = std::sync::Arc::new(AlertCoordinator::new());
    const PRODUCERS: usize = 16;

    let mut handles = vec![];
    for i in 0..PRODUCERS {
        let coordinator = coordinator.clone();
        handles.push(tokio::spawn(async move {
            coordinator.present(format!("alert-{}", i), "concurrent");
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Exactly one presented, the rest queued; none dropped
    let mut seen = 0;
    while coordinator.current_alert().is_some() {
        seen += 1;
        coordinator.dismiss_current();
    }
    assert_eq!(seen, PRODUCERS);
}
