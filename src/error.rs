// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with user-facing alert text.

/// Application error type for failures that may be surfaced to the user.
///
/// Soft failures (cache misses, best-effort save failures) are never
/// represented here — they are swallowed at the call site. Everything in
/// this enum carries enough text to be shown as an alert.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database Error")]
    Database,

    #[error("Cloud Sync Unavailable")]
    CloudSyncUnavailable,

    #[error("Health Access Required")]
    HealthNotAuthorized,

    #[error("Health Data Not Available")]
    HealthUnavailable,

    #[error("Purchase Failed")]
    PurchaseFailed,

    #[error("Permission Denied")]
    PermissionDenied,

    #[error("Something Went Wrong")]
    Unknown(#[from] anyhow::Error),
}

impl AppError {
    /// Alert title shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Database => "Database Error",
            AppError::CloudSyncUnavailable => "Cloud Sync Unavailable",
            AppError::HealthNotAuthorized => "Health Access Required",
            AppError::HealthUnavailable => "Health Data Not Available",
            AppError::PurchaseFailed => "Purchase Failed",
            AppError::PermissionDenied => "Permission Denied",
            AppError::Unknown(_) => "Something Went Wrong",
        }
    }

    /// Human-readable failure reason.
    pub fn reason(&self) -> String {
        match self {
            AppError::Database => "We couldn't save your workout right now.".to_string(),
            AppError::CloudSyncUnavailable => {
                "Your device is offline or cloud sync is not available.".to_string()
            }
            AppError::HealthNotAuthorized => {
                "PulseSplit needs Health access to track heart rate, calories, and routes."
                    .to_string()
            }
            AppError::HealthUnavailable => {
                "Health data is not supported on this device.".to_string()
            }
            AppError::PurchaseFailed => "The purchase could not be completed.".to_string(),
            AppError::PermissionDenied => {
                "PulseSplit does not have permission to perform this action.".to_string()
            }
            AppError::Unknown(err) => err.to_string(),
        }
    }

    /// Optional recovery suggestion, appended to the alert message.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            AppError::Database | AppError::CloudSyncUnavailable => {
                Some("Your data is safe and will sync when possible. Keep training.")
            }
            AppError::HealthNotAuthorized => Some("Tap below to open Settings and grant access."),
            AppError::HealthUnavailable => {
                Some("Some features will be limited without health data.")
            }
            AppError::PurchaseFailed => Some("Try again later or contact support."),
            AppError::PermissionDenied => Some("You can grant permission in Settings."),
            AppError::Unknown(_) => Some("Please try again. Restart the app if needed."),
        }
    }
}

/// Result type alias for fallible core operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_carries_source_description() {
        let err = AppError::Unknown(anyhow::anyhow!("identity provider timed out"));
        assert_eq!(err.title(), "Something Went Wrong");
        assert_eq!(err.reason(), "identity provider timed out");
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_every_variant_has_title_and_reason() {
        let variants = [
            AppError::Database,
            AppError::CloudSyncUnavailable,
            AppError::HealthNotAuthorized,
            AppError::HealthUnavailable,
            AppError::PurchaseFailed,
            AppError::PermissionDenied,
        ];
        for err in variants {
            assert!(!err.title().is_empty());
            assert!(!err.reason().is_empty());
        }
    }
}
