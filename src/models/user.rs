//! User profile model for storage and session state.

use serde::{Deserialize, Serialize};

/// Durable user profile, keyed by external identity string.
///
/// Created exactly once on first successful sign-in and never deleted by
/// the core; the store enforces at most one profile per identity string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable identifier from the identity provider (also the document key)
    pub identity_id: String,
    /// Whether onboarding (permissions, setup) has been completed
    pub is_onboarding_complete: bool,
    /// Email address (may be None if not shared by the provider)
    pub email: Option<String>,
    /// Display name from the credential or user-entered
    pub display_name: Option<String>,
    /// Free-form fitness goal
    pub fitness_goal: Option<String>,
    /// Body weight in kg
    pub weight_kg: Option<f64>,
    /// Height in cm
    pub height_cm: Option<f64>,
    /// Age in years, used for max HR estimation
    pub age: Option<u32>,
    /// Resting heart rate in bpm
    pub resting_heart_rate: Option<f64>,
    /// Max heart rate in bpm; user-entered or estimated
    pub max_heart_rate: Option<f64>,
    /// Biological sex for HR zone personalization
    pub biological_sex: Option<BiologicalSex>,
    /// When the profile was first created (ISO 8601)
    pub created_at: String,
}

impl UserProfile {
    /// Create a fresh profile from a first-time credential.
    pub fn new(identity_id: String, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            identity_id,
            is_onboarding_complete: false,
            email,
            display_name,
            fitness_goal: Some("General Fitness".to_string()),
            weight_kg: None,
            height_cm: None,
            age: None,
            resting_heart_rate: None,
            max_heart_rate: None,
            biological_sex: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Estimated max heart rate (220 - age) when not explicitly set.
    pub fn estimated_max_heart_rate(&self) -> Option<f64> {
        self.max_heart_rate
            .or_else(|| self.age.map(|age| 220.0 - age as f64))
    }
}

/// Biological sex, simplified for HR zone personalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiologicalSex {
    Female,
    Male,
    Other,
    NotSet,
}
