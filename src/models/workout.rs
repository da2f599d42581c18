// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout, exercise, and split-time models.

use serde::{Deserialize, Serialize};

/// A workout template with its exercises and completion history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Document key
    pub id: u64,
    pub title: String,
    /// Category name (see [`crate::models::Category`])
    pub category: String,
    /// Duration of the most recent session, in seconds
    #[serde(default)]
    pub last_session_duration: f64,
    /// When the workout was created (ISO 8601)
    pub date_created: String,
    /// When the workout was last completed (ISO 8601)
    pub date_completed: Option<String>,
    /// Whether the workout repeats its exercises in rounds
    #[serde(default)]
    pub rounds_enabled: bool,
    /// Number of rounds when enabled
    #[serde(default = "default_rounds")]
    pub rounds_quantity: u32,
    /// Fastest completed time in seconds, across all sessions
    pub fastest_time: Option<f64>,
    /// Exercises in user-defined order
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Completion history
    #[serde(default)]
    pub history: Vec<JournalEntry>,
}

fn default_rounds() -> u32 {
    1
}

impl Workout {
    pub fn new(id: u64, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            last_session_duration: 0.0,
            date_created: chrono::Utc::now().to_rfc3339(),
            date_completed: None,
            rounds_enabled: false,
            rounds_quantity: 1,
            fastest_time: None,
            exercises: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Exercises sorted by their user-defined order.
    pub fn sorted_exercises(&self) -> Vec<&Exercise> {
        let mut sorted: Vec<&Exercise> = self.exercises.iter().collect();
        sorted.sort_by_key(|e| e.order);
        sorted
    }

    /// Record a completed session, updating duration and fastest time.
    pub fn record_session(&mut self, duration_seconds: f64, now: &str) {
        self.last_session_duration = duration_seconds;
        self.date_completed = Some(now.to_string());
        self.fastest_time = match self.fastest_time {
            Some(best) if best <= duration_seconds => Some(best),
            _ => Some(duration_seconds),
        };
        self.history.push(JournalEntry {
            date: now.to_string(),
            duration_seconds,
            note: None,
        });
    }
}

/// A single exercise within a workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Position within the workout
    pub order: u32,
    /// Timed splits recorded for this exercise
    #[serde(default)]
    pub split_times: Vec<SplitTime>,
}

/// One timed split within an exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitTime {
    pub duration_seconds: f64,
    pub order: u32,
}

/// One completed-session journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Completion date (ISO 8601)
    pub date: String,
    pub duration_seconds: f64,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_exercises_by_order() {
        let mut workout = Workout::new(1, "Intervals", "Run");
        workout.exercises = vec![
            Exercise {
                name: "Cooldown".to_string(),
                order: 2,
                split_times: vec![],
            },
            Exercise {
                name: "Warmup".to_string(),
                order: 0,
                split_times: vec![],
            },
            Exercise {
                name: "Sprints".to_string(),
                order: 1,
                split_times: vec![],
            },
        ];

        let names: Vec<&str> = workout
            .sorted_exercises()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["Warmup", "Sprints", "Cooldown"]);
    }

    #[test]
    fn test_record_session_keeps_fastest_time() {
        let mut workout = Workout::new(1, "Intervals", "Run");
        let now = chrono::Utc::now().to_rfc3339();

        workout.record_session(300.0, &now);
        assert_eq!(workout.fastest_time, Some(300.0));

        workout.record_session(350.0, &now);
        assert_eq!(workout.fastest_time, Some(300.0));

        workout.record_session(280.0, &now);
        assert_eq!(workout.fastest_time, Some(280.0));
        assert_eq!(workout.history.len(), 3);
        assert_eq!(workout.last_session_duration, 280.0);
    }
}
