// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod category;
pub mod user;
pub mod workout;

pub use category::{Category, CategoryKind};
pub use user::{BiologicalSex, UserProfile};
pub use workout::{Exercise, JournalEntry, SplitTime, Workout};
