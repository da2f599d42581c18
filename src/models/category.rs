// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout categories and their platform health-API mapping.
//!
//! The mapping to platform activity-type constants is pure lookup-table
//! glue; the health framework itself stays out of the models.

use serde::{Deserialize, Serialize};

/// A workout category shown in the picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category name (document key)
    pub name: String,
    /// Platform symbol name for the icon
    pub symbol: String,
    /// Color / kind tag, also drives the health-API mapping
    pub kind: CategoryKind,
}

impl Category {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into().trim().to_string(),
            symbol: symbol.into(),
            kind,
        }
    }
}

/// Category kind, mapped onto platform health-API activity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum CategoryKind {
    Cardio,
    CrossTrain,
    Cycling,
    Grappling,
    HIIT,
    Hiking,
    Pilates,
    Power,
    Recovery,
    Rowing,
    Run,
    Stretch,
    Strength,
    Swimming,
    Test,
    Walk,
    Yoga,
}

impl CategoryKind {
    /// Raw platform health-API activity-type constant for this kind.
    pub fn activity_type_raw(self) -> u32 {
        match self {
            CategoryKind::Cardio => 3000,  // mixed cardio
            CategoryKind::CrossTrain => 11,
            CategoryKind::Cycling => 9,
            CategoryKind::Grappling => 39, // martial arts
            CategoryKind::HIIT => 37,
            CategoryKind::Hiking => 27,
            CategoryKind::Pilates => 41,
            CategoryKind::Power => 56,     // traditional strength training
            CategoryKind::Recovery => 18,  // flexibility
            CategoryKind::Rowing => 45,
            CategoryKind::Run => 47,
            CategoryKind::Stretch => 18,   // flexibility
            CategoryKind::Strength => 56,
            CategoryKind::Swimming => 53,
            CategoryKind::Test => 3000,
            CategoryKind::Walk => 61,
            CategoryKind::Yoga => 66,
        }
    }

    /// MET value used for calorie estimation when no live samples exist.
    pub fn met_value(self) -> f64 {
        match self {
            CategoryKind::Cardio => 8.0,
            CategoryKind::CrossTrain => 8.0,
            CategoryKind::Cycling => 8.0,
            CategoryKind::Grappling => 10.3,
            CategoryKind::HIIT => 8.0,
            CategoryKind::Hiking => 7.3,
            CategoryKind::Pilates => 3.0,
            CategoryKind::Power => 6.0,
            CategoryKind::Recovery => 2.5,
            CategoryKind::Rowing => 7.0,
            CategoryKind::Run => 10.0,
            CategoryKind::Stretch => 2.3,
            CategoryKind::Strength => 3.5,
            CategoryKind::Swimming => 6.0,
            CategoryKind::Test => 5.0,
            CategoryKind::Walk => 3.5,
            CategoryKind::Yoga => 3.0,
        }
    }

    pub const ALL: [CategoryKind; 17] = [
        CategoryKind::Cardio,
        CategoryKind::CrossTrain,
        CategoryKind::Cycling,
        CategoryKind::Grappling,
        CategoryKind::HIIT,
        CategoryKind::Hiking,
        CategoryKind::Pilates,
        CategoryKind::Power,
        CategoryKind::Recovery,
        CategoryKind::Rowing,
        CategoryKind::Run,
        CategoryKind::Stretch,
        CategoryKind::Strength,
        CategoryKind::Swimming,
        CategoryKind::Test,
        CategoryKind::Walk,
        CategoryKind::Yoga,
    ];
}
