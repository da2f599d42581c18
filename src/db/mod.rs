//! Local data store layer.

pub mod store;

pub use store::{DataStore, StoreError};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const CATEGORIES: &str = "categories";
    pub const WORKOUTS: &str = "workouts";
}
