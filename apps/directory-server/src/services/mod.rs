//! Request orchestration shared by the API handlers.

pub mod profile;
