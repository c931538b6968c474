//! Business logic services.

pub mod auth;
pub mod inventory;
pub mod report;
