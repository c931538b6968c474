//! Route definitions for the appledger API.

pub mod auth;
pub mod health;
pub mod inventory;
pub mod report;
