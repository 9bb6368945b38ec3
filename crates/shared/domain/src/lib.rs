//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `chrono`, `strum`).
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod account;
pub mod config;
pub mod constants;
pub mod events;
pub mod flags;
pub mod registry;
pub mod removal;
pub mod toggles;
