//! Core transaction processing
//!
//! The engine serializes every state-changing operation behind a single
//! non-blocking transaction lock, validates all preconditions against
//! snapshots, and commits via wholesale collection writes. Supporting
//! pieces live alongside it: id generation, configuration, and rating
//! aggregation.

pub mod config;
pub mod engine;
pub mod ids;
pub mod ratings;

pub use config::{EngineConfig, VerificationThresholds};
pub use engine::LedgerEngine;
pub use ids::IdGenerator;
