//! The evaluation engine for attack trees.
//!
//! This module provides:
//! - **errors**: Error types for load failures
//! - **tree**: Node storage and structural queries
//! - **gate_eval**: Bottom-up AND/OR likelihood aggregation
//! - **baseline**: Load-time snapshot used by reset
//! - **config**: Session tunables
//! - **session**: The mutate, recompute, summarize protocol

pub mod baseline;
pub mod config;
pub mod errors;
pub mod gate_eval;
pub mod session;
pub mod tree;
