//! core
//!
//! Domain types, configuration, paths, and the run lock.
//!
//! # Responsibilities
//!
//! - Validated domain newtypes ([`types`])
//! - Two-scope configuration with precedence ([`config`])
//! - Centralized workspace path routing ([`paths`])
//! - Exclusive ingest run lock ([`lock`])

pub mod config;
pub mod lock;
pub mod paths;
pub mod types;
