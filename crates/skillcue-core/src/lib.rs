//! # skillcue-core
//!
//! Foundation types shared by every skillcue crate.
//!
//! - [`ids`]: branded conversation identifier
//! - [`logging`]: `tracing` subscriber setup and log-capture helpers for tests
//!
//! ## Crate Position
//!
//! Leaf crate. Depended on by: skillcue-settings, skillcue-skills, skillcue-cli.

#![deny(unsafe_code)]

pub mod ids;
pub mod logging;

pub use ids::ConversationId;
