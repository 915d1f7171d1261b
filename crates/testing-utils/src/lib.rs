//! # Korres Testing Utils
//!
//! Shared testing utilities for the reservation automation service.
//! This crate provides mock implementations of the port traits and
//! test data builders that can be used across all other crates in
//! the workspace.
//!
//! ## Usage
//!
//! Add this crate as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! korres-testing-utils = { path = "../testing-utils" }
//! ```

pub mod builders;
pub mod mocks;

// Re-export commonly used items
pub use builders::*;
pub use mocks::*;
