//! Shared test fixtures for Outrank crates.
//!
//! - [`fixtures`] - hand-built decision problems with known outcomes
//! - [`strategy`] - `proptest` strategies for random valid problems
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! outrank-test = { workspace = true }
//! ```
//!
//! ```
//! use outrank_test::fixtures;
//!
//! let problem = fixtures::single_criterion_min();
//! assert_eq!(problem.alternative_count(), 3);
//! ```

pub mod fixtures;
pub mod strategy;

pub use fixtures::{mutual_pair, recycling, single_criterion_min, three_cycle};
pub use strategy::arb_problem;
