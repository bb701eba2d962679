//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Assertion helpers for metrics records
//! - Fixture loading and temporary project setup
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::assertions::*;
//! use common::fixtures;
//!
//! fn test_redux_sizes() {
//!     let code = fixtures::read_fixture("redux.js");
//!     let record = measure(&code);
//!     assert_core_metrics(&record, code.len() as u64);
//! }
//! ```

pub mod assertions;
pub mod fixtures;
