//! Test utilities for tskit-build unit tests.
//!
//! Unit tests work against real temporary directories rather than mocks:
//! everything this crate reads is local filesystem state.

pub mod fixtures;

pub use fixtures::*;
