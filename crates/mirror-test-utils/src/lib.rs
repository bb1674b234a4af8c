//! Shared test utilities for the mirror workspace.
//!
//! This crate provides standardised test fixtures so that crate test suites
//! do not each rebuild their own temporary trees. It is a dev-dependency
//! only and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`](tree::TestTree) builder for one side of a comparison

pub mod tree;
