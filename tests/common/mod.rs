//! Common test utilities for ezproxy CLI tests.
//!
//! - `TestEnv`: isolated home, settings path and `$PATH`
//! - Fixtures: settings documents and a throwaway CA certificate

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
