//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Assertion helpers for KB values
//! - Sample application and config fixtures
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::AppsFixture;
//!
//! let apps = AppsFixture::new().unwrap();
//! apps.vite_app("vue", "console.log(1)").unwrap();
//! ```

pub mod assertions;
pub mod fixtures;

/// Check if running in CI environment
#[allow(dead_code)]
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok() || std::env::var("GITHUB_ACTIONS").is_ok()
}
