//! Dashgate Testkit - shared test infrastructure
//!
//! Builders, a sample organisation, proptest strategies and tracing setup used
//! by the tests of every dashgate crate. Depends on `dashgate-core` only.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

pub mod builders;
pub mod fixtures;
pub mod strategies;

pub use builders::{user, DashboardBuilder};
pub use fixtures::{
    reference_now, sample_dashboards, sample_folders, sample_users, write_sample_snapshot,
};

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per process.
///
/// Honours `RUST_LOG`; defaults to `warn`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
