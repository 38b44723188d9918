//! Dashgate Authorization - dashboard access decisions
//!
//! This crate owns the one canonical answer to "can this user see this
//! dashboard, and why". Everything that needs the answer goes through
//! [`AccessEvaluator`]; nothing else re-implements the layer rules.
//!
//! # Modules
//!
//! - [`evaluator`]: the three-layer access evaluator
//! - [`decision`]: decisions and provenance (`reason`, `grantedBy`)
//! - [`capabilities`]: owner/admin actions on an accessible dashboard
//! - [`features`]: role-level application feature switches
//! - [`management`]: the sanctioned mutations of grants and restrictions

#![forbid(unsafe_code)]

pub mod capabilities;
pub mod decision;
pub mod evaluator;
pub mod features;
pub mod management;

pub use capabilities::{DashboardCapabilities, DashboardCard};
pub use decision::{AccessDecision, AccessReason, GrantKind, GrantLayer, GrantedBy};
pub use evaluator::AccessEvaluator;
pub use features::{Feature, FeaturePermissions};
pub use management::{PermissionAction, PermissionChange, PermissionEditor, SavePermissions};
