//! Dashgate Directory - record lookup and the dashboard access service
//!
//! The evaluator in `dashgate-authorization` works on fully resolved records.
//! This crate resolves ids into those records and answers the questions asked
//! by id: can this uid open that dashboard, which dashboards does a uid see,
//! who can see a dashboard, which folders show up in a uid's sidebar.
//!
//! Records come from a [`Directory`]. [`InMemoryDirectory`] holds them in
//! memory, usually filled from a [`Snapshot`] of JSON files on disk.

#![forbid(unsafe_code)]

pub mod directory;
pub mod folders;
pub mod service;
pub mod snapshot;

pub use directory::{Directory, InMemoryDirectory};
pub use folders::{FolderTree, VisibleFolder};
pub use service::AccessService;
pub use snapshot::Snapshot;
