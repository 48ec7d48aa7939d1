//! Wildcard Sheet - Savage Worlds character sheet storage
//!
//! The crate keeps a character record in memory and persists it three ways:
//! - Local snapshots in SQLite, refreshed on an interval
//! - JSON files for export/import
//! - A PostgREST data API, with the nested character flattened into rows

pub mod application;
pub mod domain;
pub mod infrastructure;
