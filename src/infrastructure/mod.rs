//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - PostgREST: the REST client for the remote character database
//! - Persistence: PostgREST repositories and the SQLite snapshot store
//! - Export: JSON character files
//! - Autosave: periodic local snapshots
//! - Config: Application configuration
//! - State: Shared application state

pub mod autosave;
pub mod config;
pub mod export;
pub mod persistence;
pub mod postgrest;
pub mod state;
