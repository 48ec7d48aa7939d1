//! Domain layer - Character sheet types with no I/O
//!
//! This layer contains:
//! - Entities: Character and the owned skills, edges, hindrances, gear, weapons, powers
//! - Value Objects: ranks, die types, attribute names, source tags, row identifiers
//! - Errors: rejection of values outside the closed enumerations

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
