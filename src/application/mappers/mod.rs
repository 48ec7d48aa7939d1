//! Mappers - Conversion between domain entities and relational rows
//!
//! `to_row` renames fields one-for-one and never fails. `from_row` rebuilds the
//! exact domain value and rejects enumeration columns holding unknown values
//! instead of substituting a default.

mod character_mapper;
mod entry_mappers;

pub use character_mapper::{
    assemble_character, attribute_from_row, attribute_to_row, disassemble_character,
};

use thiserror::Error;

use crate::domain::value_objects::RowId;
use crate::domain::DomainError;

/// Bidirectional conversion between an entity and its row
pub trait RowMapper: Sized {
    type Row;

    fn to_row(&self) -> Self::Row;

    fn from_row(row: Self::Row) -> Result<Self, MappingError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("{entity} row {}: {source}", display_id(.id))]
    InvalidColumn {
        entity: &'static str,
        id: Option<RowId>,
        #[source]
        source: DomainError,
    },
}

fn display_id(id: &Option<RowId>) -> String {
    id.map_or_else(|| "(new)".to_string(), |id| id.to_string())
}

/// Parses enumeration columns of one row, tagging failures with the row
struct ColumnParser {
    entity: &'static str,
    id: Option<RowId>,
}

impl ColumnParser {
    fn new(entity: &'static str, id: Option<RowId>) -> Self {
        Self { entity, id }
    }

    fn parse<T>(&self, raw: &str) -> Result<T, MappingError>
    where
        T: std::str::FromStr<Err = DomainError>,
    {
        raw.parse().map_err(|source| MappingError::InvalidColumn {
            entity: self.entity,
            id: self.id,
            source,
        })
    }
}
