//! Data Transfer Objects - Row shapes of the relational data API
//!
//! Rows are the flattened, snake_case form of the domain entities. Columns that
//! hold one of the domain's closed enumerations stay plain strings here and are
//! validated when a row is mapped back into the domain.

mod character_rows;
mod entry_rows;

pub use character_rows::{CharacterAttributeRow, CharacterChildRows, CharacterRow, CharacterRows};
pub use entry_rows::{EdgeRow, GearRow, HindranceRow, PowerRow, SkillRow, WeaponRow};

use crate::domain::value_objects::RowId;

/// A row whose identifier decides between insert and merge
pub trait KeyedRow {
    fn id(&self) -> Option<RowId>;
}

/// A row stored in one of the `character_*` child tables
pub trait ChildRow: KeyedRow {
    fn set_character_id(&mut self, character_id: RowId);
}

macro_rules! impl_child_row {
    ($($row:ty),+ $(,)?) => {
        $(
            impl KeyedRow for $row {
                fn id(&self) -> Option<RowId> {
                    self.id
                }
            }

            impl ChildRow for $row {
                fn set_character_id(&mut self, character_id: RowId) {
                    self.character_id = Some(character_id);
                }
            }
        )+
    };
}

impl_child_row!(
    CharacterAttributeRow,
    SkillRow,
    EdgeRow,
    HindranceRow,
    GearRow,
    WeaponRow,
    PowerRow,
);

impl KeyedRow for CharacterRow {
    fn id(&self) -> Option<RowId> {
        self.id
    }
}
