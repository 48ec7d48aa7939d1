//! Rows of the `characters` and `character_attributes` tables

use serde::{Deserialize, Serialize};

use super::{EdgeRow, GearRow, HindranceRow, PowerRow, SkillRow, WeaponRow};
use crate::domain::value_objects::RowId;

/// Main `characters` row: scalar fields plus the flattened derived stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub name: String,
    #[serde(default)]
    pub race: Option<String>,
    pub rank: String,
    pub experience: u32,
    pub pace: i32,
    pub parry: i32,
    pub toughness: i32,
    pub charisma: i32,
    pub wounds: u32,
    pub fatigue: u32,
    pub bennies: u32,
    pub power_points: u32,
}

/// One `character_attributes` row per attribute name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterAttributeRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<RowId>,
    pub attribute: String,
    pub die: String,
    pub modifier: i32,
}

/// The seven child collections of one character, as fetched or about to be written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterChildRows {
    pub attributes: Vec<CharacterAttributeRow>,
    pub skills: Vec<SkillRow>,
    pub edges: Vec<EdgeRow>,
    pub hindrances: Vec<HindranceRow>,
    pub gear: Vec<GearRow>,
    pub weapons: Vec<WeaponRow>,
    pub powers: Vec<PowerRow>,
}

impl CharacterChildRows {
    /// Tag every child row with the owning character's identifier
    pub fn assign_character_id(&mut self, character_id: RowId) {
        use super::ChildRow;

        self.attributes.iter_mut().for_each(|r| r.set_character_id(character_id));
        self.skills.iter_mut().for_each(|r| r.set_character_id(character_id));
        self.edges.iter_mut().for_each(|r| r.set_character_id(character_id));
        self.hindrances.iter_mut().for_each(|r| r.set_character_id(character_id));
        self.gear.iter_mut().for_each(|r| r.set_character_id(character_id));
        self.weapons.iter_mut().for_each(|r| r.set_character_id(character_id));
        self.powers.iter_mut().for_each(|r| r.set_character_id(character_id));
    }

    /// Total number of child rows
    pub fn row_count(&self) -> usize {
        self.attributes.len()
            + self.skills.len()
            + self.edges.len()
            + self.hindrances.len()
            + self.gear.len()
            + self.weapons.len()
            + self.powers.len()
    }
}

/// A character split into its main row and child row collections
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRows {
    pub main: CharacterRow,
    pub children: CharacterChildRows,
}
