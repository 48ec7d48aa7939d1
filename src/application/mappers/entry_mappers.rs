//! Row mappings for the entries a character owns

use super::{ColumnParser, MappingError, RowMapper};
use crate::application::dto::{EdgeRow, GearRow, HindranceRow, PowerRow, SkillRow, WeaponRow};
use crate::domain::entities::{Edge, Gear, Hindrance, Power, Skill, Weapon};

impl RowMapper for Skill {
    type Row = SkillRow;

    fn to_row(&self) -> SkillRow {
        SkillRow {
            id: self.id,
            character_id: None,
            name: self.name.clone(),
            die: self.die.to_string(),
            modifier: self.modifier,
            linked_attribute: self.linked_attribute.to_string(),
            source_id: self.source_id.to_string(),
            source_page: self.source_page,
            language: self.language.to_string(),
        }
    }

    fn from_row(row: SkillRow) -> Result<Self, MappingError> {
        let columns = ColumnParser::new("skill", row.id);
        Ok(Self {
            id: row.id,
            die: columns.parse(&row.die)?,
            modifier: row.modifier,
            linked_attribute: columns.parse(&row.linked_attribute)?,
            source_id: columns.parse(&row.source_id)?,
            source_page: row.source_page,
            language: columns.parse(&row.language)?,
            name: row.name,
        })
    }
}

impl RowMapper for Edge {
    type Row = EdgeRow;

    fn to_row(&self) -> EdgeRow {
        EdgeRow {
            id: self.id,
            character_id: None,
            name: self.name.clone(),
            description: self.description.clone(),
            source_id: self.source_id.to_string(),
            source_page: self.source_page,
            language: self.language.to_string(),
        }
    }

    fn from_row(row: EdgeRow) -> Result<Self, MappingError> {
        let columns = ColumnParser::new("edge", row.id);
        Ok(Self {
            id: row.id,
            source_id: columns.parse(&row.source_id)?,
            source_page: row.source_page,
            language: columns.parse(&row.language)?,
            name: row.name,
            description: row.description,
        })
    }
}

impl RowMapper for Hindrance {
    type Row = HindranceRow;

    fn to_row(&self) -> HindranceRow {
        HindranceRow {
            id: self.id,
            character_id: None,
            name: self.name.clone(),
            description: self.description.clone(),
            hindrance_type: self.severity.to_string(),
            source_id: self.source_id.to_string(),
            source_page: self.source_page,
            language: self.language.to_string(),
        }
    }

    fn from_row(row: HindranceRow) -> Result<Self, MappingError> {
        let columns = ColumnParser::new("hindrance", row.id);
        Ok(Self {
            id: row.id,
            severity: columns.parse(&row.hindrance_type)?,
            source_id: columns.parse(&row.source_id)?,
            source_page: row.source_page,
            language: columns.parse(&row.language)?,
            name: row.name,
            description: row.description,
        })
    }
}

impl RowMapper for Gear {
    type Row = GearRow;

    fn to_row(&self) -> GearRow {
        GearRow {
            id: self.id,
            character_id: None,
            name: self.name.clone(),
            weight: self.weight,
            notes: self.notes.clone(),
            source_id: self.source_id.to_string(),
            source_page: self.source_page,
        }
    }

    fn from_row(row: GearRow) -> Result<Self, MappingError> {
        let columns = ColumnParser::new("gear", row.id);
        Ok(Self {
            id: row.id,
            source_id: columns.parse(&row.source_id)?,
            source_page: row.source_page,
            name: row.name,
            weight: row.weight,
            notes: row.notes,
        })
    }
}

impl RowMapper for Weapon {
    type Row = WeaponRow;

    fn to_row(&self) -> WeaponRow {
        WeaponRow {
            id: self.id,
            character_id: None,
            name: self.name.clone(),
            damage: self.damage.clone(),
            range: self.range.clone(),
            ap: self.ap,
            weight: self.weight,
            notes: self.notes.clone(),
            source_id: self.source_id.to_string(),
            source_page: self.source_page,
            language: self.language.to_string(),
        }
    }

    fn from_row(row: WeaponRow) -> Result<Self, MappingError> {
        let columns = ColumnParser::new("weapon", row.id);
        Ok(Self {
            id: row.id,
            source_id: columns.parse(&row.source_id)?,
            source_page: row.source_page,
            language: columns.parse(&row.language)?,
            name: row.name,
            damage: row.damage,
            range: row.range,
            ap: row.ap,
            weight: row.weight,
            notes: row.notes,
        })
    }
}

impl RowMapper for Power {
    type Row = PowerRow;

    fn to_row(&self) -> PowerRow {
        PowerRow {
            id: self.id,
            character_id: None,
            name: self.name.clone(),
            power_points: self.power_points,
            range: self.range.clone(),
            duration: self.duration.clone(),
            effect: self.effect.clone(),
            source_id: self.source_id.to_string(),
            source_page: self.source_page,
            language: self.language.to_string(),
        }
    }

    fn from_row(row: PowerRow) -> Result<Self, MappingError> {
        let columns = ColumnParser::new("power", row.id);
        Ok(Self {
            id: row.id,
            source_id: columns.parse(&row.source_id)?,
            source_page: row.source_page,
            language: columns.parse(&row.language)?,
            name: row.name,
            power_points: row.power_points,
            range: row.range,
            duration: row.duration,
            effect: row.effect,
        })
    }
}
