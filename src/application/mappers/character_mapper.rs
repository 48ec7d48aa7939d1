//! Assembly and disassembly of the character aggregate

use std::collections::BTreeMap;

use super::{ColumnParser, MappingError, RowMapper};
use crate::application::dto::{
    CharacterAttributeRow, CharacterChildRows, CharacterRow, CharacterRows,
};
use crate::domain::entities::{Attribute, Character, DerivedStats};
use crate::domain::value_objects::AttributeName;

pub fn attribute_to_row(name: AttributeName, attribute: &Attribute) -> CharacterAttributeRow {
    CharacterAttributeRow {
        id: attribute.id,
        character_id: None,
        attribute: name.to_string(),
        die: attribute.die.to_string(),
        modifier: attribute.modifier,
    }
}

pub fn attribute_from_row(
    row: CharacterAttributeRow,
) -> Result<(AttributeName, Attribute), MappingError> {
    let columns = ColumnParser::new("attribute", row.id);
    let name = columns.parse(&row.attribute)?;
    let attribute = Attribute {
        id: row.id,
        die: columns.parse(&row.die)?,
        modifier: row.modifier,
    };
    Ok((name, attribute))
}

/// Split a character into its main row and one collection per child table.
///
/// Child rows are tagged with the character's identifier when it has one.
pub fn disassemble_character(character: &Character) -> CharacterRows {
    let main = CharacterRow {
        id: character.id,
        name: character.name.clone(),
        race: character.race.clone(),
        rank: character.rank.to_string(),
        experience: character.experience,
        pace: character.derived_stats.pace,
        parry: character.derived_stats.parry,
        toughness: character.derived_stats.toughness,
        charisma: character.derived_stats.charisma,
        wounds: character.wounds,
        fatigue: character.fatigue,
        bennies: character.bennies,
        power_points: character.power_points,
    };

    let mut children = CharacterChildRows {
        attributes: character
            .attributes
            .iter()
            .map(|(name, attribute)| attribute_to_row(*name, attribute))
            .collect(),
        skills: character.skills.iter().map(RowMapper::to_row).collect(),
        edges: character.edges.iter().map(RowMapper::to_row).collect(),
        hindrances: character.hindrances.iter().map(RowMapper::to_row).collect(),
        gear: character.gear.iter().map(RowMapper::to_row).collect(),
        weapons: character.weapons.iter().map(RowMapper::to_row).collect(),
        powers: character.powers.iter().map(RowMapper::to_row).collect(),
    };

    if let Some(id) = character.id {
        children.assign_character_id(id);
    }

    CharacterRows { main, children }
}

/// Combine a main row and its independently fetched child rows into a character.
///
/// Attribute rows fold into the attribute map; a name with no row is left out of
/// the map rather than filled with a default. If two rows name the same
/// attribute the later one wins.
pub fn assemble_character(
    main: CharacterRow,
    children: CharacterChildRows,
) -> Result<Character, MappingError> {
    let columns = ColumnParser::new("character", main.id);
    let rank = columns.parse(&main.rank)?;

    let attributes = children
        .attributes
        .into_iter()
        .map(attribute_from_row)
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(Character {
        id: main.id,
        name: main.name,
        race: main.race,
        rank,
        experience: main.experience,
        attributes,
        skills: from_rows(children.skills)?,
        derived_stats: DerivedStats {
            pace: main.pace,
            parry: main.parry,
            toughness: main.toughness,
            charisma: main.charisma,
        },
        edges: from_rows(children.edges)?,
        hindrances: from_rows(children.hindrances)?,
        gear: from_rows(children.gear)?,
        weapons: from_rows(children.weapons)?,
        powers: from_rows(children.powers)?,
        wounds: main.wounds,
        fatigue: main.fatigue,
        power_points: main.power_points,
        bennies: main.bennies,
    })
}

fn from_rows<E: RowMapper>(rows: Vec<E::Row>) -> Result<Vec<E>, MappingError> {
    rows.into_iter().map(E::from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Edge, Gear, Hindrance, Power, Skill, Weapon};
    use crate::domain::value_objects::{DieType, Language, Rank, RowId, SourceTag};

    fn sample_character() -> Character {
        let mut character = Character::new("Korvak")
            .with_race("Half-Orc")
            .with_rank(Rank::Veteran)
            .with_attribute(AttributeName::Strength, DieType::D10, 0)
            .with_attribute(AttributeName::Vigor, DieType::D8, 1)
            .with_skill(
                Skill::new("Fighting", AttributeName::Agility, Language::En)
                    .with_die(DieType::D10),
            )
            .with_skill(Skill::new("Notice", AttributeName::Smarts, Language::En));
        character.id = Some(RowId::new(42));
        character.experience = 30;
        character.wounds = 2;
        character.power_points = 10;
        character.add_edge(Edge::new("Brawny", Language::En));
        character.add_hindrance(Hindrance::new("Mean", Language::En));
        character.add_gear(Gear::new("Bedroll"));
        let mut axe = Weapon::new("Battle Axe", Language::En).with_damage("Str+d8");
        axe.source_id = SourceTag::Swade;
        character.add_weapon(axe);
        character.add_power(Power::new("Smite", Language::En));
        character
    }

    #[test]
    fn test_disassemble_then_assemble_is_identity() {
        let character = sample_character();
        let rows = disassemble_character(&character);
        let assembled = assemble_character(rows.main, rows.children).expect("rows are valid");
        assert_eq!(assembled, character);
    }

    #[test]
    fn test_new_character_round_trips_with_null_ids() {
        let character = Character::new("Fresh");
        let rows = disassemble_character(&character);
        assert_eq!(rows.main.id, None);
        assert!(rows.children.attributes.iter().all(|r| r.character_id.is_none()));
        assert_eq!(assemble_character(rows.main, rows.children), Ok(character));
    }

    #[test]
    fn test_attributes_flatten_to_one_row_per_name() {
        let rows = disassemble_character(&sample_character());
        let names: Vec<_> = rows
            .children
            .attributes
            .iter()
            .map(|r| r.attribute.as_str())
            .collect();
        assert_eq!(names, ["Agility", "Smarts", "Spirit", "Strength", "Vigor"]);
        assert!(rows
            .children
            .attributes
            .iter()
            .all(|r| r.character_id == Some(RowId::new(42))));
    }

    #[test]
    fn test_main_row_flattens_derived_stats() {
        let rows = disassemble_character(&sample_character());
        assert_eq!(rows.main.rank, "Veteran");
        assert_eq!(rows.main.pace, 6);
        assert_eq!(rows.main.toughness, 4);
        assert_eq!(rows.main.power_points, 10);
    }

    #[test]
    fn test_missing_attribute_row_leaves_key_absent() {
        let rows = disassemble_character(&sample_character());
        let mut children = rows.children;
        children.attributes.retain(|r| r.attribute != "Spirit");

        let character = assemble_character(rows.main, children).expect("rows are valid");

        assert_eq!(character.attributes.len(), 4);
        assert!(character.attribute(AttributeName::Spirit).is_none());
    }

    #[test]
    fn test_unknown_rank_fails_assembly() {
        let rows = disassemble_character(&sample_character());
        let mut main = rows.main;
        main.rank = "Godlike".to_string();
        assert!(assemble_character(main, rows.children).is_err());
    }

    #[test]
    fn test_bad_child_row_fails_assembly() {
        let rows = disassemble_character(&sample_character());
        let mut children = rows.children;
        children.attributes[0].die = "d3".to_string();
        assert!(assemble_character(rows.main, children).is_err());
    }
}
