//! Character entity - The aggregate root of a sheet

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Edge, Gear, Hindrance, Power, SheetEntry, Skill, Weapon};
use crate::domain::value_objects::{AttributeName, DieType, Rank, RowId, Tracker};
use crate::domain::DomainError;

/// A player character and every list it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Assigned by the backend on first insert
    pub id: Option<RowId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    pub rank: Rank,
    pub experience: u32,
    /// Keyed by the five fixed attribute names. Ordered so serialization is stable.
    pub attributes: BTreeMap<AttributeName, Attribute>,
    pub skills: Vec<Skill>,
    pub derived_stats: DerivedStats,
    pub edges: Vec<Edge>,
    pub hindrances: Vec<Hindrance>,
    pub gear: Vec<Gear>,
    pub weapons: Vec<Weapon>,
    pub powers: Vec<Power>,

    // Combat trackers. Bounds are applied by the step operations, not the fields.
    pub wounds: u32,
    pub fatigue: u32,
    pub power_points: u32,
    pub bennies: u32,
}

/// Die and modifier for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Row identifier of the stored attribute row
    pub id: Option<RowId>,
    pub die: DieType,
    pub modifier: i32,
}

impl Attribute {
    pub fn new(die: DieType, modifier: i32) -> Self {
        Self {
            id: None,
            die,
            modifier,
        }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new(DieType::D4, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub pace: i32,
    pub parry: i32,
    pub toughness: i32,
    pub charisma: i32,
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self {
            pace: 6,
            parry: 2,
            toughness: 4,
            charisma: 0,
        }
    }
}

impl Default for Character {
    /// The blank sheet a new character starts from
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            race: Some(String::new()),
            rank: Rank::Novice,
            experience: 0,
            attributes: AttributeName::ALL
                .into_iter()
                .map(|name| (name, Attribute::default()))
                .collect(),
            skills: Vec::new(),
            derived_stats: DerivedStats::default(),
            edges: Vec::new(),
            hindrances: Vec::new(),
            gear: Vec::new(),
            weapons: Vec::new(),
            powers: Vec::new(),
            wounds: 0,
            fatigue: 0,
            power_points: 0,
            bennies: 3,
        }
    }
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = Some(race.into());
        self
    }

    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_attribute(mut self, name: AttributeName, die: DieType, modifier: i32) -> Self {
        self.set_attribute(name, die, modifier);
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn attribute(&self, name: AttributeName) -> Option<&Attribute> {
        self.attributes.get(&name)
    }

    /// Change an attribute's die and modifier, keeping its row identifier
    pub fn set_attribute(&mut self, name: AttributeName, die: DieType, modifier: i32) {
        let attribute = self.attributes.entry(name).or_default();
        attribute.die = die;
        attribute.modifier = modifier;
    }

    pub fn tracker(&self, tracker: Tracker) -> u32 {
        match tracker {
            Tracker::Wounds => self.wounds,
            Tracker::Fatigue => self.fatigue,
            Tracker::Bennies => self.bennies,
        }
    }

    fn tracker_mut(&mut self, tracker: Tracker) -> &mut u32 {
        match tracker {
            Tracker::Wounds => &mut self.wounds,
            Tracker::Fatigue => &mut self.fatigue,
            Tracker::Bennies => &mut self.bennies,
        }
    }

    /// Step a tracker up by one unless it is at its maximum
    pub fn increment_tracker(&mut self, tracker: Tracker) -> bool {
        let max = tracker.max();
        let value = self.tracker_mut(tracker);
        if *value < max {
            *value += 1;
            true
        } else {
            false
        }
    }

    /// Step a tracker down by one unless it is already zero
    pub fn decrement_tracker(&mut self, tracker: Tracker) -> bool {
        let value = self.tracker_mut(tracker);
        if *value > 0 {
            *value -= 1;
            true
        } else {
            false
        }
    }

    pub fn add_skill(&mut self, skill: Skill) {
        self.skills.push(skill);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn add_hindrance(&mut self, hindrance: Hindrance) {
        self.hindrances.push(hindrance);
    }

    pub fn add_gear(&mut self, gear: Gear) {
        self.gear.push(gear);
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
    }

    pub fn add_power(&mut self, power: Power) {
        self.powers.push(power);
    }

    /// Append catalog skills whose names the sheet doesn't have yet.
    /// Returns how many were added.
    pub fn import_skills(&mut self, catalog: impl IntoIterator<Item = Skill>) -> usize {
        let before = self.skills.len();
        for skill in catalog {
            if !self.skills.iter().any(|s| s.name == skill.name) {
                self.skills.push(skill.detached());
            }
        }
        self.skills.len() - before
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<Skill, DomainError> {
        remove_at(&mut self.skills, index, "skill")
    }

    pub fn remove_edge(&mut self, index: usize) -> Result<Edge, DomainError> {
        remove_at(&mut self.edges, index, "edge")
    }

    pub fn remove_hindrance(&mut self, index: usize) -> Result<Hindrance, DomainError> {
        remove_at(&mut self.hindrances, index, "hindrance")
    }

    pub fn remove_gear(&mut self, index: usize) -> Result<Gear, DomainError> {
        remove_at(&mut self.gear, index, "gear")
    }

    pub fn remove_weapon(&mut self, index: usize) -> Result<Weapon, DomainError> {
        remove_at(&mut self.weapons, index, "weapon")
    }

    pub fn remove_power(&mut self, index: usize) -> Result<Power, DomainError> {
        remove_at(&mut self.powers, index, "power")
    }

    /// Name used for exported files
    pub fn file_stem(&self) -> &str {
        if self.name.trim().is_empty() {
            "character"
        } else {
            &self.name
        }
    }
}

fn remove_at<T>(list: &mut Vec<T>, index: usize, kind: &'static str) -> Result<T, DomainError> {
    if index < list.len() {
        Ok(list.remove(index))
    } else {
        Err(DomainError::IndexOutOfRange { kind, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Language;

    #[test]
    fn test_default_character_has_all_five_attributes() {
        let character = Character::default();
        assert_eq!(character.attributes.len(), 5);
        for name in AttributeName::ALL {
            assert_eq!(character.attribute(name), Some(&Attribute::new(DieType::D4, 0)));
        }
        assert_eq!(character.bennies, 3);
        assert_eq!(character.derived_stats.pace, 6);
        assert_eq!(character.id, None);
    }

    #[test]
    fn test_set_attribute_keeps_row_id() {
        let mut character = Character::new("Korvak");
        character
            .attributes
            .get_mut(&AttributeName::Strength)
            .unwrap()
            .id = Some(RowId::new(7));

        character.set_attribute(AttributeName::Strength, DieType::D10, 1);

        let strength = character.attribute(AttributeName::Strength).unwrap();
        assert_eq!(strength.id, Some(RowId::new(7)));
        assert_eq!(strength.die, DieType::D10);
        assert_eq!(strength.modifier, 1);
        assert_eq!(character.attributes.len(), 5);
    }

    #[test]
    fn test_trackers_stop_at_bounds() {
        let mut character = Character::default();
        assert!(character.increment_tracker(Tracker::Bennies));
        assert!(!character.increment_tracker(Tracker::Bennies));
        assert_eq!(character.bennies, 4);

        for _ in 0..10 {
            character.increment_tracker(Tracker::Wounds);
        }
        assert_eq!(character.wounds, 6);

        assert!(!character.decrement_tracker(Tracker::Fatigue));
        assert_eq!(character.fatigue, 0);
    }

    #[test]
    fn test_import_skills_skips_existing_names_and_detaches() {
        let mut character = Character::new("Korvak")
            .with_skill(Skill::new("Fighting", AttributeName::Agility, Language::En));

        let mut notice = Skill::new("Notice", AttributeName::Smarts, Language::En);
        notice.id = Some(RowId::new(12));
        let fighting = Skill::new("Fighting", AttributeName::Agility, Language::En)
            .with_die(DieType::D12);

        let added = character.import_skills(vec![notice, fighting]);

        assert_eq!(added, 1);
        assert_eq!(character.skills.len(), 2);
        assert_eq!(character.skills[0].die, DieType::D4);
        assert_eq!(character.skills[1].name, "Notice");
        assert_eq!(character.skills[1].id, None);
    }

    #[test]
    fn test_remove_out_of_range_is_an_error() {
        let mut character = Character::default();
        assert_eq!(
            character.remove_weapon(0),
            Err(DomainError::IndexOutOfRange {
                kind: "weapon",
                index: 0
            })
        );
    }

    #[test]
    fn test_file_stem_falls_back_for_blank_names() {
        assert_eq!(Character::default().file_stem(), "character");
        assert_eq!(Character::new("Korvak").file_stem(), "Korvak");
    }
}
