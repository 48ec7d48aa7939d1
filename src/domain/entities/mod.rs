//! Domain entities - The character aggregate and the entries it owns

mod character;
mod edge;
mod gear;
mod hindrance;
mod power;
mod skill;
mod weapon;

pub use character::{Attribute, Character, DerivedStats};
pub use edge::Edge;
pub use gear::{Gear, GearField};
pub use hindrance::Hindrance;
pub use power::Power;
pub use skill::Skill;
pub use weapon::{Weapon, WeaponField};

/// An entry owned by a character's list (skill, edge, weapon, ...)
pub trait SheetEntry: Clone {
    fn name(&self) -> &str;

    /// Copy with the identifier cleared, so the next save inserts a new row
    fn detached(self) -> Self;
}

macro_rules! impl_sheet_entry {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl SheetEntry for $entity {
                fn name(&self) -> &str {
                    &self.name
                }

                fn detached(mut self) -> Self {
                    self.id = None;
                    self
                }
            }
        )+
    };
}

impl_sheet_entry!(Skill, Edge, Hindrance, Gear, Weapon, Power);
