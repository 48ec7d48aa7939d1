//! Value objects - Immutable objects defined by their attributes

mod dice;
mod ids;
mod language;
mod rank;
mod source;
mod tracker;

pub use dice::{AttributeName, DieType};
pub use ids::RowId;
pub use language::Language;
pub use rank::{HindranceSeverity, Rank};
pub use source::SourceTag;
pub use tracker::Tracker;
