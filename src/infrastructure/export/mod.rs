//! Character file export and import
//!
//! A character file is the whole character serialized as indented JSON, named
//! after the character.

mod character_file;

pub use character_file::JsonCharacterFiles;
