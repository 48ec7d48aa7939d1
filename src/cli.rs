//! Command line front end

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use wildcard_sheet::application::ports::outbound::CatalogRepositoryPort;
use wildcard_sheet::application::services::{SheetError, SheetService};
use wildcard_sheet::domain::entities::{Character, GearField, SheetEntry, Skill, WeaponField};
use wildcard_sheet::domain::value_objects::{AttributeName, DieType, Language, Rank, RowId, Tracker};
use wildcard_sheet::domain::DomainError;
use wildcard_sheet::infrastructure::persistence::{CatalogEntity, PostgrestCatalogRepository};
use wildcard_sheet::infrastructure::state::AppState;

#[derive(Parser)]
#[command(name = "wildcard-sheet")]
#[command(about = "Savage Worlds character sheet with PostgREST sync")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the character being edited
    Show,

    /// Start over from a blank character
    New,

    /// Write the character to `<name>.json`
    Export {
        /// Target directory (default: SHEET_EXPORT_DIR)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Replace the character with the contents of a file
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Save the character to the database
    Push,

    /// Load a character from the database
    Pull {
        #[arg(value_name = "ID")]
        id: RowId,
    },

    /// List catalog entries
    Catalog {
        kind: EntryKind,

        /// Catalog language (default: SHEET_LANGUAGE)
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Add a catalog entry to the character by name
    Add {
        kind: EntryKind,

        name: String,

        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Add every catalog skill the character doesn't have yet
    ImportSkills {
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Edit the character interactively; autosave runs while editing
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryKind {
    Skill,
    Edge,
    Hindrance,
    Gear,
    Weapon,
    Power,
}

pub async fn run(command: Command, state: &AppState) -> Result<()> {
    let sheet = &state.sheet;
    let default_language = state.config.language;

    match command {
        Command::Show => println!("{}", render_sheet(&sheet.current().await)),
        Command::New => {
            sheet.new_character().await;
            sheet.snapshot().await;
            println!("Started a new character");
        }
        Command::Export { dir } => {
            let dir = dir.unwrap_or_else(|| state.config.export_dir.clone());
            let path = sheet.export_file(&dir).await.map_err(report)?;
            println!("Exported to {}", path.display());
        }
        Command::Import { path } => {
            sheet.import_file(&path).await.map_err(report)?;
            sheet.snapshot().await;
            println!("Imported {}", sheet.current().await.name);
        }
        Command::Push => {
            let id = sheet.save_remote().await.map_err(report)?;
            sheet.snapshot().await;
            println!("Saved character {}", id);
        }
        Command::Pull { id } => {
            sheet.load_remote(id).await.map_err(report)?;
            sheet.snapshot().await;
            println!("Loaded {}", sheet.current().await.name);
        }
        Command::Catalog { kind, language } => {
            let language = language.unwrap_or(default_language);
            let names = match kind {
                EntryKind::Skill => catalog_names(&state.repository.skills(), language).await?,
                EntryKind::Edge => catalog_names(&state.repository.edges(), language).await?,
                EntryKind::Hindrance => {
                    catalog_names(&state.repository.hindrances(), language).await?
                }
                EntryKind::Gear => catalog_names(&state.repository.gear(), language).await?,
                EntryKind::Weapon => catalog_names(&state.repository.weapons(), language).await?,
                EntryKind::Power => catalog_names(&state.repository.powers(), language).await?,
            };
            for name in names {
                println!("{}", name);
            }
        }
        Command::Add {
            kind,
            name,
            language,
        } => {
            let language = language.unwrap_or(default_language);
            let repo = &state.repository;
            match kind {
                EntryKind::Skill => {
                    add_entry(sheet, &repo.skills(), &name, language, Character::add_skill).await?
                }
                EntryKind::Edge => {
                    add_entry(sheet, &repo.edges(), &name, language, Character::add_edge).await?
                }
                EntryKind::Hindrance => {
                    let catalog = repo.hindrances();
                    add_entry(sheet, &catalog, &name, language, Character::add_hindrance).await?
                }
                EntryKind::Gear => {
                    add_entry(sheet, &repo.gear(), &name, language, Character::add_gear).await?
                }
                EntryKind::Weapon => {
                    add_entry(sheet, &repo.weapons(), &name, language, Character::add_weapon).await?
                }
                EntryKind::Power => {
                    add_entry(sheet, &repo.powers(), &name, language, Character::add_power).await?
                }
            }
            sheet.snapshot().await;
            println!("Added {}", name);
        }
        Command::ImportSkills { language } => {
            let language = language.unwrap_or(default_language);
            let catalog = state
                .repository
                .skills()
                .list_for_language(language)
                .await
                .map_err(lookup_failed)?;
            let added = sheet.update(|c| c.import_skills(catalog)).await;
            sheet.snapshot().await;
            println!("Added {} skills", added);
        }
        Command::Edit => {
            let autosave = state.spawn_autosave();
            let result = edit_loop(sheet, default_language).await;
            autosave.abort();
            sheet.snapshot().await;
            result?;
        }
    }

    Ok(())
}

/// Log the detailed error and hand the user the generic message
fn report(error: SheetError) -> anyhow::Error {
    tracing::error!("{}", error);
    anyhow::anyhow!(error.user_message())
}

fn lookup_failed(error: anyhow::Error) -> anyhow::Error {
    tracing::error!("{:#}", error);
    anyhow::anyhow!("Error loading catalog from database")
}

async fn catalog_names<E>(
    catalog: &PostgrestCatalogRepository<E>,
    language: Language,
) -> Result<Vec<String>>
where
    E: CatalogEntity + SheetEntry,
    PostgrestCatalogRepository<E>: CatalogRepositoryPort<E>,
{
    let entries = catalog
        .list_for_language(language)
        .await
        .map_err(lookup_failed)?;
    Ok(entries.iter().map(|e| e.name().to_string()).collect())
}

async fn add_entry<E>(
    sheet: &SheetService,
    catalog: &PostgrestCatalogRepository<E>,
    name: &str,
    language: Language,
    add: fn(&mut Character, E),
) -> Result<()>
where
    E: CatalogEntity + SheetEntry,
    PostgrestCatalogRepository<E>: CatalogRepositoryPort<E>,
{
    let Some(entry) = catalog
        .find_by_name(name, language)
        .await
        .map_err(lookup_failed)?
    else {
        bail!("No {} named '{}' in the {} catalog", E::RESOURCE, name, language);
    };
    sheet.update(|c| add(c, entry.detached())).await;
    Ok(())
}

pub fn render_sheet(character: &Character) -> String {
    let mut out = String::new();
    let name = if character.name.is_empty() {
        "(unnamed)"
    } else {
        &character.name
    };
    let _ = write!(out, "{}", name);
    if let Some(race) = character.race.as_deref().filter(|r| !r.is_empty()) {
        let _ = write!(out, " ({})", race);
    }
    let _ = write!(out, " - {}, {} XP", character.rank, character.experience);
    if let Some(id) = character.id {
        let _ = write!(out, " [#{}]", id);
    }
    out.push('\n');

    let attributes: Vec<String> = character
        .attributes
        .iter()
        .map(|(name, a)| format!("{} {}", name, with_modifier(a.die, a.modifier)))
        .collect();
    let _ = writeln!(out, "Attributes: {}", attributes.join("  "));

    let stats = &character.derived_stats;
    let _ = writeln!(
        out,
        "Pace {}  Parry {}  Toughness {}  Charisma {}",
        stats.pace, stats.parry, stats.toughness, stats.charisma
    );
    let _ = writeln!(
        out,
        "Wounds {}/{}  Fatigue {}/{}  Bennies {}/{}  Power Points {}",
        character.wounds,
        Tracker::Wounds.max(),
        character.fatigue,
        Tracker::Fatigue.max(),
        character.bennies,
        Tracker::Bennies.max(),
        character.power_points
    );

    section(
        &mut out,
        "Skills",
        character.skills.iter().map(|s| {
            format!("{} {} ({})", s.name, with_modifier(s.die, s.modifier), s.linked_attribute)
        }),
    );
    section(&mut out, "Edges", character.edges.iter().map(|e| e.name.clone()));
    section(
        &mut out,
        "Hindrances",
        character.hindrances.iter().map(|h| format!("{} ({})", h.name, h.severity)),
    );
    section(
        &mut out,
        "Gear",
        character.gear.iter().map(|g| match g.weight {
            Some(weight) => format!("{} ({} lb)", g.name, weight),
            None => g.name.clone(),
        }),
    );
    section(
        &mut out,
        "Weapons",
        character.weapons.iter().map(|w| {
            format!("{} {} AP {} range {}", w.name, w.damage, w.ap, display_or_dash(&w.range))
        }),
    );
    section(
        &mut out,
        "Powers",
        character.powers.iter().map(|p| format!("{} ({} PP)", p.name, p.power_points)),
    );

    out.trim_end().to_string()
}

fn with_modifier(die: DieType, modifier: i32) -> String {
    match modifier {
        0 => die.to_string(),
        m if m > 0 => format!("{}+{}", die, m),
        m => format!("{}{}", die, m),
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn section(out: &mut String, title: &str, lines: impl Iterator<Item = String>) {
    let lines: Vec<String> = lines.collect();
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", title);
    for (index, line) in lines.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index, line);
    }
}

// =============================================================================
// Interactive editor
// =============================================================================

const EDIT_HELP: &str = "\
Commands:
  show                              print the sheet
  name <text> | race <text>         set name or race
  rank <Novice..Legendary>          set rank
  xp <n> | pp <n>                   set experience or power points
  attr <Attribute> <die> [mod]      set an attribute, e.g. attr Strength d8
  stat <pace|parry|toughness|charisma> <n>
  inc <tracker> | dec <tracker>     step wounds, fatigue or bennies
  skill <name> <Attribute>          add a custom skill
  weapon <index> <field> <value>    edit a weapon field
  gear <index> <field> <value>      edit a gear field
  remove <kind> <index>             remove an entry
  save                              save to the database
  help | quit";

#[derive(Debug, Clone, PartialEq)]
enum EditCommand {
    Show,
    Help,
    Save,
    Quit,
    Name(String),
    Race(String),
    Rank(Rank),
    Experience(u32),
    PowerPoints(u32),
    Attribute(AttributeName, DieType, i32),
    Stat(DerivedStat, i32),
    Increment(Tracker),
    Decrement(Tracker),
    AddSkill(String, AttributeName),
    Weapon(usize, WeaponField, String),
    Gear(usize, GearField, String),
    Remove(EntryKind, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DerivedStat {
    Pace,
    Parry,
    Toughness,
    Charisma,
}

fn parse_edit_command(line: &str) -> Result<EditCommand, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "show" => EditCommand::Show,
        "help" | "?" => EditCommand::Help,
        "save" => EditCommand::Save,
        "quit" | "exit" => EditCommand::Quit,
        "name" => EditCommand::Name(rest.to_string()),
        "race" => EditCommand::Race(rest.to_string()),
        "rank" => EditCommand::Rank(parse(rest)?),
        "xp" => EditCommand::Experience(number("experience", rest)?),
        "pp" => EditCommand::PowerPoints(number("power points", rest)?),
        "attr" => match args.as_slice() {
            [name, die] => EditCommand::Attribute(parse(name)?, parse(die)?, 0),
            [name, die, modifier] => {
                EditCommand::Attribute(parse(name)?, parse(die)?, number("modifier", modifier)?)
            }
            _ => return Err("usage: attr <Attribute> <die> [modifier]".to_string()),
        },
        "stat" => match args.as_slice() {
            [stat, value] => {
                let stat = match stat.to_lowercase().as_str() {
                    "pace" => DerivedStat::Pace,
                    "parry" => DerivedStat::Parry,
                    "toughness" => DerivedStat::Toughness,
                    "charisma" => DerivedStat::Charisma,
                    other => return Err(format!("Unknown stat: {}", other)),
                };
                EditCommand::Stat(stat, number("stat", value)?)
            }
            _ => return Err("usage: stat <name> <value>".to_string()),
        },
        "inc" => EditCommand::Increment(parse(rest)?),
        "dec" => EditCommand::Decrement(parse(rest)?),
        "skill" => match rest.rsplit_once(' ') {
            Some((name, attribute)) if !name.trim().is_empty() => {
                EditCommand::AddSkill(name.trim().to_string(), parse(attribute)?)
            }
            _ => return Err("usage: skill <name> <Attribute>".to_string()),
        },
        "weapon" | "gear" => {
            let mut parts = rest.splitn(3, ' ');
            let (Some(index), Some(field)) = (parts.next(), parts.next()) else {
                return Err(format!("usage: {} <index> <field> <value>", verb));
            };
            let index = number("index", index)?;
            let value = parts.next().unwrap_or("").to_string();
            if verb == "weapon" {
                EditCommand::Weapon(index, parse(field)?, value)
            } else {
                EditCommand::Gear(index, parse(field)?, value)
            }
        }
        "remove" => match args.as_slice() {
            [kind, index] => EditCommand::Remove(
                EntryKind::from_str(kind, true)?,
                number("index", index)?,
            ),
            _ => return Err("usage: remove <kind> <index>".to_string()),
        },
        "" => return Err(String::new()),
        other => return Err(format!("Unknown command: {} (try 'help')", other)),
    };
    Ok(command)
}

fn parse<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.trim().parse().map_err(|e: DomainError| e.to_string())
}

fn number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("Invalid {}: {}", field, raw))
}

/// Apply an edit; `Ok(false)` for commands that don't change the character
fn apply_edit(
    character: &mut Character,
    command: EditCommand,
    language: Language,
) -> Result<bool, DomainError> {
    match command {
        EditCommand::Name(name) => character.name = name,
        EditCommand::Race(race) => character.race = Some(race),
        EditCommand::Rank(rank) => character.rank = rank,
        EditCommand::Experience(xp) => character.experience = xp,
        EditCommand::PowerPoints(pp) => character.power_points = pp,
        EditCommand::Attribute(name, die, modifier) => character.set_attribute(name, die, modifier),
        EditCommand::Stat(stat, value) => {
            let stats = &mut character.derived_stats;
            match stat {
                DerivedStat::Pace => stats.pace = value,
                DerivedStat::Parry => stats.parry = value,
                DerivedStat::Toughness => stats.toughness = value,
                DerivedStat::Charisma => stats.charisma = value,
            }
        }
        EditCommand::Increment(tracker) => return Ok(character.increment_tracker(tracker)),
        EditCommand::Decrement(tracker) => return Ok(character.decrement_tracker(tracker)),
        EditCommand::AddSkill(name, attribute) => {
            character.add_skill(Skill::new(name, attribute, language))
        }
        EditCommand::Weapon(index, field, value) => character
            .weapons
            .get_mut(index)
            .ok_or(DomainError::IndexOutOfRange { kind: "weapon", index })?
            .set_field(field, &value)?,
        EditCommand::Gear(index, field, value) => character
            .gear
            .get_mut(index)
            .ok_or(DomainError::IndexOutOfRange { kind: "gear", index })?
            .set_field(field, &value)?,
        EditCommand::Remove(kind, index) => match kind {
            EntryKind::Skill => drop(character.remove_skill(index)?),
            EntryKind::Edge => drop(character.remove_edge(index)?),
            EntryKind::Hindrance => drop(character.remove_hindrance(index)?),
            EntryKind::Gear => drop(character.remove_gear(index)?),
            EntryKind::Weapon => drop(character.remove_weapon(index)?),
            EntryKind::Power => drop(character.remove_power(index)?),
        },
        EditCommand::Show | EditCommand::Help | EditCommand::Save | EditCommand::Quit => {
            return Ok(false)
        }
    }
    Ok(true)
}

async fn edit_loop(sheet: &SheetService, language: Language) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n\nType 'help' for commands.", render_sheet(&sheet.current().await));
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_edit_command(&line) {
            Ok(command) => command,
            Err(message) if message.is_empty() => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            EditCommand::Quit => break,
            EditCommand::Help => println!("{}", EDIT_HELP),
            EditCommand::Show => println!("{}", render_sheet(&sheet.current().await)),
            EditCommand::Save => match sheet.save_remote().await {
                Ok(id) => println!("Saved character {}", id),
                Err(e) => println!("{}", report(e)),
            },
            edit => match sheet.try_update(|c| apply_edit(c, edit, language)).await {
                Ok(true) => {}
                Ok(false) => println!("Already at the limit"),
                Err(e) => println!("{}", e),
            },
        }
    }

    Ok(())
}
