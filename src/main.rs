//! Command-line front end for the initiative tracker.
//!
//! Each invocation loads the encounter file, applies one operation and saves
//! it back. Positions shown by `show` are display positions (the creature
//! whose turn it is comes first), which is also what `move` expects.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use initiative_tracker::config::TrackerConfig;
use initiative_tracker::core::initiative::persistence::{load_from_path, save_to_path};
use initiative_tracker::core::initiative::{
    CreatureForm, CreatureKind, CreatureId, EncounterSnapshot, QuickAddRow,
};
use initiative_tracker::core::logging;

/// Track initiative order for a tabletop encounter
#[derive(Parser)]
#[command(name = "initiative-tracker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Encounter file (defaults to the data directory)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Log level (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the turn order, starting with whoever is up
    Show,

    /// Add one or more identical creatures
    Add {
        name: String,
        #[arg(long, default_value = "")]
        initiative: String,
        #[arg(long, default_value = "")]
        hp: String,
        #[arg(long, default_value = "")]
        ac: String,
        #[arg(long = "mod", default_value = "")]
        initiative_mod: String,
        /// Add as a player character instead of a monster
        #[arg(long)]
        player: bool,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Remove the creature at a display position
    Delete { position: usize },

    /// Copy the creature at a display position
    Duplicate { position: usize },

    /// Replace a creature's stats
    Edit {
        position: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        hp: Option<String>,
        #[arg(long)]
        ac: Option<String>,
        #[arg(long = "mod")]
        initiative_mod: Option<String>,
    },

    /// Set a creature's initiative (blank means 0)
    Init {
        position: usize,
        #[arg(default_value = "", allow_hyphen_values = true)]
        value: String,
    },

    /// Heal (positive) or damage (negative) a creature
    Hp {
        position: usize,
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },

    /// Move the creature at `from` onto the creature at `to`
    Move { from: usize, to: usize },

    /// Advance to the next turn
    Next,

    /// Go back one turn
    Prev,

    /// Re-roll initiative for every monster
    Roll,

    /// Reset the round counter and heal everyone
    Restart,

    /// Remove everything
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TrackerConfig::load();

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    if let Err(e) = logging::init_logging(level) {
        eprintln!("{e}");
    }

    let path = cli.file.clone().unwrap_or_else(|| config.encounter_path());
    let encounter = load_from_path(&path)
        .with_context(|| format!("Failed to load encounter from {}", path.display()))?;

    let encounter = run(cli.command, encounter, &config)?;

    save_to_path(&encounter, &path)
        .with_context(|| format!("Failed to save encounter to {}", path.display()))?;
    print_encounter(&encounter);
    Ok(())
}

fn run(command: Command, encounter: EncounterSnapshot, config: &TrackerConfig) -> Result<EncounterSnapshot> {
    let encounter = match command {
        Command::Show => encounter,
        Command::Add {
            name,
            initiative,
            hp,
            ac,
            initiative_mod,
            player,
            quantity,
        } => {
            let row = QuickAddRow {
                form: CreatureForm {
                    name,
                    ac,
                    max_hp: hp,
                    initiative,
                    initiative_mod,
                    kind: if player {
                        CreatureKind::Player
                    } else {
                        CreatureKind::Monster
                    },
                },
                quantity,
            };
            encounter.add_creatures(row.spawn()?)
        }
        Command::Delete { position } => {
            let id = at_position(&encounter, position)?;
            encounter.delete_creature(id)
        }
        Command::Duplicate { position } => {
            let id = at_position(&encounter, position)?;
            encounter.duplicate_creature(id)
        }
        Command::Edit {
            position,
            name,
            hp,
            ac,
            initiative_mod,
        } => {
            let id = at_position(&encounter, position)?;
            let Some(creature) = encounter.creature(id) else {
                bail!("No creature at position {position}");
            };
            let mut form = CreatureForm::from_creature(creature);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(hp) = hp {
                form.max_hp = hp;
            }
            if let Some(ac) = ac {
                form.ac = ac;
            }
            if let Some(initiative_mod) = initiative_mod {
                form.initiative_mod = initiative_mod;
            }
            encounter.edit_creature(id, form.to_patch()?)
        }
        Command::Init { position, value } => {
            let id = at_position(&encounter, position)?;
            encounter.change_initiative(id, &value)
        }
        Command::Hp { position, delta } => {
            let id = at_position(&encounter, position)?;
            encounter.adjust_health(id, delta)
        }
        Command::Move { from, to } => encounter.reorder_by_display_position(from, to),
        Command::Next => encounter.next_turn(),
        Command::Prev => encounter.previous_turn(),
        Command::Roll => encounter.roll_monster_initiative(&mut rand::thread_rng(), &config.dice()),
        Command::Restart => encounter.restart(),
        Command::Clear => encounter.clear(),
    };
    Ok(encounter)
}

fn at_position(encounter: &EncounterSnapshot, position: usize) -> Result<CreatureId> {
    encounter
        .display_order()
        .get(position)
        .copied()
        .with_context(|| format!("No creature at position {position}"))
}

fn print_encounter(encounter: &EncounterSnapshot) {
    println!("Round {}", encounter.round() + 1);
    if encounter.is_empty() {
        println!("  (no creatures)");
        return;
    }
    for (position, creature) in encounter.display_creatures().into_iter().enumerate() {
        let marker = if position == 0 { '>' } else { ' ' };
        println!(
            "{marker} {position:>2}  {:>3}  {:<24} {:>3}/{:<3} hp  AC {:<2}  {}",
            creature.initiative,
            creature.name,
            creature.current_hp,
            creature.max_hp,
            creature.ac,
            creature.kind,
        );
    }
}
