//! Initiative Tracking Module
//!
//! Keeps an encounter's creatures in initiative order and tracks whose turn
//! it is across rounds. Every operation consumes an [`EncounterSnapshot`]
//! and returns the next one, so callers decide where state lives.
//!
//! Contains:
//! - creature records and typed edit patches
//! - the ordering pass (initiative descending, stable tie ranks)
//! - the turn/round cursor and turn preservation across membership changes
//! - manual reordering and monster initiative re-rolls
//! - form parsing and JSON persistence for the surrounding application

pub mod creature;
pub mod cursor;
pub mod form;
pub mod ordering;
pub mod persistence;
pub mod snapshot;

mod mutations;
mod reorder;
mod reroll;

pub use creature::{Creature, CreatureId, CreatureKind, CreaturePatch, CreatureTemplate};
pub use cursor::TurnCursor;
pub use form::{parse_numeric, spawn_rows, CreatureForm, FormError, QuickAddRow};
pub use persistence::PersistenceError;
pub use reroll::InitiativeDice;
pub use snapshot::{EncounterSnapshot, InvariantViolation};
