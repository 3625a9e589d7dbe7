//! Text input from creature forms.
//!
//! Forms hand over raw strings. Blank numeric fields mean 0, everything else
//! must be a whole number.

use serde::{Deserialize, Serialize};

use super::creature::{Creature, CreatureKind, CreaturePatch, CreatureTemplate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Creature name cannot be empty")]
    EmptyName,

    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} cannot be negative, got {value}")]
    NegativeValue { field: &'static str, value: i32 },
}

pub type Result<T> = std::result::Result<T, FormError>;

/// Parse a numeric form field. Blank (or whitespace) is 0; non-integers,
/// including `NaN`, `Infinity` and fractions, are rejected.
pub fn parse_numeric(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    text.parse().ok()
}

fn signed_field(field: &'static str, text: &str) -> Result<i32> {
    parse_numeric(text).ok_or_else(|| FormError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

fn unsigned_field(field: &'static str, text: &str) -> Result<u32> {
    let value = signed_field(field, text)?;
    u32::try_from(value).map_err(|_| FormError::NegativeValue { field, value })
}

// ============================================================================
// Creature form
// ============================================================================

/// A creature as typed into the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureForm {
    pub name: String,
    pub ac: String,
    pub max_hp: String,
    pub initiative: String,
    pub initiative_mod: String,
    pub kind: CreatureKind,
}

impl CreatureForm {
    /// Prefill the form from an existing creature (edit flow).
    pub fn from_creature(creature: &Creature) -> Self {
        Self {
            name: creature.name.clone(),
            ac: creature.ac.to_string(),
            max_hp: creature.max_hp.to_string(),
            initiative: creature.initiative.to_string(),
            initiative_mod: creature.initiative_mod.to_string(),
            kind: creature.kind,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.parse().is_ok()
    }

    pub fn parse(&self) -> Result<CreatureTemplate> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }

        Ok(CreatureTemplate {
            name: name.to_string(),
            max_hp: unsigned_field("max_hp", &self.max_hp)?,
            ac: unsigned_field("ac", &self.ac)?,
            initiative: signed_field("initiative", &self.initiative)?,
            initiative_mod: signed_field("initiative_mod", &self.initiative_mod)?,
            kind: self.kind,
        })
    }

    /// Every field as a patch for an existing creature. Current HP is left
    /// for the engine to clamp against the new maximum.
    pub fn to_patch(&self) -> Result<CreaturePatch> {
        let template = self.parse()?;
        Ok(CreaturePatch {
            name: Some(template.name),
            ac: Some(template.ac),
            max_hp: Some(template.max_hp),
            current_hp: None,
            initiative: Some(template.initiative),
            initiative_mod: Some(template.initiative_mod),
            kind: Some(template.kind),
        })
    }
}

// ============================================================================
// Quick add
// ============================================================================

/// One row of the quick-add dialog: a creature form plus how many to add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAddRow {
    #[serde(flatten)]
    pub form: CreatureForm,
    pub quantity: u32,
}

impl Default for QuickAddRow {
    fn default() -> Self {
        Self {
            form: CreatureForm::default(),
            quantity: 1,
        }
    }
}

impl QuickAddRow {
    /// `quantity` identical creatures, each with its own id.
    pub fn spawn(&self) -> Result<Vec<Creature>> {
        let template = self.form.parse()?;
        Ok((0..self.quantity).map(|_| template.spawn()).collect())
    }
}

/// Spawn every row, failing on the first invalid one.
pub fn spawn_rows(rows: &[QuickAddRow]) -> Result<Vec<Creature>> {
    let mut creatures = Vec::new();
    for row in rows {
        creatures.extend(row.spawn()?);
    }
    Ok(creatures)
}
