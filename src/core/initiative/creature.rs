//! Creature records tracked by an encounter.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Identity
// ============================================================================

/// Opaque identifier for a creature. Assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(Uuid);

impl CreatureId {
    /// Generate a fresh, never-before-seen id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for CreatureId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreatureKind {
    Player,
    #[default]
    Monster,
}

impl CreatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureKind::Player => "player",
            CreatureKind::Monster => "monster",
        }
    }
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Creature
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub(crate) id: CreatureId,
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub ac: u32,
    pub initiative: i32,
    /// Added to the die roll when monster initiative is re-rolled.
    #[serde(default)]
    pub initiative_mod: i32,
    /// Rank inside a group of equal initiatives. Owned by the ordering pass.
    #[serde(default)]
    pub(crate) tie_break: u32,
    pub kind: CreatureKind,
}

impl Creature {
    /// Create a creature at full health with a fresh id.
    pub fn new(name: impl Into<String>, initiative: i32, kind: CreatureKind) -> Self {
        Self {
            id: CreatureId::new(),
            name: name.into(),
            max_hp: 0,
            current_hp: 0,
            ac: 0,
            initiative,
            initiative_mod: 0,
            tie_break: 0,
            kind,
        }
    }

    /// Set maximum hit points and heal to full (builder style).
    #[must_use]
    pub fn with_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self.current_hp = max_hp;
        self
    }

    #[must_use]
    pub fn with_ac(mut self, ac: u32) -> Self {
        self.ac = ac;
        self
    }

    #[must_use]
    pub fn with_initiative_mod(mut self, initiative_mod: i32) -> Self {
        self.initiative_mod = initiative_mod;
        self
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn tie_break(&self) -> u32 {
        self.tie_break
    }

    pub fn is_monster(&self) -> bool {
        self.kind == CreatureKind::Monster
    }

    pub fn is_down(&self) -> bool {
        self.current_hp == 0
    }

    /// Shift current hit points by `delta`, clamped to `0..=max_hp`.
    /// Returns the new current HP.
    pub fn adjust_hp(&mut self, delta: i32) -> u32 {
        let hp = i64::from(self.current_hp) + i64::from(delta);
        // Clamped into 0..=max_hp, which always fits in u32
        self.current_hp = hp.clamp(0, i64::from(self.max_hp)) as u32;
        self.current_hp
    }

    /// Copy every stat into a new creature with its own id.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            id: CreatureId::new(),
            ..self.clone()
        }
    }

    pub(crate) fn apply_patch(&mut self, patch: &CreaturePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(ac) = patch.ac {
            self.ac = ac;
        }
        if let Some(max_hp) = patch.max_hp {
            self.max_hp = max_hp;
        }
        if let Some(current_hp) = patch.current_hp {
            self.current_hp = current_hp;
        }
        if let Some(initiative) = patch.initiative {
            self.initiative = initiative;
        }
        if let Some(initiative_mod) = patch.initiative_mod {
            self.initiative_mod = initiative_mod;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        self.current_hp = self.current_hp.min(self.max_hp);
    }
}

// ============================================================================
// Templates & Patches
// ============================================================================

/// Stats for a creature that has not been added to an encounter yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub name: String,
    pub max_hp: u32,
    pub ac: u32,
    pub initiative: i32,
    #[serde(default)]
    pub initiative_mod: i32,
    pub kind: CreatureKind,
}

impl CreatureTemplate {
    /// Instantiate the template as a full-health creature with a fresh id.
    pub fn spawn(&self) -> Creature {
        Creature::new(self.name.clone(), self.initiative, self.kind)
            .with_hp(self.max_hp)
            .with_ac(self.ac)
            .with_initiative_mod(self.initiative_mod)
    }
}

/// Fields an edit may change. `None` leaves the field untouched.
///
/// Identity and tie-break rank cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreaturePatch {
    pub name: Option<String>,
    pub ac: Option<u32>,
    pub max_hp: Option<u32>,
    pub current_hp: Option<u32>,
    pub initiative: Option<i32>,
    pub initiative_mod: Option<i32>,
    pub kind: Option<CreatureKind>,
}

impl CreaturePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn changes_initiative(&self, creature: &Creature) -> bool {
        self.initiative.is_some_and(|init| init != creature.initiative)
    }
}
