//! Bulk initiative re-roll for monsters.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::snapshot::EncounterSnapshot;

/// The die rolled for monster initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeDice {
    pub min: i32,
    pub max: i32,
    /// Add each creature's `initiative_mod` to its roll.
    pub apply_modifiers: bool,
}

impl Default for InitiativeDice {
    fn default() -> Self {
        Self {
            min: 1,
            max: 20,
            apply_modifiers: true,
        }
    }
}

impl InitiativeDice {
    /// Roll once, uniform over `min..=max`. A reversed range is treated as
    /// its swap.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, initiative_mod: i32) -> i32 {
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let roll = rng.gen_range(low..=high);
        if self.apply_modifiers {
            roll.saturating_add(initiative_mod)
        } else {
            roll
        }
    }
}

impl EncounterSnapshot {
    /// Give every monster a fresh initiative roll; players keep theirs.
    /// The order is re-sorted once, after all rolls.
    #[must_use]
    pub fn roll_monster_initiative<R: Rng + ?Sized>(mut self, rng: &mut R, dice: &InitiativeDice) -> Self {
        let mut rolled = 0usize;
        for creature in self.creatures.values_mut().filter(|creature| creature.is_monster()) {
            creature.initiative = dice.roll(&mut *rng, creature.initiative_mod);
            rolled += 1;
        }

        if rolled > 0 {
            self.resort();
        }
        log::debug!("Rolled initiative for {rolled} monster(s)");
        self
    }

    /// [`Self::roll_monster_initiative`] with a d20 and the thread RNG.
    #[must_use]
    pub fn roll_monster_initiative_default(self) -> Self {
        self.roll_monster_initiative(&mut rand::thread_rng(), &InitiativeDice::default())
    }
}
