//! Membership, edit and health operations.
//!
//! Stale references (ids that are no longer in the encounter) are ignored so
//! that a double click or an outdated view can never corrupt the state.

use super::creature::{Creature, CreatureId, CreaturePatch};
use super::form::parse_numeric;
use super::snapshot::EncounterSnapshot;

impl EncounterSnapshot {
    /// Add a single creature and re-sort.
    #[must_use]
    pub fn add_creature(self, creature: Creature) -> Self {
        self.add_creatures(std::iter::once(creature))
    }

    /// Add creatures in bulk with a single re-sort.
    ///
    /// Creatures sharing an initiative keep the order they were given in,
    /// behind anyone already at that count. A creature whose id is already
    /// present is skipped.
    #[must_use]
    pub fn add_creatures(self, creatures: impl IntoIterator<Item = Creature>) -> Self {
        self.preserving_current_turn(|encounter| {
            let mut added = 0usize;
            for mut creature in creatures {
                if encounter.creatures.contains_key(&creature.id) {
                    log::warn!("Creature {} is already in the encounter, skipping", creature.id);
                    continue;
                }
                creature.tie_break = 0;
                creature.current_hp = creature.current_hp.min(creature.max_hp);
                encounter.order.push(creature.id);
                encounter.creatures.insert(creature.id, creature);
                added += 1;
            }

            if added > 0 {
                encounter.resort();
                log::debug!("Added {added} creature(s), {} in encounter", encounter.len());
            }
        })
    }

    /// Remove a creature from the encounter.
    #[must_use]
    pub fn delete_creature(self, id: CreatureId) -> Self {
        if !self.contains(id) {
            log::warn!("Cannot delete unknown creature {id}");
            return self;
        }

        self.preserving_current_turn(|encounter| {
            if let Some(creature) = encounter.creatures.remove(&id) {
                log::debug!("Removed {} ({id})", creature.name);
            }
            encounter.order.retain(|entry| *entry != id);
            encounter.resort();
        })
    }

    /// Copy a creature, placing the copy directly after the original.
    #[must_use]
    pub fn duplicate_creature(self, id: CreatureId) -> Self {
        self.duplicate_creature_with_id(id).0
    }

    /// Like [`Self::duplicate_creature`], also returning the copy's id.
    pub fn duplicate_creature_with_id(self, id: CreatureId) -> (Self, Option<CreatureId>) {
        let (Some(source), Some(index)) = (self.creatures.get(&id), self.position(id)) else {
            log::warn!("Cannot duplicate unknown creature {id}");
            return (self, None);
        };

        let copy = source.duplicate();
        let copy_id = copy.id;
        let encounter = self.preserving_current_turn(|encounter| {
            encounter.order.insert(index + 1, copy_id);
            encounter.creatures.insert(copy_id, copy);
            encounter.resort();
        });

        log::debug!("Duplicated {id} as {copy_id}");
        (encounter, Some(copy_id))
    }

    /// Merge `patch` into an existing creature. Re-sorts only when the
    /// initiative actually changes; the cursor index is left alone.
    #[must_use]
    pub fn edit_creature(mut self, id: CreatureId, patch: CreaturePatch) -> Self {
        if patch.is_empty() {
            log::debug!("Empty edit for {id}, nothing to do");
            return self;
        }
        let Some(creature) = self.creatures.get_mut(&id) else {
            log::warn!("Cannot edit unknown creature {id}");
            return self;
        };

        let resort = patch.changes_initiative(creature);
        creature.apply_patch(&patch);
        if resort {
            self.resort();
        }

        log::debug!("Edited {id}");
        self
    }

    /// Set a creature's initiative and re-sort.
    #[must_use]
    pub fn set_initiative(self, id: CreatureId, initiative: i32) -> Self {
        self.edit_creature(
            id,
            CreaturePatch {
                initiative: Some(initiative),
                ..Default::default()
            },
        )
    }

    /// Set initiative from form text. Blank text means 0; anything that is
    /// not an integer leaves the encounter untouched.
    #[must_use]
    pub fn change_initiative(self, id: CreatureId, text: &str) -> Self {
        match parse_numeric(text) {
            Some(initiative) => self.set_initiative(id, initiative),
            None => {
                log::debug!("Ignoring non-numeric initiative {text:?} for {id}");
                self
            }
        }
    }

    /// Heal (positive) or damage (negative) a creature, clamped to
    /// `0..=max_hp`.
    #[must_use]
    pub fn adjust_health(mut self, id: CreatureId, delta: i32) -> Self {
        match self.creatures.get_mut(&id) {
            Some(creature) => {
                let hp = creature.adjust_hp(delta);
                log::debug!("{} is at {hp}/{} hp", creature.name, creature.max_hp);
            }
            None => log::warn!("Cannot adjust health of unknown creature {id}"),
        }
        self
    }

    /// Back to the top of round 0 with everyone at full health. Order and
    /// membership are kept.
    #[must_use]
    pub fn restart(mut self) -> Self {
        self.cursor.current_turn = 0;
        self.cursor.round = 0;
        for creature in self.creatures.values_mut() {
            creature.current_hp = creature.max_hp;
        }
        log::debug!("Restarted encounter with {} creature(s)", self.len());
        self
    }

    /// Drop everything and return the empty encounter.
    #[must_use]
    pub fn clear(self) -> Self {
        log::debug!("Cleared encounter");
        Self::new()
    }
}
