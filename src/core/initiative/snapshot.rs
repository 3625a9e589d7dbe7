//! Encounter snapshot: the aggregate every operation transforms.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::creature::{Creature, CreatureId};
use super::cursor::TurnCursor;
use super::ordering;

/// Structural problems a snapshot can have. Mutators never produce these;
/// they surface when checking restored or hand-built state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("creature {0} is in the turn order but not in the roster")]
    MissingCreature(CreatureId),

    #[error("creature {0} is in the roster but not in the turn order")]
    Unordered(CreatureId),

    #[error("creature {0} appears more than once in the turn order")]
    DuplicateEntry(CreatureId),

    #[error("roster key {key} holds creature {id}")]
    KeyMismatch { key: CreatureId, id: CreatureId },

    #[error("turn order is not sorted by initiative")]
    Unsorted,

    #[error("tie-break ranks are not normalized")]
    TiesNotNormalized,

    #[error("current turn {current_turn} is out of range for {len} creatures")]
    TurnOutOfRange { current_turn: usize, len: usize },

    #[error("creature {id} has {current_hp} hp, above its maximum of {max_hp}")]
    HpAboveMax {
        id: CreatureId,
        current_hp: u32,
        max_hp: u32,
    },
}

/// Complete, serializable state of one combat.
///
/// Operations consume the snapshot and hand back the next one; the caller
/// owns storage. An operation that does not apply returns its input as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub(crate) creatures: BTreeMap<CreatureId, Creature>,
    pub(crate) order: Vec<CreatureId>,
    #[serde(flatten)]
    pub(crate) cursor: TurnCursor,
}

impl EncounterSnapshot {
    /// An empty encounter at the start of round 0.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn contains(&self, id: CreatureId) -> bool {
        self.creatures.contains_key(&id)
    }

    pub fn creatures(&self) -> &BTreeMap<CreatureId, Creature> {
        &self.creatures
    }

    /// Canonical order, independent of whose turn it is.
    pub fn order(&self) -> &[CreatureId] {
        &self.order
    }

    pub fn cursor(&self) -> TurnCursor {
        self.cursor
    }

    pub fn current_turn(&self) -> usize {
        self.cursor.current_turn
    }

    pub fn round(&self) -> u32 {
        self.cursor.round
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.cursor.is_started()
    }

    /// Index of `id` in canonical order.
    pub fn position(&self, id: CreatureId) -> Option<usize> {
        self.order.iter().position(|entry| *entry == id)
    }

    /// The creature whose turn it is, if there is anyone.
    pub fn current_creature(&self) -> Option<&Creature> {
        self.order
            .get(self.cursor.current_turn)
            .and_then(|id| self.creatures.get(id))
    }

    /// Canonical order rotated so the active creature comes first.
    pub fn display_order(&self) -> Vec<CreatureId> {
        rotate_to_turn(&self.order, self.cursor.current_turn)
    }

    /// Creatures in display order.
    pub fn display_creatures(&self) -> Vec<&Creature> {
        self.display_order()
            .into_iter()
            .filter_map(|id| self.creatures.get(&id))
            .collect()
    }

    // ========================================================================
    // Turn cursor
    // ========================================================================

    /// Hand the turn to the next creature.
    #[must_use]
    pub fn next_turn(mut self) -> Self {
        self.cursor.advance(self.order.len());
        log::debug!(
            "Advanced to turn {} of round {}",
            self.cursor.current_turn,
            self.cursor.round
        );
        self
    }

    /// Hand the turn back to the previous creature.
    #[must_use]
    pub fn previous_turn(mut self) -> Self {
        self.cursor.retreat(self.order.len());
        log::debug!(
            "Stepped back to turn {} of round {}",
            self.cursor.current_turn,
            self.cursor.round
        );
        self
    }

    // ========================================================================
    // Turn preservation
    // ========================================================================

    /// Run a membership change while keeping the same creature up.
    ///
    /// Once combat has started and more than one creature remains, the
    /// cursor follows the creature that held it before `mutation` ran. If
    /// that creature is gone the index is left alone, wrapping to the top of
    /// the order if it now points past the end.
    pub(crate) fn preserving_current_turn(mut self, mutation: impl FnOnce(&mut Self)) -> Self {
        let anchor = self.order.get(self.cursor.current_turn).copied();

        mutation(&mut self);

        if self.creatures.len() > 1 && self.cursor.is_started() {
            if let Some(index) = anchor.and_then(|id| self.position(id)) {
                self.cursor.current_turn = index;
            }
        }
        self.cursor.fit(self.order.len());

        self
    }

    pub(crate) fn resort(&mut self) {
        ordering::sort_order(&mut self.creatures, &mut self.order);
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Verify the roster/order bijection, sort order, tie ranks, hit point
    /// bounds and cursor range.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::with_capacity(self.order.len());
        for id in &self.order {
            if !seen.insert(*id) {
                return Err(InvariantViolation::DuplicateEntry(*id));
            }
            if !self.creatures.contains_key(id) {
                return Err(InvariantViolation::MissingCreature(*id));
            }
        }

        for (key, creature) in &self.creatures {
            if *key != creature.id {
                return Err(InvariantViolation::KeyMismatch {
                    key: *key,
                    id: creature.id,
                });
            }
            if !seen.contains(key) {
                return Err(InvariantViolation::Unordered(*key));
            }
            if creature.current_hp > creature.max_hp {
                return Err(InvariantViolation::HpAboveMax {
                    id: creature.id,
                    current_hp: creature.current_hp,
                    max_hp: creature.max_hp,
                });
            }
        }

        if !ordering::is_sorted(&self.creatures, &self.order) {
            return Err(InvariantViolation::Unsorted);
        }
        if !ordering::ties_normalized(&self.creatures, &self.order) {
            return Err(InvariantViolation::TiesNotNormalized);
        }

        let len = self.order.len();
        if self.cursor.current_turn >= len.max(1) {
            return Err(InvariantViolation::TurnOutOfRange {
                current_turn: self.cursor.current_turn,
                len,
            });
        }

        Ok(())
    }
}

/// `order` rotated left by `turn`.
pub(crate) fn rotate_to_turn(order: &[CreatureId], turn: usize) -> Vec<CreatureId> {
    let mut rotated = order.to_vec();
    if !rotated.is_empty() {
        let len = rotated.len();
        rotated.rotate_left(turn % len);
    }
    rotated
}
