//! Manual reordering (drag and drop onto another creature).
//!
//! Callers see display order, so the move happens there: the dragged
//! creature takes the destination's slot and adopts its initiative. The
//! cursor is then shifted so the same creature stays up, counting the active
//! creature as "not yet acted".

use super::creature::CreatureId;
use super::snapshot::{rotate_to_turn, EncounterSnapshot};

impl EncounterSnapshot {
    /// Move `source` onto `destination`'s slot in display order.
    ///
    /// Unknown ids and `source == destination` leave the encounter untouched.
    #[must_use]
    pub fn reorder_creature(mut self, source: CreatureId, destination: CreatureId) -> Self {
        if source == destination {
            return self;
        }

        let (Some(source_index), Some(destination_index), Some(destination_initiative)) = (
            self.position(source),
            self.position(destination),
            self.creature(destination).map(|creature| creature.initiative),
        ) else {
            log::warn!("Cannot reorder {source} onto {destination}: unknown creature");
            return self;
        };

        if let Some(creature) = self.creatures.get_mut(&source) {
            creature.initiative = destination_initiative;
        }

        let len = self.order.len();
        let turn = self.cursor.current_turn;

        let mut display = rotate_to_turn(&self.order, turn);
        let Some(slot) = display.iter().position(|id| *id == destination) else {
            return self;
        };
        display.retain(|id| *id != source);
        display.insert(slot, source);

        // Canonical positions decide whether the move crosses the cursor
        if source_index < turn && destination_index >= turn {
            self.cursor.current_turn -= 1;
        } else if source_index >= turn && destination_index < turn {
            self.cursor.current_turn += 1;
        }
        if self.cursor.current_turn >= len {
            // The active creature was dropped behind everyone who already
            // acted, so the next round begins.
            self.cursor.current_turn = 0;
            self.cursor.round += 1;
        }

        display.rotate_right(self.cursor.current_turn);
        self.order = display;
        self.resort();

        log::debug!("Reordered {source} onto {destination} at initiative {destination_initiative}");
        self
    }

    /// Drag-and-drop entry point: positions are in display order.
    /// Positions past the end are ignored.
    #[must_use]
    pub fn reorder_by_display_position(self, from: usize, to: usize) -> Self {
        let display = self.display_order();
        match (display.get(from), display.get(to)) {
            (Some(source), Some(destination)) => self.reorder_creature(*source, *destination),
            _ => {
                log::warn!("Ignoring reorder from display position {from} to {to}");
                self
            }
        }
    }
}
