//! Initiative ordering.
//!
//! Canonical order is initiative descending, then tie-break rank ascending.
//! Every re-sort first seeds tie-break ranks from the current sequence, so a
//! creature that was just appended, duplicated or dragged keeps its place
//! among equal initiatives, and afterwards renormalizes the ranks in a single
//! scan so each tie group reads 0, 1, 2, ...

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::creature::{Creature, CreatureId};

/// Turn-order comparator: higher initiative first, lower tie-break rank first.
pub fn compare(a: &Creature, b: &Creature) -> Ordering {
    b.initiative
        .cmp(&a.initiative)
        .then_with(|| a.tie_break.cmp(&b.tie_break))
}

/// Re-sort `order` and renormalize tie-break ranks.
pub(crate) fn sort_order(creatures: &mut BTreeMap<CreatureId, Creature>, order: &mut [CreatureId]) {
    for (position, id) in order.iter().enumerate() {
        if let Some(creature) = creatures.get_mut(id) {
            creature.tie_break = u32::try_from(position).unwrap_or(u32::MAX);
        }
    }

    order.sort_by(|a, b| match (creatures.get(a), creatures.get(b)) {
        (Some(a), Some(b)) => compare(a, b),
        _ => Ordering::Equal,
    });

    renormalize_ties(creatures, order);
}

/// Number creatures sharing an initiative 0, 1, 2... in sequence order.
pub(crate) fn renormalize_ties(creatures: &mut BTreeMap<CreatureId, Creature>, order: &[CreatureId]) {
    let mut previous: Option<i32> = None;
    let mut rank = 0u32;

    for id in order {
        let Some(creature) = creatures.get_mut(id) else {
            continue;
        };
        rank = if previous == Some(creature.initiative) {
            rank + 1
        } else {
            0
        };
        creature.tie_break = rank;
        previous = Some(creature.initiative);
    }
}

/// True when `order` is non-decreasing under [`compare`].
pub fn is_sorted(creatures: &BTreeMap<CreatureId, Creature>, order: &[CreatureId]) -> bool {
    order.windows(2).all(|pair| match (creatures.get(&pair[0]), creatures.get(&pair[1])) {
        (Some(a), Some(b)) => compare(a, b) != Ordering::Greater,
        _ => false,
    })
}

/// True when every tie group carries consecutive ranks starting at 0.
pub fn ties_normalized(creatures: &BTreeMap<CreatureId, Creature>, order: &[CreatureId]) -> bool {
    let mut previous: Option<(i32, u32)> = None;

    for id in order {
        let Some(creature) = creatures.get(id) else {
            return false;
        };
        let expected = match previous {
            Some((initiative, rank)) if initiative == creature.initiative => rank + 1,
            _ => 0,
        };
        if creature.tie_break != expected {
            return false;
        }
        previous = Some((creature.initiative, creature.tie_break));
    }

    true
}
