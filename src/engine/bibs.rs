//! Bib assignment
//!
//! Raceclasses are ordered by `(group, order)`; within a raceclass
//! contestants are ordered by seeding points (when the raceclass is seeded)
//! and then by last name, first name and id. Bibs are handed out from one
//! running counter over that flattened sequence.

use std::{cmp::Ordering, collections::HashMap};

use uuid::Uuid;

use super::ageclass_key;
use crate::{
    error::{DomainError, UnplacedContestant},
    models::{Contestant, Raceclass},
};

/// Bib number for one contestant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibAssignment {
    pub contestant_id: Uuid,
    pub bib: i32,
}

/// Order raceclasses by `(group, order)`.
///
/// Unset positions and ties are rejected: an ambiguous starting order is a
/// configuration error, never resolved arbitrarily.
pub fn starting_order(raceclasses: &[Raceclass]) -> Result<Vec<&Raceclass>, DomainError> {
    if let Some(raceclass) = raceclasses.iter().find(|r| r.group < 1 || r.order < 1) {
        return Err(DomainError::Configuration(format!(
            "raceclass '{}' has no valid value for group/order ({}/{})",
            raceclass.name, raceclass.group, raceclass.order
        )));
    }

    let mut ordered: Vec<&Raceclass> = raceclasses.iter().collect();
    ordered.sort_by(|a, b| (a.start_position(), &a.name).cmp(&(b.start_position(), &b.name)));

    if let Some(pair) = ordered
        .windows(2)
        .find(|pair| pair[0].start_position() == pair[1].start_position())
    {
        return Err(DomainError::Configuration(format!(
            "raceclasses '{}' and '{}' share group {} and order {}; the starting order is ambiguous",
            pair[0].name, pair[1].name, pair[0].group, pair[0].order
        )));
    }

    Ok(ordered)
}

/// Compute bibs for all contestants of an event, starting at `start_bib`.
///
/// The result is in ascending bib order. Either every contestant gets a
/// bib or the whole computation fails.
pub fn assign_bibs(
    raceclasses: &[Raceclass],
    contestants: &[Contestant],
    start_bib: i32,
) -> Result<Vec<BibAssignment>, DomainError> {
    if raceclasses.is_empty() {
        return Err(DomainError::PrerequisiteMissing(
            "event has no raceclasses; generate raceclasses before assigning bibs".to_string(),
        ));
    }
    if contestants.is_empty() {
        return Err(DomainError::PrerequisiteMissing(
            "event has no contestants".to_string(),
        ));
    }
    if start_bib < 1 {
        return Err(DomainError::Configuration(format!(
            "start bib must be a positive integer, got {start_bib}"
        )));
    }

    let ordered = starting_order(raceclasses)?;

    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    for (slot, raceclass) in ordered.iter().enumerate() {
        for ageclass in raceclass.ageclasses.iter().map(|a| ageclass_key(a)) {
            if let Some(&other) = slot_of.get(ageclass) {
                if other != slot {
                    return Err(DomainError::Configuration(format!(
                        "ageclass '{}' is covered by both raceclass '{}' and '{}'",
                        ageclass, ordered[other].name, raceclass.name
                    )));
                }
            }
            slot_of.insert(ageclass, slot);
        }
    }

    let mut slots: Vec<Vec<&Contestant>> = vec![Vec::new(); ordered.len()];
    let mut unplaced: Vec<UnplacedContestant> = Vec::new();
    for contestant in contestants {
        match slot_of.get(ageclass_key(&contestant.ageclass)) {
            Some(&slot) => slots[slot].push(contestant),
            None => unplaced.push(UnplacedContestant {
                id: contestant.id,
                name: contestant.full_name(),
                ageclass: contestant.ageclass.clone(),
            }),
        }
    }

    if !unplaced.is_empty() {
        unplaced.sort_by(|a, b| (&a.ageclass, &a.name, a.id).cmp(&(&b.ageclass, &b.name, b.id)));
        return Err(DomainError::UnassignedContestant {
            contestants: unplaced,
        });
    }

    let mut assignments = Vec::with_capacity(contestants.len());
    let mut next_bib = Some(start_bib);
    for (raceclass, members) in ordered.iter().zip(slots.iter_mut()) {
        if raceclass.seeding {
            members.sort_by(|a, b| by_seeding(a, b));
        } else {
            members.sort_by(|a, b| by_name(a, b));
        }

        for contestant in members.iter() {
            let bib = next_bib.ok_or_else(|| {
                DomainError::Configuration("bib numbers exceed the supported range".to_string())
            })?;
            assignments.push(BibAssignment {
                contestant_id: contestant.id,
                bib,
            });
            next_bib = bib.checked_add(1);
        }
    }

    Ok(assignments)
}

fn by_name(a: &Contestant, b: &Contestant) -> Ordering {
    a.last_name
        .cmp(&b.last_name)
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Highest seeding points first, contestants without points last
fn by_seeding(a: &Contestant, b: &Contestant) -> Ordering {
    let points = match (a.seeding_points, b.seeding_points) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    points.then_with(|| by_name(a, b))
}
