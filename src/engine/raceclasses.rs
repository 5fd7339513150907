//! Raceclass generation
//!
//! Contestants are grouped by ageclass. Every populated ageclass ends up in
//! exactly one output raceclass: either an existing raceclass that already
//! covers it (keeping its identity and attributes) or a synthesized one
//! placed in the groups following all reused groups.
//!
//! Synthesized raceclasses take their name, position and ranking from the
//! [`RaceclassesConfig`]. Ageclasses it does not list are ordered by age and
//! name, so re-running on unchanged input reproduces the same group/order
//! assignment.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use super::{ageclass_key, naming::raceclass_name};
use crate::{
    config::{GroupingFeature, RaceclassesConfig},
    error::{CapacityScope, DomainError},
    models::{CapacityLimits, Contestant, Raceclass},
};

/// Raceclass produced by a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceclassPlan {
    /// Identity of the reused raceclass, `None` when synthesized
    pub id: Option<Uuid>,
    pub name: String,
    pub group: i32,
    pub order: i32,
    pub ageclasses: Vec<String>,
    pub distance: Option<String>,
    pub no_of_contestants: i32,
    pub ranking: bool,
    pub seeding: bool,
}

/// Compute the complete raceclass set of an event.
///
/// `existing` is the event's current raceclass set; the result replaces it
/// entirely. Existing raceclasses without contestants are left out.
pub fn generate_raceclasses(
    contestants: &[Contestant],
    existing: &[Raceclass],
    limits: CapacityLimits,
    config: &RaceclassesConfig,
) -> Result<Vec<RaceclassPlan>, DomainError> {
    if contestants.is_empty() {
        return Err(DomainError::PrerequisiteMissing(
            "event has no contestants".to_string(),
        ));
    }

    let groups = group_by_ageclass(contestants)?;

    let mut existing: Vec<&Raceclass> = existing.iter().collect();
    existing.sort_by(|a, b| {
        (a.group, a.order, &a.name, a.id).cmp(&(b.group, b.order, &b.name, b.id))
    });

    let claims = claim_ageclasses(&existing, &groups)?;

    let mut plans: Vec<RaceclassPlan> = existing
        .iter()
        .filter_map(|raceclass| reuse(raceclass, &groups))
        .collect();

    let first_group = plans.iter().map(|p| p.group).max().unwrap_or(0) + 1;
    let unclaimed: Vec<(&str, &[&Contestant])> = groups
        .iter()
        .filter(|(ageclass, _)| !claims.contains_key(**ageclass))
        .map(|(ageclass, members)| (*ageclass, members.as_slice()))
        .collect();
    plans.extend(synthesize(unclaimed, first_group, config));

    plans.sort_by(|a, b| (a.group, a.order, &a.name).cmp(&(b.group, b.order, &b.name)));

    check_unique_names(&plans)?;
    for plan in &plans {
        check_capacity(plan, limits)?;
    }

    Ok(plans)
}

/// Place the ageclasses no existing raceclass covers, starting at `first_group`
fn synthesize(
    mut unclaimed: Vec<(&str, &[&Contestant])>,
    first_group: i32,
    config: &RaceclassesConfig,
) -> Vec<RaceclassPlan> {
    unclaimed.sort_by_cached_key(|(ageclass, members)| priority(*ageclass, members, config));

    let mut plans = Vec::with_capacity(unclaimed.len());
    let mut group = first_group - 1;
    let mut order = 0;
    let mut previous_age: Option<&str> = None;

    for (ageclass, members) in unclaimed {
        let age = age_of(ageclass);
        let starts_group = match config.grouping_feature {
            GroupingFeature::SameAge => previous_age != Some(age),
            GroupingFeature::SingleGroup => previous_age.is_none(),
        };
        if starts_group {
            group += 1;
            order = 0;
        }
        previous_age = Some(age);
        order += 1;

        plans.push(RaceclassPlan {
            id: None,
            name: raceclass_name(ageclass, &config.naming_rules),
            group,
            order,
            ageclasses: vec![ageclass.to_string()],
            distance: members.iter().find_map(|c| c.distance.clone()),
            no_of_contestants: to_count(members.len()),
            ranking: !listed(&config.unranked_ageclasses, ageclass),
            seeding: false,
        });
    }

    plans
}

/// Sort key of a synthesized raceclass: declared ageclass rank, age, declared gender rank, name
fn priority<'a>(
    ageclass: &'a str,
    members: &[&Contestant],
    config: &RaceclassesConfig,
) -> (usize, &'a str, usize, &'a str) {
    let rank = position(&config.ageclass_order, ageclass).unwrap_or(usize::MAX);
    let age = match config.grouping_feature {
        GroupingFeature::SameAge => age_of(ageclass),
        GroupingFeature::SingleGroup => "",
    };
    let gender = members
        .iter()
        .find_map(|c| c.gender.as_deref())
        .and_then(|gender| position(&config.gender_order, gender))
        .unwrap_or(usize::MAX);

    (rank, age, gender, ageclass)
}

/// Age part of an ageclass label: everything after the leading gender word
fn age_of(ageclass: &str) -> &str {
    ageclass
        .split_once(char::is_whitespace)
        .map(|(_, age)| age.trim())
        .unwrap_or("")
}

fn position(list: &[String], value: &str) -> Option<usize> {
    let value = value.trim();
    list.iter().position(|entry| ageclass_key(entry) == value)
}

fn listed(list: &[String], value: &str) -> bool {
    position(list, value).is_some()
}

/// No two raceclasses of an event may share a name
fn check_unique_names(plans: &[RaceclassPlan]) -> Result<(), DomainError> {
    let mut seen: BTreeMap<&str, &RaceclassPlan> = BTreeMap::new();

    for plan in plans {
        if let Some(other) = seen.insert(plan.name.as_str(), plan) {
            return Err(DomainError::Configuration(format!(
                "ageclasses '{}' and '{}' both map to raceclass name '{}'",
                other.ageclasses.join(", "),
                plan.ageclasses.join(", "),
                plan.name
            )));
        }
    }

    Ok(())
}

/// Group contestants by ageclass; members sorted by last name, first name, id
fn group_by_ageclass(
    contestants: &[Contestant],
) -> Result<BTreeMap<&str, Vec<&Contestant>>, DomainError> {
    let mut groups: BTreeMap<&str, Vec<&Contestant>> = BTreeMap::new();

    for contestant in contestants {
        let key = ageclass_key(&contestant.ageclass);
        if key.is_empty() {
            return Err(DomainError::InvalidContestant {
                contestant: contestant.id.to_string(),
                message: format!("{} has an empty ageclass", contestant.full_name()),
            });
        }
        groups.entry(key).or_default().push(contestant);
    }

    for members in groups.values_mut() {
        members.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
    }

    Ok(groups)
}

/// Map every populated ageclass to the single existing raceclass covering it
fn claim_ageclasses<'a>(
    existing: &[&'a Raceclass],
    groups: &BTreeMap<&str, Vec<&Contestant>>,
) -> Result<BTreeMap<String, &'a Raceclass>, DomainError> {
    let mut claims: BTreeMap<String, &Raceclass> = BTreeMap::new();

    for &raceclass in existing {
        for ageclass in raceclass.ageclasses.iter().map(|a| ageclass_key(a)) {
            if !groups.contains_key(ageclass) {
                continue;
            }
            match claims.get(ageclass) {
                Some(other) if other.id != raceclass.id => {
                    return Err(DomainError::Configuration(format!(
                        "ageclass '{}' is covered by both raceclass '{}' and '{}'",
                        ageclass, other.name, raceclass.name
                    )));
                }
                Some(_) => {}
                None => {
                    claims.insert(ageclass.to_string(), raceclass);
                }
            }
        }
    }

    Ok(claims)
}

/// Carry an existing raceclass over, or drop it when none of its ageclasses is populated
fn reuse(raceclass: &Raceclass, groups: &BTreeMap<&str, Vec<&Contestant>>) -> Option<RaceclassPlan> {
    let ageclasses: BTreeSet<&str> = raceclass.ageclasses.iter().map(|a| ageclass_key(a)).collect();
    let count: usize = ageclasses
        .iter()
        .filter_map(|a| groups.get(a))
        .map(Vec::len)
        .sum();

    if count == 0 {
        return None;
    }

    Some(RaceclassPlan {
        id: Some(raceclass.id),
        name: raceclass.name.clone(),
        group: raceclass.group,
        order: raceclass.order,
        ageclasses: raceclass.ageclasses.clone(),
        distance: raceclass.distance.clone(),
        no_of_contestants: to_count(count),
        ranking: raceclass.ranking,
        seeding: raceclass.seeding,
    })
}

fn check_capacity(plan: &RaceclassPlan, limits: CapacityLimits) -> Result<(), DomainError> {
    let bounds = [
        (CapacityScope::Raceclass, limits.max_in_raceclass),
        (CapacityScope::Race, limits.max_in_race),
    ];

    for (scope, limit) in bounds {
        let Some(limit) = limit else { continue };
        let count = usize::try_from(plan.no_of_contestants).unwrap_or(usize::MAX);
        if count > usize::try_from(limit).unwrap_or(0) {
            return Err(DomainError::CapacityExceeded {
                scope,
                raceclass: plan.name.clone(),
                ageclasses: plan.ageclasses.clone(),
                limit,
                count,
            });
        }
    }

    Ok(())
}

fn to_count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{contestant, crowd, raceclass};

    fn unbounded() -> CapacityLimits {
        CapacityLimits::default()
    }

    fn defaults() -> RaceclassesConfig {
        RaceclassesConfig::default()
    }

    fn shape(plans: &[RaceclassPlan]) -> Vec<(&str, i32, i32, bool)> {
        plans
            .iter()
            .map(|p| (p.name.as_str(), p.group, p.order, p.ranking))
            .collect()
    }

    #[test]
    fn test_synthesizes_raceclasses_in_ageclass_order() {
        let mut contestants = crowd("Jenter 15 år", 3);
        contestants.extend(crowd("Gutter 15 år", 2));

        let plans = generate_raceclasses(&contestants, &[], unbounded(), &defaults()).unwrap();

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].name, "G15");
        assert_eq!((plans[0].group, plans[0].order), (1, 1));
        assert_eq!(plans[0].no_of_contestants, 2);
        assert_eq!(plans[1].name, "J15");
        assert_eq!((plans[1].group, plans[1].order), (1, 2));
        assert_eq!(plans[1].no_of_contestants, 3);
        assert!(plans.iter().all(|p| p.ranking && !p.seeding && p.id.is_none()));
    }

    #[test]
    fn test_reuses_existing_raceclass_attributes() {
        let mut existing = raceclass("Jenter 15", 2, 3, &["J15"]);
        existing.seeding = true;
        existing.ranking = false;
        existing.distance = Some("5 km".into());

        let mut contestants = crowd("J15", 4);
        contestants.push(contestant("Per", "Hansen", "G16"));

        let plans = generate_raceclasses(
            &contestants,
            std::slice::from_ref(&existing),
            unbounded(),
            &defaults(),
        )
        .unwrap();

        assert_eq!(plans.len(), 2);
        let reused = &plans[0];
        assert_eq!(reused.id, Some(existing.id));
        assert_eq!(reused.name, "Jenter 15");
        assert_eq!((reused.group, reused.order), (2, 3));
        assert_eq!(reused.distance.as_deref(), Some("5 km"));
        assert!(reused.seeding && !reused.ranking);
        assert_eq!(reused.no_of_contestants, 4);

        // New ageclasses land in a group after all reused groups
        let synthesized = &plans[1];
        assert_eq!(synthesized.name, "G16");
        assert_eq!((synthesized.group, synthesized.order), (3, 1));
    }

    #[test]
    fn test_aggregated_raceclass_counts_all_its_ageclasses() {
        let existing = raceclass("Felles", 1, 1, &["J10", "G10"]);
        let mut contestants = crowd("J10", 2);
        contestants.extend(crowd("G10", 3));

        let plans = generate_raceclasses(&contestants, &[existing], unbounded(), &defaults()).unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].no_of_contestants, 5);
    }

    #[test]
    fn test_every_contestant_maps_to_exactly_one_raceclass() {
        let existing = vec![
            raceclass("Felles", 1, 1, &["J10", "G10"]),
            raceclass("Tomt", 1, 2, &["M 80"]),
        ];
        let mut contestants = crowd("J10", 2);
        contestants.extend(crowd("G10", 1));
        contestants.extend(crowd("K 17", 2));
        contestants.extend(crowd("M 17", 1));

        let plans = generate_raceclasses(&contestants, &existing, unbounded(), &defaults()).unwrap();

        for c in &contestants {
            let covering = plans.iter().filter(|p| p.ageclasses.contains(&c.ageclass)).count();
            assert_eq!(covering, 1, "ageclass {}", c.ageclass);
        }
        // Raceclass without contestants is omitted
        assert!(plans.iter().all(|p| p.name != "Tomt"));
        let total: i32 = plans.iter().map(|p| p.no_of_contestants).sum();
        assert_eq!(total as usize, contestants.len());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let mut contestants = crowd("J 12 år", 3);
        contestants.extend(crowd("G 12 år", 4));
        contestants.extend(crowd("Kvinner senior", 2));

        let first = generate_raceclasses(&contestants, &[], unbounded(), &defaults()).unwrap();

        // Persisted output becomes the existing set of the next run
        let stored: Vec<Raceclass> = first
            .iter()
            .map(|p| {
                let mut r = raceclass(&p.name, p.group, p.order, &[]);
                r.ageclasses = p.ageclasses.clone();
                r.no_of_contestants = p.no_of_contestants;
                r
            })
            .collect();
        let second = generate_raceclasses(&contestants, &stored, unbounded(), &defaults()).unwrap();

        let strip = |plans: &[RaceclassPlan]| -> Vec<(String, i32, i32, i32)> {
            plans
                .iter()
                .map(|p| (p.name.clone(), p.group, p.order, p.no_of_contestants))
                .collect()
        };
        assert_eq!(strip(&first), strip(&second));

        // Input order does not matter
        let mut reversed = contestants.clone();
        reversed.reverse();
        let third = generate_raceclasses(&reversed, &[], unbounded(), &defaults()).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_capacity_exceeded_names_ageclass() {
        let contestants = crowd("J15", 11);
        let limits = CapacityLimits {
            max_in_raceclass: Some(10),
            max_in_race: None,
        };

        let err = generate_raceclasses(&contestants, &[], limits, &defaults()).unwrap_err();

        match err {
            DomainError::CapacityExceeded {
                scope,
                ageclasses,
                limit,
                count,
                ..
            } => {
                assert_eq!(scope, CapacityScope::Raceclass);
                assert_eq!(ageclasses, vec!["J15".to_string()]);
                assert_eq!(limit, 10);
                assert_eq!(count, 11);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_capacity_at_limit_is_accepted() {
        let contestants = crowd("J15", 10);
        let limits = CapacityLimits {
            max_in_raceclass: Some(10),
            max_in_race: Some(10),
        };

        let plans = generate_raceclasses(&contestants, &[], limits, &defaults()).unwrap();
        assert!(plans.iter().all(|p| p.no_of_contestants <= 10));
    }

    #[test]
    fn test_race_limit_is_enforced() {
        let contestants = crowd("G14", 7);
        let limits = CapacityLimits {
            max_in_raceclass: Some(50),
            max_in_race: Some(6),
        };

        let err = generate_raceclasses(&contestants, &[], limits, &defaults()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::CapacityExceeded { scope: CapacityScope::Race, limit: 6, .. }
        ));
    }

    #[test]
    fn test_empty_ageclass_is_invalid_contestant() {
        let mut contestants = crowd("J15", 2);
        let blank = contestant("Ola", "Nordmann", "  ");
        let blank_id = blank.id;
        contestants.push(blank);

        let err = generate_raceclasses(&contestants, &[], unbounded(), &defaults()).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidContestant {
                contestant: blank_id.to_string(),
                message: "Ola Nordmann has an empty ageclass".to_string(),
            }
        );
    }

    #[test]
    fn test_ageclass_claimed_twice_is_configuration_error() {
        let existing = vec![
            raceclass("A", 1, 1, &["J15"]),
            raceclass("B", 1, 2, &["J15", "G15"]),
        ];
        let contestants = crowd("J15", 1);

        let err = generate_raceclasses(&contestants, &existing, unbounded(), &defaults()).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn test_no_contestants_is_prerequisite_missing() {
        let err = generate_raceclasses(&[], &[], unbounded(), &defaults()).unwrap_err();
        assert!(matches!(err, DomainError::PrerequisiteMissing(_)));
    }

    #[test]
    fn test_synthesized_distance_comes_from_contestants() {
        let mut first = contestant("Anne", "Aas", "K 18");
        first.distance = Some("10 km".into());
        let second = contestant("Berit", "Berg", "K 18");

        let plans = generate_raceclasses(&[second, first], &[], unbounded(), &defaults()).unwrap();
        assert_eq!(plans[0].distance.as_deref(), Some("10 km"));
    }

    fn with_gender(ageclass: &str, count: usize, gender: &str) -> Vec<Contestant> {
        crowd(ageclass, count)
            .into_iter()
            .map(|mut c| {
                c.gender = Some(gender.to_string());
                c
            })
            .collect()
    }

    #[test]
    fn test_same_age_shares_a_group() {
        let mut contestants = crowd("Jenter 16 år", 1);
        contestants.extend(crowd("Gutter 15 år", 2));
        contestants.extend(crowd("Jenter 15 år", 1));
        contestants.extend(crowd("Gutter 16 år", 3));

        let plans = generate_raceclasses(&contestants, &[], unbounded(), &defaults()).unwrap();

        assert_eq!(
            shape(&plans),
            vec![
                ("G15", 1, 1, true),
                ("J15", 1, 2, true),
                ("G16", 2, 1, true),
                ("J16", 2, 2, true),
            ]
        );
    }

    #[test]
    fn test_declared_order_takes_precedence() {
        let mut contestants = with_gender("Jenter 15 år", 1, "K");
        contestants.extend(with_gender("Gutter 15 år", 1, "M"));
        contestants.extend(with_gender("Jenter 16 år", 1, "K"));

        let config = RaceclassesConfig {
            ageclass_order: vec!["Jenter 16 år".to_string()],
            gender_order: vec!["K".to_string(), "M".to_string()],
            ..defaults()
        };
        let plans = generate_raceclasses(&contestants, &[], unbounded(), &config).unwrap();

        // Listed ageclass first; unlisted ones by age, then gender rank
        assert_eq!(
            shape(&plans),
            vec![("J16", 1, 1, true), ("J15", 2, 1, true), ("G15", 2, 2, true)]
        );
    }

    #[test]
    fn test_unranked_ageclasses() {
        let mut contestants = crowd("Jenter 10 år", 2);
        contestants.extend(crowd("Gutter 10 år", 2));

        let config = RaceclassesConfig {
            unranked_ageclasses: vec!["Jenter 10 år".to_string()],
            ..defaults()
        };
        let plans = generate_raceclasses(&contestants, &[], unbounded(), &config).unwrap();

        assert_eq!(
            shape(&plans),
            vec![("G10", 1, 1, true), ("J10", 1, 2, false)]
        );
    }

    #[test]
    fn test_single_group_orders_by_name() {
        let mut contestants = crowd("Jenter 16 år", 1);
        contestants.extend(crowd("Gutter 15 år", 1));
        contestants.extend(crowd("Jenter 15 år", 1));

        let config = RaceclassesConfig {
            grouping_feature: GroupingFeature::SingleGroup,
            ..defaults()
        };
        let plans = generate_raceclasses(&contestants, &[], unbounded(), &config).unwrap();

        assert_eq!(
            shape(&plans),
            vec![("G15", 1, 1, true), ("J15", 1, 2, true), ("J16", 1, 3, true)]
        );
    }

    #[test]
    fn test_colliding_synthesized_names_are_rejected() {
        let mut contestants = crowd("Jenter 15 år", 2);
        contestants.extend(crowd("J 15 år", 2));

        let err = generate_raceclasses(&contestants, &[], unbounded(), &defaults()).unwrap_err();

        assert_eq!(
            err,
            DomainError::Configuration(
                "ageclasses 'J 15 år' and 'Jenter 15 år' both map to raceclass name 'J15'"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_synthesized_name_colliding_with_reused_raceclass_is_rejected() {
        let existing = raceclass("J15", 1, 1, &["J15"]);
        let mut contestants = crowd("J15", 1);
        contestants.extend(crowd("Jenter 15 år", 1));

        let err = generate_raceclasses(&contestants, &[existing], unbounded(), &defaults())
            .unwrap_err();

        assert!(matches!(err, DomainError::Configuration(ref message) if message.contains("'J15'")));
    }
}
