//! Derivation engine
//!
//! Pure computations over one event's records:
//! - **raceclasses**: partition contestants into raceclasses by ageclass
//! - **bibs**: hand out start numbers following the starting order
//!
//! Nothing in here touches the store. Services load the records inside a
//! transaction, run the engine and persist its output in the same
//! transaction, so a failed run never leaves partial state behind.

pub mod bibs;
pub mod naming;
pub mod raceclasses;

pub use bibs::{assign_bibs, starting_order, BibAssignment};
pub use naming::raceclass_name;
pub use raceclasses::{generate_raceclasses, RaceclassPlan};

/// Normalized grouping key of an ageclass label
pub(crate) fn ageclass_key(ageclass: &str) -> &str {
    ageclass.trim()
}
