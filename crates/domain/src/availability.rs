// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability checking for roster candidates.
//!
//! A driver or ambulance can take on a (date, shift) slot only if its own
//! status flag says `available` and no other assignment already claims it for
//! that exact slot. The check is a pure predicate over inputs the caller has
//! already fetched; it never touches a store.

use time::Date;

use crate::status::Shift;

/// The projection of an existing assignment that availability checking needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentSlot {
    /// The assignment's identifier.
    pub assignment_id: i64,
    /// The calendar day the slot covers.
    pub date: Date,
    /// The shift within the day.
    pub shift: Shift,
    /// The rostered driver.
    pub driver_id: i64,
    /// The rostered vehicle.
    pub ambulance_id: i64,
}

/// The candidate entity being checked for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterEntity {
    /// A driver, by id.
    Driver(i64),
    /// An ambulance, by id.
    Ambulance(i64),
}

impl RosterEntity {
    /// Returns true if the given slot already claims this entity.
    const fn occupies(&self, slot: &AssignmentSlot) -> bool {
        match self {
            Self::Driver(id) => slot.driver_id == *id,
            Self::Ambulance(id) => slot.ambulance_id == *id,
        }
    }
}

/// Decides whether an entity can take on a single (date, shift) slot.
///
/// `excluded_assignment_id` carries the id of the assignment being edited,
/// when there is one, so an edit-in-place does not conflict with itself.
///
/// Eligible iff the entity's own status is `available` and no assignment
/// other than the excluded one claims the entity for the same date and shift.
#[must_use]
pub fn is_entity_available(
    status_is_available: bool,
    entity: RosterEntity,
    date: Date,
    shift: Shift,
    existing: &[AssignmentSlot],
    excluded_assignment_id: Option<i64>,
) -> bool {
    if !status_is_available {
        return false;
    }

    !existing.iter().any(|slot| {
        slot.date == date
            && slot.shift == shift
            && entity.occupies(slot)
            && excluded_assignment_id != Some(slot.assignment_id)
    })
}

/// Decides whether an entity can take on every (date, shift) slot in a set.
///
/// Multi-day and range requests reduce to a logical AND of the single-day
/// predicate over each requested date; the caller expands ranges with
/// [`crate::generate_date_range`] first.
#[must_use]
pub fn is_entity_available_for_all(
    status_is_available: bool,
    entity: RosterEntity,
    dates: &[Date],
    shift: Shift,
    existing: &[AssignmentSlot],
    excluded_assignment_id: Option<i64>,
) -> bool {
    dates.iter().all(|date| {
        is_entity_available(
            status_is_available,
            entity,
            *date,
            shift,
            existing,
            excluded_assignment_id,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn slot(assignment_id: i64, date: Date, shift: Shift, driver: i64, ambulance: i64) -> AssignmentSlot {
        AssignmentSlot {
            assignment_id,
            date,
            shift,
            driver_id: driver,
            ambulance_id: ambulance,
        }
    }

    #[test]
    fn test_available_when_no_existing_assignments() {
        assert!(is_entity_available(
            true,
            RosterEntity::Driver(1),
            date!(2024 - 06 - 01),
            Shift::Morning,
            &[],
            None,
        ));
    }

    #[test]
    fn test_unavailable_status_always_fails() {
        assert!(!is_entity_available(
            false,
            RosterEntity::Driver(1),
            date!(2024 - 06 - 01),
            Shift::Morning,
            &[],
            None,
        ));
    }

    #[test]
    fn test_conflicting_slot_blocks_ambulance() {
        let existing = vec![slot(10, date!(2024 - 06 - 01), Shift::Morning, 1, 7)];
        assert!(!is_entity_available(
            true,
            RosterEntity::Ambulance(7),
            date!(2024 - 06 - 01),
            Shift::Morning,
            &existing,
            None,
        ));
    }

    #[test]
    fn test_other_shift_does_not_block() {
        let existing = vec![slot(10, date!(2024 - 06 - 01), Shift::Morning, 1, 7)];
        assert!(is_entity_available(
            true,
            RosterEntity::Ambulance(7),
            date!(2024 - 06 - 01),
            Shift::Night,
            &existing,
            None,
        ));
    }

    #[test]
    fn test_other_date_does_not_block() {
        let existing = vec![slot(10, date!(2024 - 06 - 01), Shift::Morning, 1, 7)];
        assert!(is_entity_available(
            true,
            RosterEntity::Driver(1),
            date!(2024 - 06 - 02),
            Shift::Morning,
            &existing,
            None,
        ));
    }

    #[test]
    fn test_excluded_assignment_does_not_conflict_with_itself() {
        // Editing assignment 10 in place must not trip over its own slot.
        let existing = vec![slot(10, date!(2024 - 06 - 01), Shift::Morning, 1, 7)];
        assert!(is_entity_available(
            true,
            RosterEntity::Ambulance(7),
            date!(2024 - 06 - 01),
            Shift::Morning,
            &existing,
            Some(10),
        ));
    }

    #[test]
    fn test_exclusion_only_skips_the_named_assignment() {
        let existing = vec![
            slot(10, date!(2024 - 06 - 01), Shift::Morning, 1, 7),
            slot(11, date!(2024 - 06 - 01), Shift::Morning, 2, 7),
        ];
        assert!(!is_entity_available(
            true,
            RosterEntity::Ambulance(7),
            date!(2024 - 06 - 01),
            Shift::Morning,
            &existing,
            Some(10),
        ));
    }

    #[test]
    fn test_multi_day_requires_every_day_free() {
        let existing = vec![slot(10, date!(2024 - 06 - 02), Shift::Morning, 1, 7)];
        let dates = vec![
            date!(2024 - 06 - 01),
            date!(2024 - 06 - 02),
            date!(2024 - 06 - 03),
        ];
        assert!(!is_entity_available_for_all(
            true,
            RosterEntity::Driver(1),
            &dates,
            Shift::Morning,
            &existing,
            None,
        ));

        let free_dates = vec![date!(2024 - 06 - 03), date!(2024 - 06 - 04)];
        assert!(is_entity_available_for_all(
            true,
            RosterEntity::Driver(1),
            &free_dates,
            Shift::Morning,
            &existing,
            None,
        ));
    }
}
