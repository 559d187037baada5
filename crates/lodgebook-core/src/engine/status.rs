//! Temporal status overlay.
//!
//! Resolves which administrative override, if any, was in force for a member
//! on a given date, and whether it bars them from session participation.
//! Only intervals in the `Active` record state are consulted; expired and
//! cancelled rows are history.

use chrono::NaiveDate;
use std::cmp::Reverse;

use crate::models::{IntervalState, StatusInterval};

fn in_force_for<'a>(
    member_id: i64,
    intervals: &'a [StatusInterval],
    on: NaiveDate,
) -> impl Iterator<Item = &'a StatusInterval> {
    intervals.iter().filter(move |iv| {
        iv.member_id == member_id && iv.state == IntervalState::Active && iv.in_force(on)
    })
}

/// The status override in force for a member on the given date, or None.
///
/// Source data can hold overlapping intervals of different kinds for the
/// same member. The most restrictive kind wins; ties fall to the earliest
/// start date, then the lowest id, so the result never depends on the order
/// the rows arrived in.
pub fn active_status<'a>(
    member_id: i64,
    intervals: &'a [StatusInterval],
    on: NaiveDate,
) -> Option<&'a StatusInterval> {
    in_force_for(member_id, intervals, on)
        .min_by_key(|iv| (Reverse(iv.kind.severity()), iv.start_date, iv.id))
}

/// Display label for the override in force on the given date, if any.
pub fn active_status_label(
    member_id: i64,
    intervals: &[StatusInterval],
    on: NaiveDate,
) -> Option<&'static str> {
    active_status(member_id, intervals, on).map(|iv| iv.kind.label())
}

/// Whether any override in force on the given date bars the member from
/// session participation. Checked across all in-force intervals, not just
/// the most restrictive one, so an on-leave badge never masks a suspension.
pub fn is_disqualified(member_id: i64, intervals: &[StatusInterval], on: NaiveDate) -> bool {
    in_force_for(member_id, intervals, on).any(|iv| iv.kind.is_disqualifying())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IntervalKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(
        id: i64,
        member_id: i64,
        kind: IntervalKind,
        start: NaiveDate,
        end: Option<NaiveDate>,
        state: IntervalState,
    ) -> StatusInterval {
        StatusInterval {
            id,
            member_id,
            kind,
            start_date: start,
            end_date: end,
            state,
        }
    }

    #[test]
    fn test_no_intervals_means_no_status() {
        assert_eq!(active_status(1, &[], date(2024, 1, 1)), None);
        assert!(!is_disqualified(1, &[], date(2024, 1, 1)));
    }

    #[test]
    fn test_only_active_state_consulted() {
        let intervals = vec![
            interval(1, 1, IntervalKind::Suspended, date(2023, 1, 1), None, IntervalState::Cancelled),
            interval(2, 1, IntervalKind::Excluded, date(2023, 1, 1), None, IntervalState::Expired),
        ];
        assert!(!is_disqualified(1, &intervals, date(2023, 6, 1)));
        assert_eq!(active_status(1, &intervals, date(2023, 6, 1)), None);
    }

    #[test]
    fn test_other_members_intervals_ignored() {
        let intervals = vec![interval(
            1, 2, IntervalKind::Suspended, date(2023, 1, 1), None, IntervalState::Active,
        )];
        assert!(!is_disqualified(1, &intervals, date(2023, 6, 1)));
        assert!(is_disqualified(2, &intervals, date(2023, 6, 1)));
    }

    #[test]
    fn test_on_leave_not_disqualifying_but_surfaced() {
        let intervals = vec![interval(
            1, 1, IntervalKind::OnLeave, date(2023, 1, 1), Some(date(2023, 12, 31)), IntervalState::Active,
        )];
        assert!(!is_disqualified(1, &intervals, date(2023, 6, 1)));
        assert_eq!(active_status_label(1, &intervals, date(2023, 6, 1)), Some("On Leave"));
    }

    #[test]
    fn test_overlap_most_restrictive_wins() {
        // On-leave and a suspension overlap: the suspension is reported
        let intervals = vec![
            interval(1, 1, IntervalKind::OnLeave, date(2023, 1, 1), None, IntervalState::Active),
            interval(2, 1, IntervalKind::Suspended, date(2023, 2, 1), Some(date(2023, 8, 1)), IntervalState::Active),
        ];
        let active = active_status(1, &intervals, date(2023, 6, 1)).unwrap();
        assert_eq!(active.kind, IntervalKind::Suspended);
        assert!(is_disqualified(1, &intervals, date(2023, 6, 1)));
        // Outside the suspension window only the leave remains
        let active = active_status(1, &intervals, date(2023, 9, 1)).unwrap();
        assert_eq!(active.kind, IntervalKind::OnLeave);
        assert!(!is_disqualified(1, &intervals, date(2023, 9, 1)));
    }

    #[test]
    fn test_overlap_tie_break_is_order_independent() {
        let a = interval(10, 1, IntervalKind::Suspended, date(2023, 3, 1), None, IntervalState::Active);
        let b = interval(7, 1, IntervalKind::Suspended, date(2023, 1, 1), None, IntervalState::Active);
        let forward = vec![a.clone(), b.clone()];
        let backward = vec![b, a];
        let on = date(2023, 6, 1);
        // Same severity: earlier start date wins regardless of row order
        assert_eq!(active_status(1, &forward, on).unwrap().id, 7);
        assert_eq!(active_status(1, &backward, on).unwrap().id, 7);
    }

    #[test]
    fn test_disqualified_even_when_leave_is_not_most_recent() {
        // A disqualifying interval must be honored even if another in-force
        // interval exists alongside it
        let intervals = vec![
            interval(1, 1, IntervalKind::OnLeave, date(2023, 1, 1), None, IntervalState::Active),
            interval(2, 1, IntervalKind::Irregular, date(2023, 1, 15), None, IntervalState::Active),
        ];
        assert!(is_disqualified(1, &intervals, date(2023, 6, 1)));
    }

    #[test]
    fn test_interval_boundaries_inclusive() {
        let intervals = vec![interval(
            1, 1, IntervalKind::Suspended, date(2023, 1, 1), Some(date(2023, 3, 31)), IntervalState::Active,
        )];
        assert!(is_disqualified(1, &intervals, date(2023, 1, 1)));
        assert!(is_disqualified(1, &intervals, date(2023, 3, 31)));
        assert!(!is_disqualified(1, &intervals, date(2022, 12, 31)));
        assert!(!is_disqualified(1, &intervals, date(2023, 4, 1)));
    }
}
