//! Attendance aggregation.
//!
//! Folds raw attendance records against computed rosters to produce the
//! numbers the console screens display: per-session head counts, the annual
//! perfect-attendance roll, and one member's statistics over a date range.
//!
//! All aggregates are total functions over their inputs: no sessions, no
//! records, or an empty roster yields zeroed statistics, never an error or a
//! division by zero.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::engine::degree::degree_at;
use crate::engine::eligibility;
use crate::models::{AttendanceRecord, Member, Session, StatusInterval};

// ============================================================================
// Single Session (Contract A)
// ============================================================================

/// Head counts for one session. `total` is the roster size; members with no
/// attendance record count toward `total` but toward none of the buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct SessionSummary {
    pub total: usize,
    pub present: usize,
    pub absent_justified: usize,
    pub absent_unjustified: usize,
}

/// Fold attendance records for one session against its eligible roster.
///
/// Records for other sessions are ignored; records for people outside the
/// roster are ignored (they are not part of the denominator).
pub fn summarize(
    roster: &[&Member],
    session: &Session,
    records: &[AttendanceRecord],
) -> SessionSummary {
    let by_member: HashMap<i64, &AttendanceRecord> = records
        .iter()
        .filter(|r| r.session_id == session.id)
        .map(|r| (r.member_id, r))
        .collect();

    let mut summary = SessionSummary {
        total: roster.len(),
        ..Default::default()
    };
    for member in roster {
        match by_member.get(&member.id) {
            Some(r) if r.present => summary.present += 1,
            Some(r) if r.is_justified_absence() => summary.absent_justified += 1,
            Some(_) => summary.absent_unjustified += 1,
            // No record yet: counted in the denominator only
            None => {}
        }
    }
    summary
}

// ============================================================================
// Annual Perfect Attendance (Contract B)
// ============================================================================

/// One member's attendance across a calendar year.
///
/// `counted_sessions` is the number of that year's sessions the member was
/// eligible for, re-checked per session date: sessions before their join
/// date, above their then-held degree, or inside a disqualifying interval
/// never enter their denominator.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct AnnualAttendance {
    pub member_id: i64,
    pub member_name: String,
    pub counted_sessions: usize,
    pub present: usize,
    /// True only when the member attended every session they were counted
    /// for, and were counted for at least one.
    pub perfect: bool,
}

/// Compute the annual attendance roll for every member.
///
/// Eligibility is re-applied per (member, session) pair, not once per
/// member: a member raised mid-year picks up degree-2 sessions only from
/// their raising date onward. The record index is built once for the whole
/// call rather than re-scanned per pair.
pub fn perfect_attendance(
    members: &[Member],
    intervals: &[StatusInterval],
    sessions: &[Session],
    records: &[AttendanceRecord],
    year: i32,
) -> Vec<AnnualAttendance> {
    let in_year: Vec<&Session> = sessions.iter().filter(|s| s.date.year() == year).collect();
    let by_key: HashMap<(i64, i64), &AttendanceRecord> = records
        .iter()
        .map(|r| ((r.member_id, r.session_id), r))
        .collect();

    members
        .iter()
        .map(|member| {
            let mut counted = 0;
            let mut present = 0;
            for session in &in_year {
                if !eligibility::is_eligible(member, intervals, session) {
                    continue;
                }
                counted += 1;
                if by_key
                    .get(&(member.id, session.id))
                    .map_or(false, |r| r.present)
                {
                    present += 1;
                }
            }
            AnnualAttendance {
                member_id: member.id,
                member_name: member.full_name(),
                counted_sessions: counted,
                present,
                perfect: counted > 0 && present == counted,
            }
        })
        .collect()
}

// ============================================================================
// Member Period Statistics (Contract C)
// ============================================================================

/// One member's attendance statistics over a date range ("my attendance").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct PeriodStats {
    pub total: usize,
    pub present: usize,
    pub absent_justified: usize,
    pub absent_unjustified: usize,
    /// Whole-number percentage, 0 when no sessions were counted.
    pub rate: u32,
}

/// Statistics for one member over `[from, to]`.
///
/// Counts the sessions in range whose minimum degree the member's degree at
/// `reference_date` satisfies; administrative sessions are always included.
/// The reference date is explicit so "current degree" stays deterministic
/// under test instead of reading the system clock.
pub fn member_period_stats(
    member: &Member,
    sessions: &[Session],
    records: &[AttendanceRecord],
    from: NaiveDate,
    to: NaiveDate,
    reference_date: NaiveDate,
) -> PeriodStats {
    let rank = degree_at(member, reference_date).rank();
    let by_session: HashMap<i64, &AttendanceRecord> = records
        .iter()
        .filter(|r| r.member_id == member.id)
        .map(|r| (r.session_id, r))
        .collect();

    let mut stats = PeriodStats::default();
    for session in sessions.iter().filter(|s| s.date >= from && s.date <= to) {
        if !session.is_administrative() && session.minimum_degree > rank {
            continue;
        }
        stats.total += 1;
        match by_session.get(&session.id) {
            Some(r) if r.present => stats.present += 1,
            Some(r) if r.is_justified_absence() => stats.absent_justified += 1,
            Some(_) => stats.absent_unjustified += 1,
            None => {}
        }
    }
    stats.rate = if stats.total > 0 {
        ((stats.present as f64 / stats.total as f64) * 100.0).round() as u32
    } else {
        0
    };
    stats
}

// ============================================================================
// Tests
// ============================================================================
