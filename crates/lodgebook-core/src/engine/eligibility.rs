//! Session eligibility filter.
//!
//! The single source of truth for "who belongs to this session's quorum".
//! Every screen that needs a roster or a denominator goes through
//! `eligible_roster` (or `is_eligible` for one member); nothing else may
//! re-derive these rules.

use crate::engine::degree::degree_at;
use crate::engine::status;
use crate::models::{Member, Session, StatusInterval};

/// Whether a member legitimately belongs to the given session's quorum.
///
/// All four conditions must hold at the session date:
/// - no disqualifying status override in force
/// - already in the lodge (explicit join date, or initiation as fallback;
///   a record with neither cannot be placed in the lodge and is excluded)
/// - not deceased before the session
/// - degree held on that date meets the session's minimum
pub fn is_eligible(member: &Member, intervals: &[StatusInterval], session: &Session) -> bool {
    if status::is_disqualified(member.id, intervals, session.date) {
        return false;
    }
    let Some(joined) = member.effective_join_date() else {
        return false;
    };
    if session.date < joined {
        return false;
    }
    if let Some(death) = member.death_date {
        if session.date > death {
            return false;
        }
    }
    degree_at(member, session.date).rank() >= session.minimum_degree
}

/// The exact set of members eligible for a session, in input order.
///
/// The returned roster is the denominator for every percentage statistic
/// computed for the session. Deterministic: identical inputs always produce
/// the identical roster.
pub fn eligible_roster<'a>(
    members: &'a [Member],
    intervals: &[StatusInterval],
    session: &Session,
) -> Vec<&'a Member> {
    members
        .iter()
        .filter(|m| is_eligible(m, intervals, session))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
