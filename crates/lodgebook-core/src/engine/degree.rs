//! Degree-at-date resolver.

use chrono::NaiveDate;

use crate::models::{Degree, Member};

/// The degree a member held on the given date.
///
/// Each milestone only counts if it had already happened on that date, so a
/// member who is a Master today resolves to Apprentice for a session that
/// predates their raising. Screens must always pass the session date here,
/// never "today".
///
/// Milestone ordering is not validated: a record whose raising date falls
/// after its exaltation date still resolves without panicking, it just
/// follows the precedence below.
pub fn degree_at(member: &Member, on: NaiveDate) -> Degree {
    let reached = |milestone: Option<NaiveDate>| milestone.map_or(false, |d| d <= on);

    if reached(member.exaltation_date) {
        if member.installed_master && reached(member.installation_date) {
            Degree::InstalledMaster
        } else {
            Degree::Master
        }
    } else if reached(member.raising_date) {
        Degree::Companion
    } else if reached(member.initiation_date) {
        Degree::Apprentice
    } else {
        Degree::None
    }
}

// ============================================================================
// Tests
// ============================================================================
