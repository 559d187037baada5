//! The temporal eligibility and attendance engine.
//!
//! Pure functions over already-fetched collections: no I/O, no shared
//! mutable state, every date-sensitive computation takes its reference date
//! as an argument. Callers fetch each collection once per reporting window
//! and pass slices in; the engine re-derives everything from its arguments,
//! so it is safe to invoke per row, repeatedly, from any thread.

pub mod anniversaries;
pub mod attendance;
pub mod degree;
pub mod eligibility;
pub mod status;

pub use anniversaries::{find_anniversaries, AnniversaryPerson, AnniversaryScan, RelationRef};
pub use attendance::{
    member_period_stats, perfect_attendance, summarize, AnnualAttendance, PeriodStats,
    SessionSummary,
};
pub use degree::degree_at;
pub use eligibility::{eligible_roster, is_eligible};
pub use status::{active_status, active_status_label, is_disqualified};
