//! Core library for lodgebook - temporal eligibility, degree resolution,
//! and attendance statistics for a lodge administration console.
//!
//! The same handful of rules (who was a member on this date, what degree did
//! they hold then, do they count toward this session's quorum) used to be
//! re-implemented per screen, with drift. This crate is the single home for
//! those rules:
//!
//! - `models`: the typed domain model (members, degrees, status intervals,
//!   sessions, attendance, family)
//! - `engine`: pure computations - status overlay, degree-at-date,
//!   eligibility filter, attendance aggregation, anniversary consolidation
//! - `store`: the snapshot boundary where free-text backend records become
//!   the closed domain model
//!
//! The engine performs no I/O and keeps no state: every function takes its
//! reference date and its input collections explicitly, so results are
//! deterministic and reproducible for any historical date.

pub mod engine;
pub mod models;
pub mod store;
pub mod utils;

pub use engine::{
    active_status, active_status_label, degree_at, eligible_roster, find_anniversaries,
    is_disqualified, is_eligible, member_period_stats, perfect_attendance, summarize,
    AnniversaryPerson, AnniversaryScan, AnnualAttendance, PeriodStats, SessionSummary,
};
pub use models::{
    AttendanceRecord, Degree, FamilyMember, IntervalKind, IntervalState, Member, MemberStatus,
    Relation, Session, StatusInterval,
};
pub use store::{Snapshot, SnapshotError};
