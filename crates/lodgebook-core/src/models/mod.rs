//! Data models for lodge entities.
//!
//! This module contains the typed domain model the engine computes over:
//!
//! - `Member`, `MemberStatus`, `Degree`: members and their lifecycle
//! - `StatusInterval`, `IntervalKind`, `IntervalState`: time-bounded overrides
//! - `Session`: lodge sessions and admission requirements
//! - `AttendanceRecord`: per-session presence/absence rows
//! - `FamilyMember`, `Relation`: declared family for anniversary scans
//!
//! Free-text backend labels are parsed into these closed enums once, at the
//! snapshot boundary (`crate::store`); everything past that point compares
//! enum values, never strings.

pub mod attendance;
pub mod family;
pub mod member;
pub mod session;
pub mod status_interval;

pub use attendance::AttendanceRecord;
pub use family::{FamilyMember, Relation};
pub use member::{Degree, Member, MemberStatus};
pub use session::{Session, DEFAULT_MINIMUM_DEGREE};
pub use status_interval::{IntervalKind, IntervalState, StatusInterval};
