//! Snapshot parsing: the single normalization boundary.
//!
//! The backend exports its tables as JSON with camelCase field names, string
//! dates, and free-text status labels. Everything stringly-typed is resolved
//! here, once, into the closed domain model; past this module the engine
//! never compares strings.
//!
//! Row-level problems (a record without an id, an interval referencing an
//! unknown member, an unparseable required date) are logged and the row
//! skipped. Only document-level failures surface as errors.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{
    AttendanceRecord, FamilyMember, IntervalKind, IntervalState, Member, MemberStatus, Relation,
    Session, StatusInterval,
};
use crate::store::error::SnapshotError;
use crate::utils::normalize_label;

// ============================================================================
// Wire records
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MemberRecord {
    pub id: Option<i64>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "joinDate")]
    pub join_date: Option<String>,
    #[serde(rename = "initiationDate")]
    pub initiation_date: Option<String>,
    #[serde(rename = "raisingDate")]
    pub raising_date: Option<String>,
    #[serde(rename = "exaltationDate")]
    pub exaltation_date: Option<String>,
    #[serde(rename = "installationDate")]
    pub installation_date: Option<String>,
    #[serde(rename = "installedMaster", default)]
    pub installed_master: bool,
    #[serde(rename = "birthDate")]
    pub birth_date: Option<String>,
    #[serde(rename = "deathDate")]
    pub death_date: Option<String>,
    #[serde(default)]
    pub family: Vec<FamilyRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyRecord {
    pub relation: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "birthDate")]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub deceased: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusIntervalRecord {
    pub id: Option<i64>,
    #[serde(rename = "memberId")]
    pub member_id: Option<i64>,
    pub kind: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    pub id: Option<i64>,
    pub date: Option<String>,
    #[serde(rename = "minimumDegreeRequired")]
    pub minimum_degree_required: Option<u8>,
    pub classification: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRow {
    #[serde(rename = "memberId")]
    pub member_id: Option<i64>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub present: bool,
    pub justification: Option<String>,
}

/// Top-level shape of the backend export.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    #[serde(rename = "statusIntervals", default)]
    pub status_intervals: Vec<StatusIntervalRecord>,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRow>,
}

// ============================================================================
// Snapshot
// ============================================================================

/// A point-in-time copy of the four collections the engine computes over.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub status_intervals: Vec<StatusInterval>,
    pub sessions: Vec<Session>,
    pub attendance: Vec<AttendanceRecord>,
}

/// Parse a date-only value from the export. Datetime strings are truncated
/// to their date part rather than instant-parsed, so a `T23:00:00Z` suffix
/// can never shift the civil date.
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let date_part: String = raw.chars().take(10).collect();
    NaiveDate::parse_from_str(&date_part, "%Y-%m-%d").ok()
}

fn parse_relation(raw: Option<&str>) -> Option<Relation> {
    match normalize_label(raw?).as_str() {
        "spouse" | "esposa" | "esposo" | "conyuge" => Some(Relation::Spouse),
        "parent" | "padre" | "madre" => Some(Relation::Parent),
        "child" | "hijo" | "hija" => Some(Relation::Child),
        _ => None,
    }
}

impl Snapshot {
    /// Parse a snapshot from the backend's JSON export.
    pub fn from_json(data: &str) -> Result<Self, SnapshotError> {
        let doc: SnapshotDocument = serde_json::from_str(data)?;
        Ok(Self::from_document(doc))
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Ok(Self::from_json(&contents)?)
    }

    /// Convert wire records into the typed domain model, dropping rows the
    /// engine could not interpret safely.
    pub fn from_document(doc: SnapshotDocument) -> Self {
        let mut members = Vec::with_capacity(doc.members.len());
        for record in doc.members {
            let Some(id) = record.id else {
                warn!("Member record without id skipped");
                continue;
            };
            let mut family = Vec::with_capacity(record.family.len());
            for f in record.family {
                let Some(relation) = parse_relation(f.relation.as_deref()) else {
                    warn!(member_id = id, relation = ?f.relation, "Unrecognized family relation skipped");
                    continue;
                };
                family.push(FamilyMember {
                    relation,
                    name: f.name.unwrap_or_default(),
                    birth_date: parse_date(f.birth_date.as_deref()),
                    deceased: f.deceased,
                });
            }
            members.push(Member {
                id,
                first_name: record.first_name.unwrap_or_default(),
                last_name: record.last_name.unwrap_or_default(),
                status: MemberStatus::from_label(record.status.as_deref()),
                join_date: parse_date(record.join_date.as_deref()),
                initiation_date: parse_date(record.initiation_date.as_deref()),
                raising_date: parse_date(record.raising_date.as_deref()),
                exaltation_date: parse_date(record.exaltation_date.as_deref()),
                installation_date: parse_date(record.installation_date.as_deref()),
                installed_master: record.installed_master,
                birth_date: parse_date(record.birth_date.as_deref()),
                death_date: parse_date(record.death_date.as_deref()),
                family,
            });
        }
        let member_ids: HashSet<i64> = members.iter().map(|m| m.id).collect();

        let mut status_intervals = Vec::with_capacity(doc.status_intervals.len());
        for record in doc.status_intervals {
            let Some(member_id) = record.member_id else {
                warn!(id = ?record.id, "Status interval without member id skipped");
                continue;
            };
            if !member_ids.contains(&member_id) {
                warn!(member_id, "Status interval references unknown member, skipped");
                continue;
            }
            let Some(start_date) = parse_date(record.start_date.as_deref()) else {
                warn!(member_id, start = ?record.start_date, "Status interval without valid start date skipped");
                continue;
            };
            status_intervals.push(StatusInterval {
                id: record.id.unwrap_or_default(),
                member_id,
                kind: IntervalKind::from_label(record.kind.as_deref()),
                start_date,
                end_date: parse_date(record.end_date.as_deref()),
                state: IntervalState::from_label(record.state.as_deref()),
            });
        }

        let mut sessions = Vec::with_capacity(doc.sessions.len());
        for record in doc.sessions {
            let Some(id) = record.id else {
                warn!("Session record without id skipped");
                continue;
            };
            let Some(date) = parse_date(record.date.as_deref()) else {
                warn!(session_id = id, date = ?record.date, "Session without valid date skipped");
                continue;
            };
            sessions.push(Session {
                id,
                date,
                minimum_degree: Session::clamp_minimum_degree(record.minimum_degree_required),
                classification: record.classification,
            });
        }
        let session_ids: HashSet<i64> = sessions.iter().map(|s| s.id).collect();

        let mut attendance = Vec::with_capacity(doc.attendance.len());
        for row in doc.attendance {
            let (Some(member_id), Some(session_id)) = (row.member_id, row.session_id) else {
                warn!("Attendance row without member/session id skipped");
                continue;
            };
            if !member_ids.contains(&member_id) || !session_ids.contains(&session_id) {
                warn!(member_id, session_id, "Attendance row references unknown record, skipped");
                continue;
            }
            attendance.push(AttendanceRecord {
                member_id,
                session_id,
                present: row.present,
                justification: row.justification,
            });
        }

        debug!(
            members = members.len(),
            intervals = status_intervals.len(),
            sessions = sessions.len(),
            attendance = attendance.len(),
            "Snapshot loaded"
        );
        Snapshot {
            members,
            status_intervals,
            sessions,
            attendance,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
