//! Member model: identity, lifecycle milestone dates, and degree handling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::family::FamilyMember;
use crate::utils::normalize_label;

// ============================================================================
// Degree Ordering
// ============================================================================

/// Masonic degree held by a member at a point in time.
///
/// Variants are declared in ascending order so the derived `Ord` matches
/// seniority. `InstalledMaster` sorts above `Master` but both share the same
/// numeric rank for session admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Degree {
    None = 0,
    Apprentice = 1,
    Companion = 2,
    Master = 3,
    InstalledMaster = 4,
}

impl Degree {
    /// Numeric rank used against a session's minimum degree requirement
    /// (0 = not yet initiated, 3 = Master or Installed Master).
    pub fn rank(&self) -> u8 {
        match self {
            Degree::None => 0,
            Degree::Apprentice => 1,
            Degree::Companion => 2,
            Degree::Master | Degree::InstalledMaster => 3,
        }
    }

    /// Get the display name for this degree.
    pub fn display_name(&self) -> &'static str {
        match self {
            Degree::None => "None",
            Degree::Apprentice => "Apprentice",
            Degree::Companion => "Companion",
            Degree::Master => "Master",
            Degree::InstalledMaster => "Installed Master",
        }
    }
}

// ============================================================================
// Member Status
// ============================================================================

/// Coarse present-tense status cached on the member record.
///
/// This is what the backend's free-text `status` field collapses to. The
/// authoritative time-bounded truth lives in status intervals; this label is
/// only a display hint for "today" views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    Regular,
    Irregular,
    Suspended,
    OnLeave,
    Dismissed,
    Excluded,
    Deceased,
    ExOfficio,
    Unknown,
}

impl MemberStatus {
    /// Parse a free-text status label into a MemberStatus enum value.
    /// Matching is case and diacritic insensitive and accepts the Spanish
    /// labels the backend stores alongside the English ones.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return MemberStatus::Unknown;
        };
        match normalize_label(label).as_str() {
            "regular" => MemberStatus::Regular,
            "irregular" => MemberStatus::Irregular,
            "suspended" | "suspendido" => MemberStatus::Suspended,
            "on leave" | "on-leave" | "licensed" | "licenciado" => MemberStatus::OnLeave,
            "dismissed" | "dado de baja" | "baja" => MemberStatus::Dismissed,
            "excluded" | "excluido" => MemberStatus::Excluded,
            "deceased" | "fallecido" => MemberStatus::Deceased,
            "ex-officio" | "ex-oficio" | "ex officio" | "ex oficio" => MemberStatus::ExOfficio,
            _ => MemberStatus::Unknown,
        }
    }

    /// Get the display name for this status.
    pub fn display_name(&self) -> &'static str {
        match self {
            MemberStatus::Regular => "Regular",
            MemberStatus::Irregular => "Irregular",
            MemberStatus::Suspended => "Suspended",
            MemberStatus::OnLeave => "On Leave",
            MemberStatus::Dismissed => "Dismissed",
            MemberStatus::Excluded => "Excluded",
            MemberStatus::Deceased => "Deceased",
            MemberStatus::ExOfficio => "Ex-Officio",
            MemberStatus::Unknown => "Unknown",
        }
    }
}

// ============================================================================
// Member
// ============================================================================

/// A lodge member with lifecycle milestone dates.
///
/// Milestones are read-only inputs to the engine: `initiation_date` (1st
/// degree), `raising_date` (2nd), `exaltation_date` (3rd) and
/// `installation_date` (chair installation, only meaningful together with
/// `installed_master`). `join_date` is the explicit lodge-entry date; older
/// records leave it empty and fall back to the initiation date.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub status: MemberStatus,
    pub join_date: Option<NaiveDate>,
    pub initiation_date: Option<NaiveDate>,
    pub raising_date: Option<NaiveDate>,
    pub exaltation_date: Option<NaiveDate>,
    pub installation_date: Option<NaiveDate>,
    pub installed_master: bool,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub family: Vec<FamilyMember>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// The date the member entered the lodge: explicit join date when
    /// recorded, otherwise the initiation date. None means the record cannot
    /// place the member in the lodge at any date.
    pub fn effective_join_date(&self) -> Option<NaiveDate> {
        self.join_date.or(self.initiation_date)
    }
}

// ============================================================================
// Tests
// ============================================================================
