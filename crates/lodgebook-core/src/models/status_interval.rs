//! Time-bounded administrative status overrides.
//!
//! A status interval is the authoritative record of a member's
//! administrative state over a date range (a leave of absence, a suspension,
//! an expulsion). The coarse `status` label on the member record is only a
//! present-tense cache of whichever interval is in force today.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::normalize_label;

/// Kind of administrative override carried by a status interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalKind {
    OnLeave,
    Irregular,
    Suspended,
    Dismissed,
    Excluded,
    ExOfficio,
    Other,
}

impl IntervalKind {
    /// Parse a free-text interval kind, case and diacritic insensitive.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return IntervalKind::Other;
        };
        match normalize_label(label).as_str() {
            "on leave" | "on-leave" | "licensed" | "licenciado" => IntervalKind::OnLeave,
            "irregular" => IntervalKind::Irregular,
            "suspended" | "suspendido" => IntervalKind::Suspended,
            "dismissed" | "dado de baja" | "baja" => IntervalKind::Dismissed,
            "excluded" | "excluido" => IntervalKind::Excluded,
            "ex-officio" | "ex-oficio" | "ex officio" | "ex oficio" => IntervalKind::ExOfficio,
            _ => IntervalKind::Other,
        }
    }

    /// Whether this kind bars the member from session participation.
    /// On-leave does not: it is surfaced as a badge but the member still
    /// counts toward quorum.
    pub fn is_disqualifying(&self) -> bool {
        matches!(
            self,
            IntervalKind::Dismissed
                | IntervalKind::Irregular
                | IntervalKind::Suspended
                | IntervalKind::Excluded
                | IntervalKind::ExOfficio
        )
    }

    /// Restrictiveness order used to break ties between overlapping
    /// intervals (higher = more restrictive).
    pub fn severity(&self) -> u8 {
        match self {
            IntervalKind::Excluded => 6,
            IntervalKind::Dismissed => 5,
            IntervalKind::Suspended => 4,
            IntervalKind::Irregular => 3,
            IntervalKind::ExOfficio => 2,
            IntervalKind::OnLeave => 1,
            IntervalKind::Other => 0,
        }
    }

    /// Get the display label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            IntervalKind::OnLeave => "On Leave",
            IntervalKind::Irregular => "Irregular",
            IntervalKind::Suspended => "Suspended",
            IntervalKind::Dismissed => "Dismissed",
            IntervalKind::Excluded => "Excluded",
            IntervalKind::ExOfficio => "Ex-Officio",
            IntervalKind::Other => "Other",
        }
    }
}

/// Lifecycle state of the interval record itself. Only `Active` intervals
/// are consulted for eligibility; the rest are kept for history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalState {
    Active,
    Expired,
    Cancelled,
}

impl IntervalState {
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|s| normalize_label(s)).as_deref() {
            Some("expired") | Some("vencido") => IntervalState::Expired,
            Some("cancelled") | Some("canceled") | Some("cancelado") => IntervalState::Cancelled,
            // Active is the default: legacy rows predate the state column
            _ => IntervalState::Active,
        }
    }
}

/// A time-bounded status override for one member.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusInterval {
    pub id: i64,
    pub member_id: i64,
    pub kind: IntervalKind,
    pub start_date: NaiveDate,
    /// None means open-ended (indefinite).
    pub end_date: Option<NaiveDate>,
    pub state: IntervalState,
}

impl StatusInterval {
    /// Whether this interval covers the given date. Open-ended intervals
    /// cover everything from their start date onward.
    pub fn in_force(&self, on: NaiveDate) -> bool {
        on >= self.start_date && self.end_date.map_or(true, |end| on <= end)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(start: NaiveDate, end: Option<NaiveDate>) -> StatusInterval {
        StatusInterval {
            id: 1,
            member_id: 1,
            kind: IntervalKind::Suspended,
            start_date: start,
            end_date: end,
            state: IntervalState::Active,
        }
    }

    #[test]
    fn test_in_force_bounded() {
        let iv = interval(date(2023, 1, 1), Some(date(2023, 3, 31)));
        assert!(!iv.in_force(date(2022, 12, 31)));
        assert!(iv.in_force(date(2023, 1, 1)));
        assert!(iv.in_force(date(2023, 2, 15)));
        assert!(iv.in_force(date(2023, 3, 31)));
        assert!(!iv.in_force(date(2023, 4, 1)));
    }

    #[test]
    fn test_in_force_open_ended() {
        let iv = interval(date(2023, 1, 1), None);
        assert!(!iv.in_force(date(2022, 6, 1)));
        assert!(iv.in_force(date(2023, 1, 1)));
        assert!(iv.in_force(date(2050, 1, 1)));
    }

    #[test]
    fn test_kind_from_label() {
        assert_eq!(IntervalKind::from_label(Some("Suspendído")), IntervalKind::Suspended);
        assert_eq!(IntervalKind::from_label(Some("Licenciado")), IntervalKind::OnLeave);
        assert_eq!(IntervalKind::from_label(Some("ex-oficio")), IntervalKind::ExOfficio);
        assert_eq!(IntervalKind::from_label(Some("Ex-Officio")), IntervalKind::ExOfficio);
        assert_eq!(IntervalKind::from_label(Some("sabbatical")), IntervalKind::Other);
        assert_eq!(IntervalKind::from_label(None), IntervalKind::Other);
    }

    #[test]
    fn test_disqualifying_kinds() {
        assert!(IntervalKind::Dismissed.is_disqualifying());
        assert!(IntervalKind::Irregular.is_disqualifying());
        assert!(IntervalKind::Suspended.is_disqualifying());
        assert!(IntervalKind::Excluded.is_disqualifying());
        assert!(IntervalKind::ExOfficio.is_disqualifying());
        assert!(!IntervalKind::OnLeave.is_disqualifying());
        assert!(!IntervalKind::Other.is_disqualifying());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(IntervalKind::Excluded.severity() > IntervalKind::Dismissed.severity());
        assert!(IntervalKind::Dismissed.severity() > IntervalKind::Suspended.severity());
        assert!(IntervalKind::Suspended.severity() > IntervalKind::Irregular.severity());
        assert!(IntervalKind::Irregular.severity() > IntervalKind::ExOfficio.severity());
        assert!(IntervalKind::ExOfficio.severity() > IntervalKind::OnLeave.severity());
    }

    #[test]
    fn test_state_from_label_defaults_to_active() {
        assert_eq!(IntervalState::from_label(Some("active")), IntervalState::Active);
        assert_eq!(IntervalState::from_label(Some("Cancelado")), IntervalState::Cancelled);
        assert_eq!(IntervalState::from_label(Some("expired")), IntervalState::Expired);
        assert_eq!(IntervalState::from_label(None), IntervalState::Active);
    }
}
