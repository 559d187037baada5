//! Lodge sessions (tenidas) and their admission requirements.

use chrono::NaiveDate;

use crate::utils::normalize_label;

/// Default minimum degree when the session record does not specify one.
pub const DEFAULT_MINIMUM_DEGREE: u8 = 1;

/// A single lodge session. Rosters and statistics are computed on demand,
/// never stored on the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: i64,
    pub date: NaiveDate,
    /// Minimum degree rank required to attend, 1..=3.
    pub minimum_degree: u8,
    pub classification: Option<String>,
}

impl Session {
    /// Clamp a raw minimum-degree value into the valid 1..=3 range,
    /// defaulting to 1 when absent.
    pub fn clamp_minimum_degree(raw: Option<u8>) -> u8 {
        raw.unwrap_or(DEFAULT_MINIMUM_DEGREE).clamp(1, 3)
    }

    /// Administrative sessions are open to every member regardless of
    /// degree. The classification is free text, so this matches on the
    /// normalized label.
    pub fn is_administrative(&self) -> bool {
        self.classification
            .as_deref()
            .map(|c| normalize_label(c).contains("admin"))
            .unwrap_or(false)
    }
}
