//! Raw attendance records.

use serde::{Deserialize, Serialize};

/// One member's recorded attendance at one session. A member with no record
/// for a session is "no data", which is distinct from a recorded absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub member_id: i64,
    pub session_id: i64,
    pub present: bool,
    pub justification: Option<String>,
}

impl AttendanceRecord {
    /// An absence counts as justified only when a non-empty justification
    /// was recorded with it.
    pub fn is_justified_absence(&self) -> bool {
        !self.present
            && self
                .justification
                .as_deref()
                .map(|j| !j.trim().is_empty())
                .unwrap_or(false)
    }
}
