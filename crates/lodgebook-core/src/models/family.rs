//! Family members declared on a member record (spouse, parents, children).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    Spouse,
    Parent,
    Child,
}

impl Relation {
    /// Get the display label for this relation.
    pub fn label(&self) -> &'static str {
        match self {
            Relation::Spouse => "spouse",
            Relation::Parent => "parent",
            Relation::Child => "child",
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A person related to a member. The `deceased` flag is only recorded for
/// parents and children; spouses always participate in anniversary scans.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyMember {
    pub relation: Relation,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub deceased: bool,
}
