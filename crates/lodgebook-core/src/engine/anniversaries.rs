//! Birthday and anniversary consolidation.
//!
//! Scans every member plus their declared family for birthdays falling on a
//! reference date or within the following week. The same physical person can
//! reach the scan through more than one record (a spouse declared on two
//! member records, a child who is also a member); those are merged so nobody
//! is greeted twice.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Member, Relation};
use crate::utils::normalize_name;

/// How a person reached the scan: their relation label and the member record
/// that declared them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct RelationRef {
    pub label: String,
    pub through: String,
}

/// A person with an anniversary on or near the reference date.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct AnniversaryPerson {
    pub name: String,
    pub birth_date: NaiveDate,
    /// Age turning on the observed anniversary (for upcoming entries this is
    /// computed against the anniversary year, which may be next year).
    pub age: i32,
    /// Days until the anniversary; 0 for the today bucket.
    pub days_remaining: i64,
    pub relations: Vec<RelationRef>,
}

impl AnniversaryPerson {
    /// Joined display label, one entry per distinct relation
    /// ("spouse" rather than "spouse, spouse" for a shared spouse).
    pub fn relation_label(&self) -> String {
        let mut labels: Vec<&str> = Vec::new();
        for relation in &self.relations {
            if !labels.contains(&relation.label.as_str()) {
                labels.push(relation.label.as_str());
            }
        }
        labels.join(", ")
    }
}

/// Result of an anniversary scan.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct AnniversaryScan {
    pub today: Vec<AnniversaryPerson>,
    /// Anniversaries in the next seven days, ascending by `days_remaining`.
    pub upcoming: Vec<AnniversaryPerson>,
}

struct Candidate {
    name: String,
    birth_date: Option<NaiveDate>,
    label: &'static str,
    through: String,
}

struct Entry {
    name: String,
    birth_date: NaiveDate,
    relations: Vec<RelationRef>,
}

/// The anniversary of `birth` on or after the given date, rolling into next
/// year once this year's date has passed. Feb 29 birthdays are observed on
/// Mar 1 in non-leap years.
fn next_observance(birth: NaiveDate, on_or_after: NaiveDate) -> Option<NaiveDate> {
    let in_year = |year: i32| {
        NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
    };
    match in_year(on_or_after.year()) {
        Some(observed) if observed >= on_or_after => Some(observed),
        _ => in_year(on_or_after.year() + 1),
    }
}

/// Scan members and their families for birthdays on the reference date and
/// in the following seven days.
///
/// Spouses are always scanned; parents and children only while living.
/// Persons without a recorded birth date are skipped. Duplicates are merged
/// on (normalized name, birth date) and accumulate every relation they were
/// reached through.
pub fn find_anniversaries(members: &[Member], reference_date: NaiveDate) -> AnniversaryScan {
    let mut candidates = Vec::new();
    for member in members {
        let through = member.full_name();
        candidates.push(Candidate {
            name: member.full_name(),
            birth_date: member.birth_date,
            label: "member",
            through: through.clone(),
        });
        for family in &member.family {
            let include = match family.relation {
                Relation::Spouse => true,
                Relation::Parent | Relation::Child => !family.deceased,
            };
            if include {
                candidates.push(Candidate {
                    name: family.name.clone(),
                    birth_date: family.birth_date,
                    label: family.relation.label(),
                    through: through.clone(),
                });
            }
        }
    }

    // Merge candidates that are the same physical person
    let mut entries: Vec<Entry> = Vec::new();
    let mut by_key: HashMap<(String, NaiveDate), usize> = HashMap::new();
    for candidate in candidates {
        let Some(birth_date) = candidate.birth_date else {
            continue;
        };
        let relation = RelationRef {
            label: candidate.label.to_string(),
            through: candidate.through,
        };
        let key = (normalize_name(&candidate.name), birth_date);
        match by_key.get(&key) {
            Some(&i) => {
                if !entries[i].relations.contains(&relation) {
                    entries[i].relations.push(relation);
                }
            }
            None => {
                by_key.insert(key, entries.len());
                entries.push(Entry {
                    name: candidate.name,
                    birth_date,
                    relations: vec![relation],
                });
            }
        }
    }

    let mut scan = AnniversaryScan::default();
    for entry in entries {
        let Some(observed) = next_observance(entry.birth_date, reference_date) else {
            continue;
        };
        let days_remaining = (observed - reference_date).num_days();
        if days_remaining > 7 {
            continue;
        }
        let person = AnniversaryPerson {
            name: entry.name,
            birth_date: entry.birth_date,
            age: observed.year() - entry.birth_date.year(),
            days_remaining,
            relations: entry.relations,
        };
        if days_remaining == 0 {
            scan.today.push(person);
        } else {
            scan.upcoming.push(person);
        }
    }
    scan.upcoming.sort_by_key(|p| p.days_remaining);
    scan
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FamilyMember, MemberStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(id: i64, first: &str, last: &str, birth: Option<NaiveDate>) -> Member {
        Member {
            id,
            first_name: first.into(),
            last_name: last.into(),
            status: MemberStatus::Regular,
            join_date: Some(date(2010, 1, 1)),
            initiation_date: Some(date(2010, 1, 1)),
            raising_date: None,
            exaltation_date: None,
            installation_date: None,
            installed_master: false,
            birth_date: birth,
            death_date: None,
            family: Vec::new(),
        }
    }

    fn family(relation: Relation, name: &str, birth: Option<NaiveDate>, deceased: bool) -> FamilyMember {
        FamilyMember {
            relation,
            name: name.into(),
            birth_date: birth,
            deceased,
        }
    }

    #[test]
    fn test_member_birthday_today() {
        // Born 1990-03-10, reference 2024-03-10: in today's bucket, age 34
        let m = member(1, "John", "Smith", Some(date(1990, 3, 10)));
        let scan = find_anniversaries(&[m], date(2024, 3, 10));
        assert_eq!(scan.today.len(), 1);
        assert_eq!(scan.today[0].age, 34);
        assert_eq!(scan.today[0].days_remaining, 0);
        assert!(scan.upcoming.is_empty());
    }

    #[test]
    fn test_upcoming_window_is_seven_days() {
        let members = vec![
            member(1, "A", "A", Some(date(1990, 3, 11))), // 1 day out
            member(2, "B", "B", Some(date(1990, 3, 17))), // 7 days out
            member(3, "C", "C", Some(date(1990, 3, 18))), // 8 days out
        ];
        let scan = find_anniversaries(&members, date(2024, 3, 10));
        assert!(scan.today.is_empty());
        let names: Vec<&str> = scan.upcoming.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A A", "B B"]);
    }

    #[test]
    fn test_upcoming_sorted_ascending() {
        let members = vec![
            member(1, "Late", "L", Some(date(1990, 3, 16))),
            member(2, "Soon", "S", Some(date(1990, 3, 11))),
            member(3, "Mid", "M", Some(date(1990, 3, 13))),
        ];
        let scan = find_anniversaries(&members, date(2024, 3, 10));
        let days: Vec<i64> = scan.upcoming.iter().map(|p| p.days_remaining).collect();
        assert_eq!(days, vec![1, 3, 6]);
    }

    #[test]
    fn test_year_rollover() {
        // Reference Dec 28: a Jan 2 birthday is 5 days out, in next year
        let m = member(1, "John", "Smith", Some(date(1980, 1, 2)));
        let scan = find_anniversaries(&[m], date(2023, 12, 28));
        assert_eq!(scan.upcoming.len(), 1);
        assert_eq!(scan.upcoming[0].days_remaining, 5);
        // Age computed against the anniversary year, not the reference year
        assert_eq!(scan.upcoming[0].age, 44);
    }

    #[test]
    fn test_spouse_always_included_deceased_children_excluded() {
        let mut m = member(1, "John", "Smith", None);
        m.family = vec![
            family(Relation::Spouse, "Mary Smith", Some(date(1992, 3, 10)), true),
            family(Relation::Child, "Timmy Smith", Some(date(2015, 3, 10)), true),
            family(Relation::Parent, "Ann Smith", Some(date(1960, 3, 10)), false),
        ];
        let scan = find_anniversaries(&[m], date(2024, 3, 10));
        let names: Vec<&str> = scan.today.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Mary Smith"));
        assert!(names.contains(&"Ann Smith"));
        assert!(!names.contains(&"Timmy Smith"));
    }

    #[test]
    fn test_missing_birth_date_skipped() {
        let mut m = member(1, "John", "Smith", None);
        m.family = vec![family(Relation::Spouse, "Mary Smith", None, false)];
        let scan = find_anniversaries(&[m], date(2024, 3, 10));
        assert!(scan.today.is_empty());
        assert!(scan.upcoming.is_empty());
    }

    #[test]
    fn test_shared_spouse_consolidated() {
        // The same spouse declared on two member records merges into one
        // entry that remembers both paths
        let mut a = member(1, "John", "Smith", None);
        a.family = vec![family(Relation::Spouse, "Mary Smith", Some(date(1992, 3, 10)), false)];
        let mut b = member(2, "Robert", "Brown", None);
        b.family = vec![family(Relation::Spouse, "mary  smith", Some(date(1992, 3, 10)), false)];

        let scan = find_anniversaries(&[a, b], date(2024, 3, 10));
        assert_eq!(scan.today.len(), 1);
        let person = &scan.today[0];
        assert_eq!(person.relations.len(), 2);
        assert_eq!(person.relation_label(), "spouse");
        let through: Vec<&str> = person.relations.iter().map(|r| r.through.as_str()).collect();
        assert_eq!(through, vec!["John Smith", "Robert Brown"]);
    }

    #[test]
    fn test_dedup_is_accent_insensitive() {
        let mut a = member(1, "John", "Smith", None);
        a.family = vec![family(Relation::Spouse, "José Silva", Some(date(1990, 3, 12)), false)];
        let mut b = member(2, "Robert", "Brown", None);
        b.family = vec![family(Relation::Child, "Jose Silva", Some(date(1990, 3, 12)), false)];

        let scan = find_anniversaries(&[a, b], date(2024, 3, 10));
        assert_eq!(scan.upcoming.len(), 1);
        assert_eq!(scan.upcoming[0].relation_label(), "spouse, child");
    }

    #[test]
    fn test_same_name_different_birth_not_merged() {
        let members = vec![
            member(1, "John", "Smith", Some(date(1990, 3, 10))),
            member(2, "John", "Smith", Some(date(1991, 3, 10))),
        ];
        let scan = find_anniversaries(&members, date(2024, 3, 10));
        assert_eq!(scan.today.len(), 2);
    }

    #[test]
    fn test_member_and_child_record_merge() {
        // A member who is also declared as another member's child
        let a = member(1, "Paul", "Smith", Some(date(2000, 3, 10)));
        let mut b = member(2, "John", "Smith", None);
        b.family = vec![family(Relation::Child, "Paul Smith", Some(date(2000, 3, 10)), false)];

        let scan = find_anniversaries(&[a, b], date(2024, 3, 10));
        assert_eq!(scan.today.len(), 1);
        assert_eq!(scan.today[0].relation_label(), "member, child");
    }

    #[test]
    fn test_feb_29_observed_mar_1_in_common_years() {
        let m = member(1, "Leap", "Day", Some(date(1992, 2, 29)));
        // 2025 is not a leap year: observed Mar 1
        let scan = find_anniversaries(&[m.clone()], date(2025, 2, 26));
        assert_eq!(scan.upcoming.len(), 1);
        assert_eq!(scan.upcoming[0].days_remaining, 3);
        // 2024 is a leap year: observed on the real date
        let scan = find_anniversaries(&[m], date(2024, 2, 29));
        assert_eq!(scan.today.len(), 1);
        assert_eq!(scan.today[0].age, 32);
    }
}
