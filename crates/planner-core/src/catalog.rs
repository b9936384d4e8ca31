//! Catalog records: the pre-seeded, read-only side of the planner.
//!
//! The core never mutates these. They are inserted once by whoever owns the
//! seed data and then only looked up.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
  pub school_code: String,
  pub school_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
  pub dep_code:    String,
  pub dep_title:   String,
  pub school_code: String,
}

/// A course offered by the institution, identified by its `code`
/// (e.g. `"CSC1401"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub code:           String,
  pub title:          String,
  pub description:    Option<String>,
  pub credits:        u32,
  /// Freshman, Sophomore, Junior, Senior; empty or absent for electives.
  pub classification: Option<String>,
  pub dep_code:       String,
  pub course_type:    Option<String>,
  pub level:          Option<String>,
}

/// A directed prerequisite edge: `course_code` requires `prereq_code`.
///
/// Multiple edges for one course are conjunctive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
  pub course_code:    String,
  pub prereq_code:    String,
  /// A corequisite never blocks planning.
  pub is_corequisite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
  pub major_id:            i64,
  pub major_code:          String,
  pub major_name:          String,
  pub department:          String,
  pub credit_requirements: u32,
}

/// Parameters for [`PlannerStore::list_courses`](crate::store::PlannerStore::list_courses).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseFilter {
  /// Case-insensitive substring match on code or title.
  pub text:           Option<String>,
  pub dep_code:       Option<String>,
  pub classification: Option<String>,
  /// Exclude courses already in this profile's ledger.
  pub unplanned_for:  Option<i64>,
}
