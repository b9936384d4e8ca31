//! The enrollment ledger: a student's per-course planning decisions.
//!
//! Each course appears at most once per profile. Status is a single variant
//! rather than three independent flags; see [`CourseStatus`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::semester::Term;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a course stands for the student.
///
/// Persisted as three boolean columns for compatibility with the relational
/// contract; exactly one is written as true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
  Current,
  Planned,
  Done,
}

impl CourseStatus {
  pub fn is_done(self) -> bool { matches!(self, Self::Done) }

  /// `(is_current, is_planned, is_done)` column values.
  pub fn to_flags(self) -> (bool, bool, bool) {
    (
      matches!(self, Self::Current),
      matches!(self, Self::Planned),
      matches!(self, Self::Done),
    )
  }

  /// Collapse legacy flag columns with priority done > current > planned.
  ///
  /// Returns `None` when no flag is set.
  pub fn from_flags(is_current: bool, is_planned: bool, is_done: bool) -> Option<Self> {
    if is_done {
      Some(Self::Done)
    } else if is_current {
      Some(Self::Current)
    } else if is_planned {
      Some(Self::Planned)
    } else {
      None
    }
  }

  /// Display label shown next to a course.
  pub fn label(self) -> &'static str {
    match self {
      Self::Current => "Current",
      Self::Planned => "Planned",
      Self::Done => "Completed",
    }
  }
}

impl fmt::Display for CourseStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCourse {
  pub course_id:   i64,
  pub course_code: String,
  pub sem_code:    String,
  pub status:      CourseStatus,
  /// Letter grade; only meaningful when `status` is `Done`.
  pub grade:       Option<String>,
  pub profile_id:  i64,
}

/// Input to [`crate::store::PlannerStore::add_course`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlannedCourse {
  pub profile_id:  i64,
  pub course_code: String,
  pub sem_code:    String,
  pub status:      CourseStatus,
  #[serde(default)]
  pub grade:       Option<String>,
}

/// Replacement values for [`crate::store::PlannerStore::update_course`].
///
/// All three fields are written; prerequisites are not re-checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseUpdate {
  pub sem_code: String,
  pub status:   CourseStatus,
  #[serde(default)]
  pub grade:    Option<String>,
}

/// A ledger row joined with the catalog facts the progress calculator needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
  pub planned:  PlannedCourse,
  pub credits:  u32,
  pub sem_year: i32,
  pub sem_term: Term,
}
