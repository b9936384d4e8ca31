//! Error types for `planner-core`.

use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown course: {0}")]
  UnknownCourse(String),

  #[error("unknown semester: {0}")]
  UnknownSemester(String),

  #[error("unknown profile: {0}")]
  UnknownProfile(i64),

  #[error("course {0} is already planned")]
  AlreadyPlanned(String),

  /// Every non-corequisite prerequisite absent from the ledger is named.
  #[error("cannot plan {course}: missing prerequisites {missing:?}")]
  PrereqBlocked {
    course:  String,
    missing: BTreeSet<String>,
  },

  #[error("course {0} is not in the ledger")]
  NotFound(String),

  #[error("GPA {0} is outside [0.0, 4.0]")]
  OutOfRange(f64),

  #[error("GPA is undefined: no completed credits")]
  Undefined,

  #[error("invalid profile: {0}")]
  InvalidProfile(String),

  #[error("unknown term: {0:?}")]
  UnknownTerm(String),

  #[error("malformed semester code: {0:?}")]
  MalformedSemesterCode(String),

  #[error("store unavailable: {0}")]
  StoreUnavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
