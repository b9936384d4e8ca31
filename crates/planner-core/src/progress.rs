//! Progress calculator: credits, GPA, standing and semesters remaining.
//!
//! Every function here is a pure derivation over [`LedgerEntry`] rows; nothing
//! is cached. Callers re-derive after each ledger mutation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  ledger::LedgerEntry,
  semester::{Semester, Term},
};

// ─── Grades ──────────────────────────────────────────────────────────────────

/// Grade points for a letter grade. Unrecognised letters are worth `0.0`.
pub fn grade_points(letter: &str) -> f64 {
  match letter.trim() {
    "A+" => 4.3,
    "A" => 4.0,
    "A-" => 3.7,
    "B+" => 3.3,
    "B" => 3.0,
    "B-" => 2.7,
    "C+" => 2.3,
    "C" => 2.0,
    "C-" => 1.7,
    "D+" => 1.3,
    "D" => 1.0,
    "D-" => 0.7,
    "F" => 0.0,
    _ => 0.0,
  }
}

// ─── Credits and GPA ─────────────────────────────────────────────────────────

/// Sum of credits over completed rows.
pub fn credits_earned(entries: &[LedgerEntry]) -> u32 {
  entries
    .iter()
    .filter(|e| e.planned.status.is_done())
    .map(|e| e.credits)
    .sum()
}

/// Credit-weighted GPA over completed rows.
///
/// Fails with [`Error::Undefined`] when no credits are completed. A completed
/// row with a missing or unrecognised grade still counts its credits.
pub fn gpa(entries: &[LedgerEntry]) -> Result<f64> {
  let earned = credits_earned(entries);
  if earned == 0 {
    return Err(Error::Undefined);
  }

  let weighted: f64 = entries
    .iter()
    .filter(|e| e.planned.status.is_done())
    .map(|e| {
      let points = e.planned.grade.as_deref().map_or(0.0, grade_points);
      points * f64::from(e.credits)
    })
    .sum();

  Ok(weighted / f64::from(earned))
}

/// Integer percentage of the requirement met, truncated toward zero.
///
/// `None` when the requirement is zero.
pub fn credits_percent(earned: u32, required: u32) -> Option<u32> {
  if required == 0 {
    return None;
  }
  Some((u64::from(earned) * 100 / u64::from(required)) as u32)
}

// ─── Standing ────────────────────────────────────────────────────────────────

/// A discrete academic-performance tier derived from GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
  Probation,
  Satisfactory,
  Good,
  Excellent,
  HighestHonors,
  /// Not enough information to place the student, e.g. no completed credits.
  Invalid,
}

impl Standing {
  pub fn label(self) -> &'static str {
    match self {
      Self::Probation => "Probation",
      Self::Satisfactory => "Satisfactory",
      Self::Good => "Good",
      Self::Excellent => "Excellent",
      Self::HighestHonors => "Highest Honors",
      Self::Invalid => "More info needed to find GPA",
    }
  }
}

/// Map a GPA to a standing. GPAs outside `[0.0, 4.0]` fail with
/// [`Error::OutOfRange`].
pub fn standing(gpa: f64) -> Result<Standing> {
  if !(0.0..=4.0).contains(&gpa) {
    return Err(Error::OutOfRange(gpa));
  }

  Ok(if gpa < 2.0 {
    Standing::Probation
  } else if gpa < 3.5 {
    Standing::Satisfactory
  } else if gpa < 3.8 {
    Standing::Good
  } else if gpa < 4.0 {
    Standing::Excellent
  } else {
    Standing::HighestHonors
  })
}

// ─── Semesters remaining ─────────────────────────────────────────────────────

/// Count the non-summer semesters in `catalog` that fall inside the window
/// from (`start_year`, `start_term`) to (`end_year`, `end_term`).
///
/// The start year contributes its FALL for a FALL start, and both its SPRING
/// and FALL for a SPRING start. The end year contributes its SPRING for a
/// SPRING finish, and both terms for a FALL finish. Every year strictly
/// between contributes both terms. Only semesters present in the catalog are
/// counted.
pub fn expected_non_summer_semesters(
  catalog: &[Semester],
  start_year: i32,
  start_term: Term,
  end_year: i32,
  end_term: Term,
) -> u32 {
  let in_start_year = |term: Term| match start_term {
    Term::Fall => term == Term::Fall,
    Term::Spring => matches!(term, Term::Spring | Term::Fall),
    Term::Summer => false,
  };
  let in_end_year = |term: Term| match end_term {
    Term::Fall => matches!(term, Term::Spring | Term::Fall),
    Term::Spring => term == Term::Spring,
    Term::Summer => false,
  };

  let count = catalog
    .iter()
    .filter(|s| !s.term.is_summer())
    .filter(|s| {
      (s.year > start_year && s.year < end_year)
        || (s.year == start_year && in_start_year(s.term))
        || (s.year == end_year && in_end_year(s.term))
    })
    .count();

  count as u32
}

/// Distinct non-summer semesters in which at least one course is done.
pub fn completed_non_summer_semesters(entries: &[LedgerEntry]) -> u32 {
  let done: BTreeSet<&str> = entries
    .iter()
    .filter(|e| !e.sem_term.is_summer() && e.planned.status.is_done())
    .map(|e| e.planned.sem_code.as_str())
    .collect();
  done.len() as u32
}

/// Expected semesters through a SPRING graduation minus completed ones.
///
/// Negative when the student has completed more regular semesters than the
/// window holds.
pub fn semesters_remaining(
  catalog: &[Semester],
  start_year: i32,
  start_term: Term,
  graduation_year: i32,
  entries: &[LedgerEntry],
) -> i64 {
  let expected =
    expected_non_summer_semesters(catalog, start_year, start_term, graduation_year, Term::Spring);
  i64::from(expected) - i64::from(completed_non_summer_semesters(entries))
}

// ─── Per-semester load ───────────────────────────────────────────────────────

/// Credits and course count scheduled in one semester, regardless of status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterLoad {
  pub credits: u32,
  pub courses: u32,
}

pub fn semester_load(entries: &[LedgerEntry], sem_code: &str) -> SemesterLoad {
  entries
    .iter()
    .filter(|e| e.planned.sem_code == sem_code)
    .fold(SemesterLoad::default(), |acc, e| SemesterLoad {
      credits: acc.credits + e.credits,
      courses: acc.courses + 1,
    })
}
