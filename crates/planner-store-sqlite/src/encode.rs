//! Raw row types and the conversions between them and domain values.
//!
//! Terms are stored as their upper-case names; status is stored as the three
//! legacy flag columns. Every `Raw*` struct mirrors one `SELECT` column list
//! and has a `from_row` constructor plus an `into_*` decoder.

use planner_core::{
  catalog::{Course, Major, Prerequisite},
  ledger::{CourseStatus, LedgerEntry, PlannedCourse},
  profile::Profile,
  semester::{Semester, Term},
};
use rusqlite::Row;

use crate::{Error, Result};

// ─── Term ────────────────────────────────────────────────────────────────────

pub fn encode_term(term: Term) -> &'static str { term.as_str() }

pub fn decode_term(s: &str) -> Result<Term> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown term: {s:?}")))
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(status: CourseStatus) -> (bool, bool, bool) { status.to_flags() }

/// Rows written before status became a single value may have no flag set;
/// those read back as planned.
pub fn decode_status(course_code: &str, current: bool, planned: bool, done: bool) -> CourseStatus {
  CourseStatus::from_flags(current, planned, done).unwrap_or_else(|| {
    tracing::warn!(course_code, "ledger row has no status flag set; treating as planned");
    CourseStatus::Planned
  })
}

fn decode_credits(course_code: &str, credits: i64) -> Result<u32> {
  u32::try_from(credits)
    .map_err(|_| Error::Decode(format!("course {course_code} has {credits} credits")))
}

// ─── Text search ─────────────────────────────────────────────────────────────

/// Escape `LIKE` metacharacters so `text` matches literally under
/// `ESCAPE '\'`.
pub fn escape_like(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(c, '\\' | '%' | '_') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

// ─── Course ──────────────────────────────────────────────────────────────────

pub struct RawCourse {
  pub code:           String,
  pub title:          String,
  pub description:    Option<String>,
  pub credits:        i64,
  pub classification: Option<String>,
  pub dep_code:       String,
  pub course_type:    Option<String>,
  pub level:          Option<String>,
}

impl RawCourse {
  pub const COLUMNS: &'static str = "course_code, course_title, course_description, \
     course_credits, course_classification, dep_code, course_type, course_level";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      code:           row.get(0)?,
      title:          row.get(1)?,
      description:    row.get(2)?,
      credits:        row.get(3)?,
      classification: row.get(4)?,
      dep_code:       row.get(5)?,
      course_type:    row.get(6)?,
      level:          row.get(7)?,
    })
  }

  pub fn into_course(self) -> Result<Course> {
    let credits = decode_credits(&self.code, self.credits)?;
    Ok(Course {
      code: self.code,
      title: self.title,
      description: self.description,
      credits,
      classification: self.classification.filter(|c| !c.is_empty()),
      dep_code: self.dep_code,
      course_type: self.course_type,
      level: self.level,
    })
  }
}

// ─── Prerequisite ────────────────────────────────────────────────────────────

pub fn prerequisite_from_row(row: &Row<'_>) -> rusqlite::Result<Prerequisite> {
  Ok(Prerequisite {
    course_code:    row.get(0)?,
    prereq_code:    row.get(1)?,
    is_corequisite: row.get(2)?,
  })
}

// ─── Semester ────────────────────────────────────────────────────────────────

pub struct RawSemester {
  pub sem_code: String,
  pub year:     i32,
  pub term:     String,
}

impl RawSemester {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { sem_code: row.get(0)?, year: row.get(1)?, term: row.get(2)? })
  }

  pub fn into_semester(self) -> Result<Semester> {
    Ok(Semester {
      term:     decode_term(&self.term)?,
      sem_code: self.sem_code,
      year:     self.year,
    })
  }
}

// ─── Major ───────────────────────────────────────────────────────────────────

pub struct RawMajor {
  pub major_id:            i64,
  pub major_code:          String,
  pub major_name:          String,
  pub department:          String,
  pub credit_requirements: i64,
}

impl RawMajor {
  pub const COLUMNS: &'static str =
    "major_id, major_code, major_name, department_id, credit_requirements";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      major_id:            row.get(0)?,
      major_code:          row.get(1)?,
      major_name:          row.get(2)?,
      department:          row.get(3)?,
      credit_requirements: row.get(4)?,
    })
  }

  pub fn into_major(self) -> Result<Major> {
    let credit_requirements = u32::try_from(self.credit_requirements).map_err(|_| {
      Error::Decode(format!(
        "major {} requires {} credits",
        self.major_name, self.credit_requirements
      ))
    })?;
    Ok(Major {
      major_id: self.major_id,
      major_code: self.major_code,
      major_name: self.major_name,
      department: self.department,
      credit_requirements,
    })
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

pub struct RawProfile {
  pub id:                i64,
  pub first_name:        String,
  pub last_name:         String,
  pub graduation_year:   i32,
  pub starting_year:     i32,
  pub starting_semester: String,
  pub major:             String,
  pub minor:             Option<String>,
}

impl RawProfile {
  pub const COLUMNS: &'static str =
    "id, fname, lname, graduation_year, starting_year, starting_semester, major, minor";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      first_name:        row.get(1)?,
      last_name:         row.get(2)?,
      graduation_year:   row.get(3)?,
      starting_year:     row.get(4)?,
      starting_semester: row.get(5)?,
      major:             row.get(6)?,
      minor:             row.get(7)?,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      starting_semester: decode_term(&self.starting_semester)?,
      id:                self.id,
      first_name:        self.first_name,
      last_name:         self.last_name,
      graduation_year:   self.graduation_year,
      starting_year:     self.starting_year,
      major:             self.major,
      minor:             self.minor.filter(|m| !m.is_empty()),
    })
  }
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

pub struct RawPlanned {
  pub course_id:   i64,
  pub course_code: String,
  pub sem_code:    String,
  pub is_current:  bool,
  pub is_planned:  bool,
  pub is_done:     bool,
  pub grade:       Option<String>,
  pub profile_id:  i64,
}

impl RawPlanned {
  /// Column list qualified with the `p` alias so it can be joined.
  pub const COLUMNS: &'static str = "p.course_id, p.course_code, p.sem_code, \
     p.is_current_course, p.is_planned_course, p.is_done_course, p.grade, p.profile_id";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      course_id:   row.get(0)?,
      course_code: row.get(1)?,
      sem_code:    row.get(2)?,
      is_current:  row.get(3)?,
      is_planned:  row.get(4)?,
      is_done:     row.get(5)?,
      grade:       row.get(6)?,
      profile_id:  row.get(7)?,
    })
  }

  pub fn into_planned(self) -> PlannedCourse {
    let status = decode_status(&self.course_code, self.is_current, self.is_planned, self.is_done);
    PlannedCourse {
      course_id: self.course_id,
      course_code: self.course_code,
      sem_code: self.sem_code,
      status,
      grade: self.grade.filter(|g| !g.is_empty()),
      profile_id: self.profile_id,
    }
  }
}

/// A [`RawPlanned`] row joined with course credits and semester columns.
pub struct RawLedgerEntry {
  pub planned:  RawPlanned,
  pub credits:  i64,
  pub sem_year: i32,
  pub sem_term: String,
}

impl RawLedgerEntry {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      planned:  RawPlanned::from_row(row)?,
      credits:  row.get(8)?,
      sem_year: row.get(9)?,
      sem_term: row.get(10)?,
    })
  }

  pub fn into_entry(self) -> Result<LedgerEntry> {
    let credits = decode_credits(&self.planned.course_code, self.credits)?;
    let sem_term = decode_term(&self.sem_term)?;
    Ok(LedgerEntry {
      planned: self.planned.into_planned(),
      credits,
      sem_year: self.sem_year,
      sem_term,
    })
  }
}
