//! Terms and semesters.
//!
//! A semester is identified by its `sem_code`: the upper-case term name
//! followed by the four-digit year, e.g. `"SUMMER2025"`.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Term ────────────────────────────────────────────────────────────────────

/// One of the three terms of an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Term {
  Fall,
  Spring,
  Summer,
}

impl Term {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Fall => "FALL",
      Self::Spring => "SPRING",
      Self::Summer => "SUMMER",
    }
  }

  /// Position within a calendar year: SPRING, then SUMMER, then FALL.
  pub fn rank(self) -> u8 {
    match self {
      Self::Spring => 0,
      Self::Summer => 1,
      Self::Fall => 2,
    }
  }

  pub fn is_summer(self) -> bool { matches!(self, Self::Summer) }
}

impl fmt::Display for Term {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Term {
  type Err = Error;

  /// Case-insensitive; onboarding used to store `"Fall"` and `"Spring"`.
  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_uppercase().as_str() {
      "FALL" => Ok(Self::Fall),
      "SPRING" => Ok(Self::Spring),
      "SUMMER" => Ok(Self::Summer),
      _ => Err(Error::UnknownTerm(s.to_owned())),
    }
  }
}

// ─── Semester ────────────────────────────────────────────────────────────────

/// A concrete term in a concrete year.
///
/// Ordering is chronological: `year`, then [`Term::rank`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Semester {
  pub sem_code: String,
  pub year:     i32,
  pub term:     Term,
}

impl Semester {
  pub fn new(term: Term, year: i32) -> Self {
    Self { sem_code: sem_code(term, year), year, term }
  }

  /// Parse a code such as `"FALL2024"`.
  pub fn parse(code: &str) -> Result<Self> {
    let malformed = || Error::MalformedSemesterCode(code.to_owned());
    let split = code
      .find(|c: char| c.is_ascii_digit())
      .ok_or_else(malformed)?;
    let (term, year) = code.split_at(split);
    let term: Term = term.parse().map_err(|_| malformed())?;
    let year: i32 = year.parse().map_err(|_| malformed())?;
    Ok(Self::new(term, year))
  }

  /// Human-readable label, e.g. `"SPRING 2025"`.
  pub fn label(&self) -> String { format!("{} {}", self.term, self.year) }
}

impl Ord for Semester {
  fn cmp(&self, other: &Self) -> Ordering {
    (self.year, self.term.rank()).cmp(&(other.year, other.term.rank()))
  }
}

impl PartialOrd for Semester {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for Semester {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.sem_code)
  }
}

/// Build the `sem_code` for a term and year.
pub fn sem_code(term: Term, year: i32) -> String { format!("{term}{year}") }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn term_parse_is_case_insensitive() {
    assert_eq!("Fall".parse::<Term>().unwrap(), Term::Fall);
    assert_eq!("spring".parse::<Term>().unwrap(), Term::Spring);
    assert_eq!(" SUMMER ".parse::<Term>().unwrap(), Term::Summer);
    assert!(matches!("winter".parse::<Term>(), Err(Error::UnknownTerm(_))));
  }

  #[test]
  fn parse_semester_code() {
    let s = Semester::parse("SUMMER2025").unwrap();
    assert_eq!(s.term, Term::Summer);
    assert_eq!(s.year, 2025);
    assert_eq!(s.sem_code, "SUMMER2025");
    assert_eq!(s.label(), "SUMMER 2025");
  }

  #[test]
  fn parse_rejects_malformed_codes() {
    for bad in ["", "FALL", "2024", "AUTUMN2024", "FALL20x4"] {
      assert!(
        matches!(Semester::parse(bad), Err(Error::MalformedSemesterCode(_))),
        "{bad:?} should be rejected"
      );
    }
  }

  #[test]
  fn chronological_order_within_a_year() {
    let mut sems = vec![
      Semester::new(Term::Fall, 2025),
      Semester::new(Term::Summer, 2025),
      Semester::new(Term::Fall, 2024),
      Semester::new(Term::Spring, 2025),
    ];
    sems.sort();
    let codes: Vec<_> = sems.iter().map(|s| s.sem_code.as_str()).collect();
    assert_eq!(codes, ["FALL2024", "SPRING2025", "SUMMER2025", "FALL2025"]);
  }
}
