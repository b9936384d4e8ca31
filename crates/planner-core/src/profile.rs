//! Student profile: created once at onboarding, read thereafter.

use std::ops::RangeInclusive;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, semester::Term};

/// How many years past the current one onboarding offers as graduation years,
/// and the longest start-to-graduation span a profile may have.
pub const GRADUATION_WINDOW_YEARS: i32 = 10;

/// Calendar years a profile may start or graduate in.
pub const PROFILE_YEARS: RangeInclusive<i32> = 1900..=2200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub id:                i64,
  pub first_name:        String,
  pub last_name:         String,
  pub graduation_year:   i32,
  pub starting_year:     i32,
  pub starting_semester: Term,
  /// Major name as it appears in the catalog's `major` table.
  pub major:             String,
  pub minor:             Option<String>,
}

/// Input to [`crate::store::PlannerStore::create_profile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
  pub first_name:        String,
  pub last_name:         String,
  pub graduation_year:   i32,
  pub starting_year:     i32,
  pub starting_semester: Term,
  pub major:             String,
  #[serde(default)]
  pub minor:             Option<String>,
}

impl NewProfile {
  /// Field-level checks that do not need the catalog. The store verifies
  /// that `major` exists.
  pub fn validate(&self) -> Result<()> {
    if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
      return Err(Error::InvalidProfile("first and last name are required".into()));
    }
    if self.starting_semester.is_summer() {
      return Err(Error::InvalidProfile(
        "starting semester must be FALL or SPRING".into(),
      ));
    }
    for year in [self.starting_year, self.graduation_year] {
      if !PROFILE_YEARS.contains(&year) {
        return Err(Error::InvalidProfile(format!(
          "year {year} is outside {}..={}",
          PROFILE_YEARS.start(),
          PROFILE_YEARS.end()
        )));
      }
    }
    if self.graduation_year < self.starting_year {
      return Err(Error::InvalidProfile(format!(
        "graduation year {} precedes starting year {}",
        self.graduation_year, self.starting_year
      )));
    }
    if self.graduation_year - self.starting_year > GRADUATION_WINDOW_YEARS {
      return Err(Error::InvalidProfile(format!(
        "graduation year {} is more than {GRADUATION_WINDOW_YEARS} years after {}",
        self.graduation_year, self.starting_year
      )));
    }
    Ok(())
  }
}

/// Graduation years offered at onboarding for a given current year.
pub fn graduation_year_options(current_year: i32) -> RangeInclusive<i32> {
  current_year..=current_year + GRADUATION_WINDOW_YEARS
}

/// [`graduation_year_options`] for today's local date.
pub fn graduation_year_options_now() -> RangeInclusive<i32> {
  graduation_year_options(chrono::Local::now().year())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn profile() -> NewProfile {
    NewProfile {
      first_name:        "Salma".into(),
      last_name:         "Idrissi".into(),
      graduation_year:   2027,
      starting_year:     2023,
      starting_semester: Term::Fall,
      major:             "Computer Science".into(),
      minor:             None,
    }
  }

  #[test]
  fn valid_profile_passes() { profile().validate().unwrap(); }

  #[test]
  fn blank_names_rejected() {
    let mut p = profile();
    p.last_name = "  ".into();
    assert!(matches!(p.validate(), Err(Error::InvalidProfile(_))));
  }

  #[test]
  fn summer_start_rejected() {
    let mut p = profile();
    p.starting_semester = Term::Summer;
    assert!(matches!(p.validate(), Err(Error::InvalidProfile(_))));
  }

  #[test]
  fn graduation_before_start_rejected() {
    let mut p = profile();
    p.graduation_year = 2022;
    assert!(matches!(p.validate(), Err(Error::InvalidProfile(_))));
  }

  #[test]
  fn span_beyond_the_window_rejected() {
    let mut p = profile();
    p.graduation_year = p.starting_year + GRADUATION_WINDOW_YEARS;
    p.validate().unwrap();
    p.graduation_year += 1;
    assert!(matches!(p.validate(), Err(Error::InvalidProfile(_))));
  }

  #[test]
  fn years_outside_the_calendar_rejected() {
    let mut p = profile();
    p.starting_year = i32::MAX;
    p.graduation_year = i32::MAX;
    assert!(matches!(p.validate(), Err(Error::InvalidProfile(_))));

    let mut p = profile();
    p.starting_year = 0;
    p.graduation_year = 5;
    assert!(matches!(p.validate(), Err(Error::InvalidProfile(_))));
  }

  #[test]
  fn graduation_window_is_eleven_years() {
    let years = graduation_year_options(2025);
    assert_eq!(years.clone().count(), 11);
    assert_eq!(*years.start(), 2025);
    assert_eq!(*years.end(), 2035);
  }
}
