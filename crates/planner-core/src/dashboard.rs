//! The dashboard: the computed progress view for one profile.
//!
//! Never stored; always re-derived from the current ledger.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  catalog::Major,
  ledger::LedgerEntry,
  profile::Profile,
  progress::{self, Standing},
  semester::{Semester, Term},
  sequencer::{self, YearFrame},
  store::PlannerStore,
};

/// One sequenced semester with the load scheduled in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
  pub semester: Semester,
  pub label:    String,
  pub credits:  u32,
  pub courses:  u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub profile_id:          i64,
  /// `None` when no credits are completed.
  pub gpa:                 Option<f64>,
  pub standing:            Standing,
  pub credits_earned:      u32,
  /// `None` when the profile's major is not in the catalog.
  pub credits_required:    Option<u32>,
  pub credits_percent:     Option<u32>,
  pub semesters_remaining: i64,
  pub expected_graduation: Semester,
  pub frames:              Vec<YearFrame>,
  pub slots:               Vec<SlotSummary>,
}

/// Assemble a dashboard from already-fetched data.
pub fn build(
  profile: &Profile,
  entries: &[LedgerEntry],
  catalog_semesters: &[Semester],
  major: Option<&Major>,
) -> Dashboard {
  let gpa = progress::gpa(entries).ok();

  let standing = match gpa.map(progress::standing) {
    Some(Ok(s)) => s,
    Some(Err(e)) => {
      tracing::warn!(profile_id = profile.id, error = %e, "GPA has no standing");
      Standing::Invalid
    }
    None => Standing::Invalid,
  };

  let credits_earned = progress::credits_earned(entries);
  let credits_required = major.map(|m| m.credit_requirements);
  let credits_percent =
    credits_required.and_then(|req| progress::credits_percent(credits_earned, req));

  let semesters_remaining = progress::semesters_remaining(
    catalog_semesters,
    profile.starting_year,
    profile.starting_semester,
    profile.graduation_year,
    entries,
  );

  let ledger_semesters: BTreeSet<Semester> = entries
    .iter()
    .map(|e| Semester::new(e.sem_term, e.sem_year))
    .collect();
  let seq = sequencer::sequence(profile, &ledger_semesters);

  let slots = seq
    .slots
    .into_iter()
    .map(|semester| {
      let load = progress::semester_load(entries, &semester.sem_code);
      SlotSummary {
        label: semester.label(),
        semester,
        credits: load.credits,
        courses: load.courses,
      }
    })
    .collect();

  Dashboard {
    profile_id: profile.id,
    gpa,
    standing,
    credits_earned,
    credits_required,
    credits_percent,
    semesters_remaining,
    expected_graduation: Semester::new(Term::Spring, profile.graduation_year),
    frames: seq.frames,
    slots,
  }
}

/// Fetch everything the dashboard needs from `store` and assemble it.
pub async fn load<S: PlannerStore>(store: &S, profile_id: i64) -> Result<Dashboard> {
  let profile = store
    .get_profile(profile_id)
    .await
    .map_err(Into::<Error>::into)?
    .ok_or(Error::UnknownProfile(profile_id))?;

  let entries = store.ledger(profile_id).await.map_err(Into::<Error>::into)?;
  let semesters = store.list_semesters().await.map_err(Into::<Error>::into)?;
  let major = store
    .get_major_by_name(&profile.major)
    .await
    .map_err(Into::<Error>::into)?;

  Ok(build(&profile, &entries, &semesters, major.as_ref()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ledger::{CourseStatus, PlannedCourse};

  fn profile() -> Profile {
    Profile {
      id:                7,
      first_name:        "Hind".into(),
      last_name:         "Bennani".into(),
      graduation_year:   2027,
      starting_year:     2023,
      starting_semester: Term::Fall,
      major:             "Computer Science".into(),
      minor:             None,
    }
  }

  fn major() -> Major {
    Major {
      major_id:            1,
      major_code:          "CS".into(),
      major_name:          "Computer Science".into(),
      department:          "CSC".into(),
      credit_requirements: 134,
    }
  }

  fn entry(code: &str, sem: &str, credits: u32, status: CourseStatus, grade: Option<&str>) -> LedgerEntry {
    let semester = Semester::parse(sem).unwrap();
    LedgerEntry {
      planned:  PlannedCourse {
        course_id:   0,
        course_code: code.into(),
        sem_code:    sem.into(),
        status,
        grade:       grade.map(str::to_owned),
        profile_id:  7,
      },
      credits,
      sem_year: semester.year,
      sem_term: semester.term,
    }
  }

  fn catalog() -> Vec<Semester> {
    (2023..=2035)
      .flat_map(|y| [Term::Fall, Term::Spring, Term::Summer].map(|t| Semester::new(t, y)))
      .collect()
  }

  #[test]
  fn empty_ledger_has_undefined_gpa() {
    let d = build(&profile(), &[], &catalog(), Some(&major()));
    assert_eq!(d.gpa, None);
    assert_eq!(d.standing, Standing::Invalid);
    assert_eq!(d.credits_earned, 0);
    assert_eq!(d.credits_required, Some(134));
    assert_eq!(d.credits_percent, Some(0));
    assert_eq!(d.semesters_remaining, 8);
    assert_eq!(d.expected_graduation.sem_code, "SPRING2027");
    assert_eq!(d.slots.len(), 8);
  }

  #[test]
  fn completed_courses_drive_gpa_and_slots() {
    let entries = [
      entry("CSC1401", "FALL2023", 4, CourseStatus::Done, Some("A")),
      entry("MTH1303", "FALL2023", 3, CourseStatus::Done, Some("B+")),
      entry("FAS0210", "SUMMER2024", 2, CourseStatus::Planned, None),
    ];
    let d = build(&profile(), &entries, &catalog(), Some(&major()));

    let gpa = d.gpa.unwrap();
    assert!((gpa - (16.0 + 9.9) / 7.0).abs() < 1e-9);
    assert_eq!(d.standing, Standing::Good);
    assert_eq!(d.credits_earned, 7);
    assert_eq!(d.credits_percent, Some(5));
    assert_eq!(d.semesters_remaining, 7);

    let first = &d.slots[0];
    assert_eq!(first.label, "FALL 2023");
    assert_eq!((first.credits, first.courses), (7, 2));

    let summer = d
      .slots
      .iter()
      .find(|s| s.semester.sem_code == "SUMMER2024")
      .unwrap();
    assert_eq!((summer.credits, summer.courses), (2, 1));
    assert!(!d.frames[0].summer_affordance);
  }

  #[test]
  fn gpa_above_four_is_reported_with_invalid_standing() {
    let entries = [entry("CSC1401", "FALL2023", 4, CourseStatus::Done, Some("A+"))];
    let d = build(&profile(), &entries, &catalog(), Some(&major()));
    assert!((d.gpa.unwrap() - 4.3).abs() < 1e-9);
    assert_eq!(d.standing, Standing::Invalid);
  }

  #[test]
  fn unknown_major_leaves_requirement_empty() {
    let d = build(&profile(), &[], &catalog(), None);
    assert_eq!(d.credits_required, None);
    assert_eq!(d.credits_percent, None);
  }
}
