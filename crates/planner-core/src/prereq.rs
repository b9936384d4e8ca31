//! The prerequisite validator.
//!
//! A course may be planned only if every non-corequisite prerequisite is
//! already somewhere in the student's ledger. Status does not matter: a
//! prerequisite that is current or merely planned counts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Error, catalog::Prerequisite};

/// Outcome of [`can_plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Admissibility {
  Admissible,
  Blocked { missing: BTreeSet<String> },
}

impl Admissibility {
  pub fn is_admissible(&self) -> bool { matches!(self, Self::Admissible) }

  /// Convert a block into [`Error::PrereqBlocked`] for `course`.
  pub fn into_result(self, course: &str) -> crate::Result<()> {
    match self {
      Self::Admissible => Ok(()),
      Self::Blocked { missing } => Err(Error::PrereqBlocked {
        course: course.to_owned(),
        missing,
      }),
    }
  }
}

/// Decide whether a course with prerequisite `edges` can be planned given the
/// course codes already in the ledger.
///
/// Edges for other courses are ignored, so callers may pass a superset.
pub fn can_plan<'a, I>(course_code: &str, edges: &[Prerequisite], ledger_codes: I) -> Admissibility
where
  I: IntoIterator<Item = &'a str>,
{
  let present: BTreeSet<&str> = ledger_codes.into_iter().collect();

  let missing: BTreeSet<String> = edges
    .iter()
    .filter(|e| e.course_code == course_code && !e.is_corequisite)
    .filter(|e| !present.contains(e.prereq_code.as_str()))
    .map(|e| e.prereq_code.clone())
    .collect();

  if missing.is_empty() {
    Admissibility::Admissible
  } else {
    Admissibility::Blocked { missing }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const NOTHING: [&str; 0] = [];

  fn edge(course: &str, prereq: &str, coreq: bool) -> Prerequisite {
    Prerequisite {
      course_code:    course.into(),
      prereq_code:    prereq.into(),
      is_corequisite: coreq,
    }
  }

  #[test]
  fn no_edges_is_admissible() {
    assert_eq!(can_plan("CSC1401", &[], NOTHING), Admissibility::Admissible);
  }

  #[test]
  fn present_prereq_of_any_status_admits() {
    let edges = [edge("CSC2302", "CSC1401", false)];
    assert!(can_plan("CSC2302", &edges, ["CSC1401"]).is_admissible());
  }

  #[test]
  fn reports_every_missing_prereq() {
    let edges = [
      edge("CSC3309", "CSC3323", false),
      edge("CSC3309", "CSC2306", false),
      edge("CSC3309", "MTH3301", false),
    ];
    let missing = match can_plan("CSC3309", &edges, ["CSC2306"]) {
      Admissibility::Blocked { missing } => missing,
      other => panic!("expected Blocked, got {other:?}"),
    };
    assert_eq!(
      missing.into_iter().collect::<Vec<_>>(),
      ["CSC3323", "MTH3301"]
    );
  }

  #[test]
  fn corequisites_never_block() {
    let edges = [edge("HIS1301", "FAS1220", true)];
    assert!(can_plan("HIS1301", &edges, NOTHING).is_admissible());
  }

  #[test]
  fn edges_for_other_courses_are_ignored() {
    let edges = [edge("PHY1402", "PHY1401", false)];
    assert!(can_plan("CSC1401", &edges, NOTHING).is_admissible());
  }

  #[test]
  fn blocked_converts_to_error() {
    let edges = [edge("CSC2302", "CSC1401", false)];
    let err = can_plan("CSC2302", &edges, NOTHING)
      .into_result("CSC2302")
      .unwrap_err();
    assert!(matches!(err, Error::PrereqBlocked { ref course, ref missing }
      if course == "CSC2302" && missing.contains("CSC1401")));
  }
}
