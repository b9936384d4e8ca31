//! Semester sequencer.
//!
//! Lays a student's tenure out as one *year frame* per academic year. A frame
//! for year `y` covers FALL `y`, SPRING `y + 1` and, when the ledger holds
//! courses in it, SUMMER `y + 1`. Frames without a summer carry an
//! affordance so the caller can offer to add one.
//!
//! The first frame honours the profile's starting term: a SPRING start drops
//! the frame's FALL, and a SUMMER start (legacy rows only) keeps nothing but
//! the summer when one exists.
//!
//! Ledger semesters outside every frame are merged into the slot list in
//! chronological order, so no planned course drops out of the layout.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
  profile::{GRADUATION_WINDOW_YEARS, Profile},
  semester::{Semester, Term},
};

/// The slots emitted for one academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearFrame {
  /// Calendar year of the frame's FALL term.
  pub year:              i32,
  pub slots:             Vec<Semester>,
  /// `true` when the frame has no summer and one may be inserted.
  pub summer_affordance: bool,
}

/// The full sequence for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
  pub frames: Vec<YearFrame>,
  /// Every emitted slot plus every ledger semester outside the frames, in
  /// chronological order.
  pub slots:  Vec<Semester>,
}

/// What kind of semester an explicit insert adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemesterKind {
  Regular,
  Summer,
}

/// Build the frame for academic year `year`.
///
/// `start_term` is the profile's starting semester for the first frame and
/// FALL for every later one. `None` when `year + 1` is not representable.
pub fn year_frame(year: i32, start_term: Term, has_summer: bool) -> Option<YearFrame> {
  let next = year.checked_add(1)?;
  let fall = Semester::new(Term::Fall, year);
  let spring = Semester::new(Term::Spring, next);
  let summer = Semester::new(Term::Summer, next);

  let slots = match (has_summer, start_term) {
    (false, Term::Spring) => vec![spring],
    (false, _) => vec![fall, spring],
    (true, Term::Spring) => vec![spring, summer],
    (true, Term::Summer) => vec![summer],
    (true, Term::Fall) => vec![fall, spring, summer],
  };

  Some(YearFrame { year, slots, summer_affordance: !has_summer })
}

/// Lay out every frame from the profile's starting year up to the academic
/// year that ends in its graduation SPRING, at most
/// [`GRADUATION_WINDOW_YEARS`] frames.
///
/// `ledger_semesters` are the semesters that hold at least one ledger row; a
/// frame includes its summer iff SUMMER `year + 1` is among them.
pub fn sequence(profile: &Profile, ledger_semesters: &BTreeSet<Semester>) -> Sequence {
  let summer_years: BTreeSet<i32> = ledger_semesters
    .iter()
    .filter(|s| s.term.is_summer())
    .map(|s| s.year)
    .collect();

  let first_frame = profile.starting_year;
  let last_frame = profile
    .graduation_year
    .saturating_sub(1)
    .min(first_frame.saturating_add(GRADUATION_WINDOW_YEARS - 1))
    .max(first_frame);

  let frames: Vec<YearFrame> = (first_frame..=last_frame)
    .map_while(|year| {
      let start_term = if year == first_frame { profile.starting_semester } else { Term::Fall };
      let has_summer = year.checked_add(1).is_some_and(|next| summer_years.contains(&next));
      year_frame(year, start_term, has_summer)
    })
    .collect();

  let mut merged: BTreeSet<Semester> =
    frames.iter().flat_map(|f| f.slots.iter().cloned()).collect();
  merged.extend(ledger_semesters.iter().cloned());

  Sequence { frames, slots: merged.into_iter().collect() }
}

/// Append a new semester after the most recent of the last two slots.
///
/// A regular insert after FALL adds the next SPRING; after SPRING or SUMMER it
/// adds that year's FALL. A summer insert after SPRING adds the same year's
/// SUMMER; otherwise the next year's. If the new slot sorts before its
/// predecessor the two are swapped. Returns the inserted semester, or `None`
/// when `slots` is empty or the next year is not representable.
pub fn insert_semester(slots: &mut Vec<Semester>, kind: SemesterKind) -> Option<Semester> {
  let n = slots.len();
  let latest = slots[n.saturating_sub(2)..].iter().max()?.clone();

  let new = match (kind, latest.term) {
    (SemesterKind::Regular, Term::Fall) => Semester::new(Term::Spring, latest.year.checked_add(1)?),
    (SemesterKind::Regular, _) => Semester::new(Term::Fall, latest.year),
    (SemesterKind::Summer, Term::Spring) => Semester::new(Term::Summer, latest.year),
    (SemesterKind::Summer, _) => Semester::new(Term::Summer, latest.year.checked_add(1)?),
  };

  slots.push(new.clone());
  let n = slots.len();
  if n >= 2 && slots[n - 1] < slots[n - 2] {
    slots.swap(n - 1, n - 2);
  }

  Some(new)
}
