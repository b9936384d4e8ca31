//! The `PlannerStore` trait.
//!
//! Implemented by storage backends (e.g. `planner-store-sqlite`). Higher
//! layers (`planner-api`) depend on this abstraction, not on any concrete
//! backend.
//!
//! Catalog methods are read-only. Ledger mutations are full transactions:
//! their precondition checks and their write observe one consistent snapshot,
//! and a failed check leaves the ledger untouched.

use std::future::Future;

use crate::{
  catalog::{Course, CourseFilter, Major, Prerequisite},
  ledger::{CourseUpdate, LedgerEntry, NewPlannedCourse, PlannedCourse},
  prereq::Admissibility,
  profile::{NewProfile, Profile},
  semester::Semester,
};

/// Abstraction over a degree-planner backend.
///
/// The associated error converts into [`crate::Error`] so callers can tell
/// validation failures apart from an unavailable store.
pub trait PlannerStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Look up a course by code. Returns `None` if the catalog has no such
  /// course.
  fn lookup_course<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Course>, Self::Error>> + Send + 'a;

  fn list_courses<'a>(
    &'a self,
    filter: &'a CourseFilter,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + 'a;

  /// All prerequisite edges of `code`, corequisites included.
  fn list_prerequisites<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Vec<Prerequisite>, Self::Error>> + Send + 'a;

  fn get_semester<'a>(
    &'a self,
    sem_code: &'a str,
  ) -> impl Future<Output = Result<Option<Semester>, Self::Error>> + Send + 'a;

  /// Every semester in the catalog, in chronological order.
  fn list_semesters(
    &self,
  ) -> impl Future<Output = Result<Vec<Semester>, Self::Error>> + Send + '_;

  fn list_majors(&self) -> impl Future<Output = Result<Vec<Major>, Self::Error>> + Send + '_;

  fn get_major_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Major>, Self::Error>> + Send + 'a;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Validate and persist a new profile. Fails if the major is unknown.
  fn create_profile(
    &self,
    input: NewProfile,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  fn get_profile(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  /// The first stored profile, if onboarding has happened.
  fn active_profile(
    &self,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  // ── Ledger ────────────────────────────────────────────────────────────

  /// Run the prerequisite validator for `course_code` against the current
  /// ledger of `profile_id` without writing anything.
  fn can_plan<'a>(
    &'a self,
    profile_id: i64,
    course_code: &'a str,
  ) -> impl Future<Output = Result<Admissibility, Self::Error>> + Send + 'a;

  /// Insert a ledger row after checking, in one transaction, that the
  /// course, semester and profile exist, the course is not already planned,
  /// and its prerequisites are satisfied.
  fn add_course(
    &self,
    input: NewPlannedCourse,
  ) -> impl Future<Output = Result<PlannedCourse, Self::Error>> + Send + '_;

  /// Replace a row's semester, status and grade. Prerequisites are not
  /// re-checked.
  fn update_course<'a>(
    &'a self,
    profile_id: i64,
    course_code: &'a str,
    update: CourseUpdate,
  ) -> impl Future<Output = Result<PlannedCourse, Self::Error>> + Send + 'a;

  /// Delete a row. Courses that depended on it stay in the ledger.
  fn remove_course<'a>(
    &'a self,
    profile_id: i64,
    course_code: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Rows in one semester, in insertion order.
  fn courses_in_semester<'a>(
    &'a self,
    profile_id: i64,
    sem_code: &'a str,
  ) -> impl Future<Output = Result<Vec<PlannedCourse>, Self::Error>> + Send + 'a;

  /// Every row of the profile joined with course credits and semester term.
  fn ledger(
    &self,
    profile_id: i64,
  ) -> impl Future<Output = Result<Vec<LedgerEntry>, Self::Error>> + Send + '_;
}
