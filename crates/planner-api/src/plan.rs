//! Ledger endpoints: the add / edit / remove calls of the planning UI.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/profiles/{id}/courses` | Body: [`AddBody`]; 422 with `missing` when blocked |
//! | `PUT`    | `/profiles/{id}/courses/{code}` | Body: [`CourseUpdate`]; prerequisites not re-checked |
//! | `DELETE` | `/profiles/{id}/courses/{code}` | 204; dependents are left in place |
//! | `GET`    | `/profiles/{id}/courses/{code}/admissibility` | Dry-run of the prerequisite gate |
//! | `GET`    | `/profiles/{id}/semesters/{sem_code}` | Courses plus credit summary |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use planner_core::{
  Error as PlanError,
  ledger::{CourseStatus, CourseUpdate, NewPlannedCourse, PlannedCourse},
  prereq::Admissibility,
  progress::{self, SemesterLoad},
  semester::Semester,
  store::PlannerStore,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, store_err};

// ─── Add ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub course_code: String,
  pub sem_code:    String,
  pub status:      CourseStatus,
  #[serde(default)]
  pub grade:       Option<String>,
}

/// `POST /profiles/{id}/courses`
pub async fn add<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path(profile_id): Path<i64>,
  Json(body): Json<AddBody>,
) -> Result<impl IntoResponse, ApiError> {
  let planned = store
    .add_course(NewPlannedCourse {
      profile_id,
      course_code: body.course_code,
      sem_code: body.sem_code,
      status: body.status,
      grade: body.grade,
    })
    .await
    .map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(planned)))
}

// ─── Edit / remove ───────────────────────────────────────────────────────────

/// `PUT /profiles/{id}/courses/{code}`
pub async fn edit<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path((profile_id, code)): Path<(i64, String)>,
  Json(body): Json<CourseUpdate>,
) -> Result<Json<PlannedCourse>, ApiError> {
  let planned = store
    .update_course(profile_id, &code, body)
    .await
    .map_err(store_err)?;
  Ok(Json(planned))
}

/// `DELETE /profiles/{id}/courses/{code}`
pub async fn remove<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path((profile_id, code)): Path<(i64, String)>,
) -> Result<StatusCode, ApiError> {
  store
    .remove_course(profile_id, &code)
    .await
    .map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /profiles/{id}/courses/{code}/admissibility`
pub async fn admissibility<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path((profile_id, code)): Path<(i64, String)>,
) -> Result<Json<Admissibility>, ApiError> {
  if store.lookup_course(&code).await.map_err(store_err)?.is_none() {
    return Err(PlanError::UnknownCourse(code).into());
  }
  Ok(Json(store.can_plan(profile_id, &code).await.map_err(store_err)?))
}

// ─── Semester view ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct SemesterView {
  pub semester: Semester,
  pub label:    String,
  pub summary:  SemesterLoad,
  pub courses:  Vec<PlannedCourse>,
}

/// `GET /profiles/{id}/semesters/{sem_code}`
pub async fn semester<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path((profile_id, sem_code)): Path<(i64, String)>,
) -> Result<Json<SemesterView>, ApiError> {
  if store.get_profile(profile_id).await.map_err(store_err)?.is_none() {
    return Err(PlanError::UnknownProfile(profile_id).into());
  }
  let semester = store
    .get_semester(&sem_code)
    .await
    .map_err(store_err)?
    .ok_or_else(|| PlanError::UnknownSemester(sem_code.clone()))?;

  let courses = store
    .courses_in_semester(profile_id, &sem_code)
    .await
    .map_err(store_err)?;
  let entries = store.ledger(profile_id).await.map_err(store_err)?;

  Ok(Json(SemesterView {
    label: semester.label(),
    summary: progress::semester_load(&entries, &sem_code),
    semester,
    courses,
  }))
}
