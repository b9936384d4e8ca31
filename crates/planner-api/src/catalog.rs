//! Read-only catalog endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses` | `?text=&dep_code=&classification=&unplanned_for=` |
//! | `GET`  | `/courses/{code}` | 404 if not in the catalog |
//! | `GET`  | `/courses/{code}/prerequisites` | Corequisites included |
//! | `GET`  | `/semesters` | Chronological |
//! | `GET`  | `/semesters/{code}` | |
//! | `GET`  | `/majors` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use planner_core::{
  Error as PlanError,
  catalog::{Course, CourseFilter, Major, Prerequisite},
  semester::Semester,
  store::PlannerStore,
};

use crate::error::{ApiError, store_err};

/// `GET /courses`
pub async fn list_courses<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Query(filter): Query<CourseFilter>,
) -> Result<Json<Vec<Course>>, ApiError> {
  let courses = store.list_courses(&filter).await.map_err(store_err)?;
  Ok(Json(courses))
}

/// `GET /courses/{code}`
pub async fn get_course<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path(code): Path<String>,
) -> Result<Json<Course>, ApiError> {
  let course = store
    .lookup_course(&code)
    .await
    .map_err(store_err)?
    .ok_or_else(|| PlanError::UnknownCourse(code.clone()))?;
  Ok(Json(course))
}

/// `GET /courses/{code}/prerequisites`
pub async fn prerequisites<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path(code): Path<String>,
) -> Result<Json<Vec<Prerequisite>>, ApiError> {
  let edges = store.list_prerequisites(&code).await.map_err(store_err)?;
  Ok(Json(edges))
}

/// `GET /semesters`
pub async fn list_semesters<S: PlannerStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Semester>>, ApiError> {
  Ok(Json(store.list_semesters().await.map_err(store_err)?))
}

/// `GET /semesters/{code}`
pub async fn get_semester<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path(code): Path<String>,
) -> Result<Json<Semester>, ApiError> {
  let semester = store
    .get_semester(&code)
    .await
    .map_err(store_err)?
    .ok_or_else(|| PlanError::UnknownSemester(code.clone()))?;
  Ok(Json(semester))
}

/// `GET /majors`
pub async fn list_majors<S: PlannerStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Major>>, ApiError> {
  Ok(Json(store.list_majors().await.map_err(store_err)?))
}
