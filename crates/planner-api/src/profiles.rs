//! Onboarding and dashboard endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/graduation-years` | Years offered at onboarding |
//! | `POST` | `/profiles` | Body: [`NewProfile`]; 201 on success |
//! | `GET`  | `/profiles/active` | 404 before onboarding |
//! | `GET`  | `/profiles/{id}` | |
//! | `GET`  | `/profiles/{id}/dashboard` | Re-derived on every call |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use planner_core::{
  Error as PlanError,
  dashboard::{self, Dashboard},
  profile::{self, NewProfile, Profile},
  store::PlannerStore,
};

use crate::error::{ApiError, store_err};

/// `GET /graduation-years`
pub async fn graduation_years() -> Json<Vec<i32>> {
  Json(profile::graduation_year_options_now().collect())
}

/// `POST /profiles`
pub async fn create<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewProfile>,
) -> Result<impl IntoResponse, ApiError> {
  let profile = store.create_profile(body).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(profile)))
}

/// `GET /profiles/active`
pub async fn active<S: PlannerStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Profile>, ApiError> {
  store
    .active_profile()
    .await
    .map_err(store_err)?
    .map(Json)
    .ok_or_else(|| ApiError::Plan(PlanError::NotFound("no profile has been created".into())))
}

/// `GET /profiles/{id}`
pub async fn get_one<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Profile>, ApiError> {
  let profile = store
    .get_profile(id)
    .await
    .map_err(store_err)?
    .ok_or(PlanError::UnknownProfile(id))?;
  Ok(Json(profile))
}

/// `GET /profiles/{id}/dashboard`
pub async fn dashboard<S: PlannerStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Dashboard>, ApiError> {
  Ok(Json(dashboard::load(store.as_ref(), id).await?))
}
