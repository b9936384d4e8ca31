//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use planner_core::Error as PlanError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Plan(#[from] PlanError),

  #[error("bad request: {0}")]
  BadRequest(String),
}

/// Adapter for `map_err` on any store's associated error type.
pub fn store_err<E: Into<PlanError>>(err: E) -> ApiError { ApiError::Plan(err.into()) }

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Plan(e) => match e {
        PlanError::NotFound(_)
        | PlanError::UnknownCourse(_)
        | PlanError::UnknownSemester(_)
        | PlanError::UnknownProfile(_) => StatusCode::NOT_FOUND,
        PlanError::AlreadyPlanned(_) => StatusCode::CONFLICT,
        PlanError::PrereqBlocked { .. } | PlanError::Undefined => {
          StatusCode::UNPROCESSABLE_ENTITY
        }
        PlanError::OutOfRange(_)
        | PlanError::InvalidProfile(_)
        | PlanError::UnknownTerm(_)
        | PlanError::MalformedSemesterCode(_) => StatusCode::BAD_REQUEST,
        PlanError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match &self {
      ApiError::Plan(PlanError::PrereqBlocked { missing, .. }) => {
        json!({ "error": self.to_string(), "missing": missing })
      }
      ApiError::Plan(PlanError::StoreUnavailable(reason)) => {
        tracing::error!(%reason, "store unavailable");
        json!({ "error": self.to_string() })
      }
      _ => json!({ "error": self.to_string() }),
    };
    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statuses() {
    let cases = [
      (PlanError::NotFound("CSC1401".into()), StatusCode::NOT_FOUND),
      (PlanError::UnknownProfile(3), StatusCode::NOT_FOUND),
      (PlanError::AlreadyPlanned("CSC1401".into()), StatusCode::CONFLICT),
      (
        PlanError::PrereqBlocked { course: "CSC2302".into(), missing: Default::default() },
        StatusCode::UNPROCESSABLE_ENTITY,
      ),
      (PlanError::OutOfRange(4.3), StatusCode::BAD_REQUEST),
      (PlanError::MalformedSemesterCode("F24".into()), StatusCode::BAD_REQUEST),
      (PlanError::StoreUnavailable("disk".into()), StatusCode::SERVICE_UNAVAILABLE),
    ];
    for (err, status) in cases {
      assert_eq!(ApiError::from(err).status(), status);
    }
  }
}
