//! `POST /sequence/insert`: append a semester to a caller-held slot list.
//!
//! Body: `{"slots": ["FALL2024", "SPRING2025"], "kind": "summer"}`.
//! The caller owns the displayed slots; nothing is persisted.

use axum::Json;
use planner_core::{
  semester::Semester,
  sequencer::{self, SemesterKind},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct InsertBody {
  pub slots: Vec<String>,
  pub kind:  SemesterKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsertResponse {
  pub inserted: Semester,
  pub slots:    Vec<Semester>,
}

pub async fn insert(Json(body): Json<InsertBody>) -> Result<Json<InsertResponse>, ApiError> {
  let mut slots = body
    .slots
    .iter()
    .map(|code| Semester::parse(code))
    .collect::<planner_core::Result<Vec<_>>>()?;

  let inserted = sequencer::insert_semester(&mut slots, body.kind).ok_or_else(|| {
    ApiError::BadRequest(if slots.is_empty() {
      "at least one slot is required".into()
    } else {
      "no semester can follow the given slots".into()
    })
  })?;

  Ok(Json(InsertResponse { inserted, slots }))
}
