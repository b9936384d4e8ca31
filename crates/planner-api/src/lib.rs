//! JSON API for the degree planner.
//!
//! Exposes an axum [`Router`] backed by any [`planner_core::store::PlannerStore`].
//! This is the boundary a presentation layer calls: plan, edit and remove
//! courses, and fetch the dashboard. Transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", planner_api::api_router(store.clone()))
//! ```

pub mod catalog;
pub mod error;
pub mod plan;
pub mod profiles;
pub mod sequence;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use planner_core::store::PlannerStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `planner.toml` and
/// `PLANNER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/planner/planner.db") }

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PlannerStore + 'static,
{
  Router::new()
    // Catalog
    .route("/courses", get(catalog::list_courses::<S>))
    .route("/courses/{code}", get(catalog::get_course::<S>))
    .route("/courses/{code}/prerequisites", get(catalog::prerequisites::<S>))
    .route("/semesters", get(catalog::list_semesters::<S>))
    .route("/semesters/{code}", get(catalog::get_semester::<S>))
    .route("/majors", get(catalog::list_majors::<S>))
    // Onboarding and dashboard
    .route("/graduation-years", get(profiles::graduation_years))
    .route("/profiles", post(profiles::create::<S>))
    .route("/profiles/active", get(profiles::active::<S>))
    .route("/profiles/{id}", get(profiles::get_one::<S>))
    .route("/profiles/{id}/dashboard", get(profiles::dashboard::<S>))
    // Ledger
    .route("/profiles/{id}/courses", post(plan::add::<S>))
    .route(
      "/profiles/{id}/courses/{code}",
      put(plan::edit::<S>).delete(plan::remove::<S>),
    )
    .route(
      "/profiles/{id}/courses/{code}/admissibility",
      get(plan::admissibility::<S>),
    )
    .route("/profiles/{id}/semesters/{sem_code}", get(plan::semester::<S>))
    // Sequencer
    .route("/sequence/insert", post(sequence::insert))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use planner_core::catalog::{Course, Department, Prerequisite, School};
  use planner_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .insert_school(&School {
        school_code: "SSE".into(),
        school_name: "Science and Engineering".into(),
      })
      .await
      .unwrap();
    store
      .insert_department(&Department {
        dep_code:    "CSC".into(),
        dep_title:   "Computer Science".into(),
        school_code: "SSE".into(),
      })
      .await
      .unwrap();
    for (code, title, credits) in [
      ("CSC1401", "Computer Programming", 3),
      ("CSC2302", "Data Structures", 3),
      ("CSC3351", "Operating Systems", 3),
    ] {
      store
        .insert_course(&Course {
          code: code.into(),
          title: title.into(),
          description: None,
          credits,
          classification: None,
          dep_code: "CSC".into(),
          course_type: None,
          level: None,
        })
        .await
        .unwrap();
    }
    for (course, prereq) in [("CSC2302", "CSC1401"), ("CSC3351", "CSC2302")] {
      store
        .insert_prerequisite(&Prerequisite {
          course_code:    course.into(),
          prereq_code:    prereq.into(),
          is_corequisite: false,
        })
        .await
        .unwrap();
    }
    store.seed_semesters(2023, 2035).await.unwrap();
    store
      .insert_major("CS", "Computer Science", "CSC", 134)
      .await
      .unwrap();
    store
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  /// A router over a seeded store plus the id of an onboarded profile.
  async fn onboarded() -> (Router, i64) {
    let app = api_router(Arc::new(make_store().await));
    let (status, profile) = send(
      &app,
      "POST",
      "/profiles",
      Some(json!({
        "first_name": "Omar",
        "last_name": "Berrada",
        "graduation_year": 2027,
        "starting_year": 2023,
        "starting_semester": "FALL",
        "major": "Computer Science"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = profile["id"].as_i64().unwrap();
    (app, id)
  }

  // ── Onboarding ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn active_profile_before_and_after_onboarding() {
    let app = api_router(Arc::new(make_store().await));
    let (status, _) = send(&app, "GET", "/profiles/active", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (app, id) = onboarded().await;
    let (status, body) = send(&app, "GET", "/profiles/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["starting_semester"], "FALL");
  }

  #[tokio::test]
  async fn onboarding_rejects_unknown_major() {
    let app = api_router(Arc::new(make_store().await));
    let (status, body) = send(
      &app,
      "POST",
      "/profiles",
      Some(json!({
        "first_name": "Omar",
        "last_name": "Berrada",
        "graduation_year": 2027,
        "starting_year": 2023,
        "starting_semester": "SPRING",
        "major": "Astrology"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Astrology"));
  }

  #[tokio::test]
  async fn onboarding_rejects_span_beyond_the_window() {
    let app = api_router(Arc::new(make_store().await));
    for (start, grad) in [(2023, 2040), (2_147_483_647, 2_147_483_647)] {
      let (status, body) = send(
        &app,
        "POST",
        "/profiles",
        Some(json!({
          "first_name": "Omar",
          "last_name": "Berrada",
          "graduation_year": grad,
          "starting_year": start,
          "starting_semester": "FALL",
          "major": "Computer Science"
        })),
      )
      .await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{start}-{grad}: {body}");
    }
    let (status, _) = send(&app, "GET", "/profiles/active", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn graduation_years_span_the_window() {
    let app = api_router(Arc::new(make_store().await));
    let (status, body) = send(&app, "GET", "/graduation-years", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 11);
  }

  // ── Ledger ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn blocked_add_reports_missing_prereqs() {
    let (app, id) = onboarded().await;
    let (status, body) = send(
      &app,
      "POST",
      &format!("/profiles/{id}/courses"),
      Some(json!({ "course_code": "CSC2302", "sem_code": "SPRING2024", "status": "planned" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["missing"], json!(["CSC1401"]));

    let (_, verdict) = send(
      &app,
      "GET",
      &format!("/profiles/{id}/courses/CSC2302/admissibility"),
      None,
    )
    .await;
    assert_eq!(verdict["result"], "blocked");
  }

  #[tokio::test]
  async fn add_edit_remove_roundtrip() {
    let (app, id) = onboarded().await;
    let courses = format!("/profiles/{id}/courses");

    let (status, planned) = send(
      &app,
      "POST",
      &courses,
      Some(json!({ "course_code": "CSC1401", "sem_code": "FALL2023", "status": "current" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(planned["status"], "current");

    let (status, _) = send(
      &app,
      "POST",
      &courses,
      Some(json!({ "course_code": "CSC1401", "sem_code": "SPRING2024", "status": "planned" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, edited) = send(
      &app,
      "PUT",
      &format!("{courses}/CSC1401"),
      Some(json!({ "sem_code": "FALL2023", "status": "done", "grade": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["grade"], "A");

    let (status, view) = send(&app, "GET", &format!("/profiles/{id}/semesters/FALL2023"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["label"], "FALL 2023");
    assert_eq!(view["summary"], json!({ "credits": 3, "courses": 1 }));

    let (status, _) = send(&app, "DELETE", &format!("{courses}/CSC1401"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("{courses}/CSC1401"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn add_to_unknown_semester_is_not_found() {
    let (app, id) = onboarded().await;
    let (status, _) = send(
      &app,
      "POST",
      &format!("/profiles/{id}/courses"),
      Some(json!({ "course_code": "CSC1401", "sem_code": "FALL1990", "status": "planned" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn picker_excludes_planned_courses() {
    let (app, id) = onboarded().await;
    send(
      &app,
      "POST",
      &format!("/profiles/{id}/courses"),
      Some(json!({ "course_code": "CSC1401", "sem_code": "FALL2023", "status": "planned" })),
    )
    .await;

    let (status, body) = send(&app, "GET", &format!("/courses?unplanned_for={id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<_> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["code"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(codes, ["CSC2302", "CSC3351"]);
  }

  // ── Dashboard and sequencing ────────────────────────────────────────────────

  #[tokio::test]
  async fn dashboard_reflects_completed_course() {
    let (app, id) = onboarded().await;
    let (_, before) = send(&app, "GET", &format!("/profiles/{id}/dashboard"), None).await;
    assert_eq!(before["gpa"], Value::Null);
    assert_eq!(before["standing"], "invalid");
    assert_eq!(before["slots"].as_array().unwrap().len(), 8);

    send(
      &app,
      "POST",
      &format!("/profiles/{id}/courses"),
      Some(json!({
        "course_code": "CSC1401", "sem_code": "FALL2023", "status": "done", "grade": "A"
      })),
    )
    .await;

    let (status, after) = send(&app, "GET", &format!("/profiles/{id}/dashboard"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["gpa"], 4.0);
    assert_eq!(after["standing"], "highest_honors");
    assert_eq!(after["credits_earned"], 3);
    assert_eq!(after["credits_required"], 134);
    assert_eq!(after["semesters_remaining"], 7);
    assert_eq!(after["expected_graduation"]["sem_code"], "SPRING2027");
  }

  #[tokio::test]
  async fn dashboard_for_unknown_profile_is_not_found() {
    let app = api_router(Arc::new(make_store().await));
    let (status, _) = send(&app, "GET", "/profiles/77/dashboard", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn insert_summer_slot() {
    let app = api_router(Arc::new(make_store().await));
    let (status, body) = send(
      &app,
      "POST",
      "/sequence/insert",
      Some(json!({ "slots": ["FALL2024", "SPRING2025"], "kind": "summer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"]["sem_code"], "SUMMER2025");
    let codes: Vec<_> = body["slots"]
      .as_array()
      .unwrap()
      .iter()
      .map(|s| s["sem_code"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(codes, ["FALL2024", "SPRING2025", "SUMMER2025"]);
  }

  #[tokio::test]
  async fn insert_rejects_bad_slots() {
    let app = api_router(Arc::new(make_store().await));
    let (status, _) = send(
      &app,
      "POST",
      "/sequence/insert",
      Some(json!({ "slots": ["AUTUMN2024"], "kind": "regular" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      &app,
      "POST",
      "/sequence/insert",
      Some(json!({ "slots": [], "kind": "regular" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
