//! Error type for `planner-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A planner rule rejected the operation; the database is unchanged.
  #[error(transparent)]
  Plan(#[from] planner_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored row could not be decoded into a domain value.
  #[error("corrupt row: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for planner_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Plan(e) => e,
      other => planner_core::Error::StoreUnavailable(other.to_string()),
    }
  }
}
