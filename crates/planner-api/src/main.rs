//! planner-server binary.
//!
//! Reads `planner.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the planner API over HTTP under `/api`.
//!
//! # Seeding semesters
//!
//! The catalog's semester table is filled once per installation:
//!
//! ```
//! cargo run -p planner-api --bin planner-server -- --seed-semesters 2023-2035
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use planner_api::ServerConfig;
use planner_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Degree planner API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "planner.toml")]
  config: PathBuf,

  /// Insert FALL, SPRING and SUMMER rows for an inclusive year range such as
  /// `2023-2035`, then exit.
  #[arg(long, value_name = "FROM-TO", value_parser = parse_year_range)]
  seed_semesters: Option<(i32, i32)>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PLANNER"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: seed semesters and exit.
  if let Some((from, to)) = cli.seed_semesters {
    let added = store
      .seed_semesters(from, to)
      .await
      .context("failed to seed semesters")?;
    println!("{added} semesters added");
    return Ok(());
  }

  let app = Router::new()
    .nest("/api", planner_api::api_router(Arc::new(store)))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Parse `FROM-TO` into an inclusive, ordered year pair.
fn parse_year_range(s: &str) -> Result<(i32, i32), String> {
  let (from, to) = s
    .split_once('-')
    .ok_or_else(|| format!("expected FROM-TO, got {s:?}"))?;
  let from: i32 = from.trim().parse().map_err(|e| format!("bad start year: {e}"))?;
  let to: i32 = to.trim().parse().map_err(|e| format!("bad end year: {e}"))?;
  if to < from {
    return Err(format!("end year {to} precedes start year {from}"));
  }
  Ok((from, to))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn year_ranges() {
    assert_eq!(parse_year_range("2023-2035").unwrap(), (2023, 2035));
    assert_eq!(parse_year_range("2030-2030").unwrap(), (2030, 2030));
    assert!(parse_year_range("2035-2023").is_err());
    assert!(parse_year_range("2023").is_err());
    assert!(parse_year_range("abcd-2024").is_err());
  }

  #[test]
  fn tilde_expands_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/planner.db")),
      PathBuf::from(home).join("planner.db")
    );
    assert_eq!(expand_tilde(Path::new("/tmp/p.db")), PathBuf::from("/tmp/p.db"));
  }
}
