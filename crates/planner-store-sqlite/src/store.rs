//! [`SqliteStore`]: the SQLite implementation of [`PlannerStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};

use planner_core::{
  Error as PlanError,
  catalog::{Course, CourseFilter, Department, Major, Prerequisite, School},
  ledger::{CourseUpdate, LedgerEntry, NewPlannedCourse, PlannedCourse},
  prereq::{self, Admissibility},
  profile::{NewProfile, Profile},
  semester::{Semester, Term},
  store::PlannerStore,
};

use crate::{
  Result,
  encode::{
    RawCourse, RawLedgerEntry, RawMajor, RawPlanned, RawProfile, RawSemester, encode_status,
    encode_term, escape_like, prerequisite_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A degree-planner store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Snapshot queries ────────────────────────────────────────────────────────
//
// Synchronous helpers that run on the connection thread, either on the bare
// connection or inside a mutation's transaction.

fn exists(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> rusqlite::Result<bool> {
  Ok(conn.query_row(sql, params, |_| Ok(())).optional()?.is_some())
}

fn admissibility(
  conn: &Connection,
  profile_id: i64,
  course_code: &str,
) -> rusqlite::Result<Admissibility> {
  let edges = conn
    .prepare(
      "SELECT course_code, prereq, prereq_is_corequisite
       FROM course_prereq WHERE course_code = ?1",
    )?
    .query_map([course_code], prerequisite_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let planned = conn
    .prepare("SELECT course_code FROM course_planning WHERE profile_id = ?1")?
    .query_map([profile_id], |row| row.get::<_, String>(0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(prereq::can_plan(
    course_code,
    &edges,
    planned.iter().map(String::as_str),
  ))
}

// ─── Catalog seeding ─────────────────────────────────────────────────────────

impl SqliteStore {
  /// Seeding inserts are `INSERT OR IGNORE`, so re-running a seed is a no-op.
  pub async fn insert_school(&self, school: &School) -> Result<()> {
    let School { school_code, school_name } = school.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO school (school_code, school_name) VALUES (?1, ?2)",
          rusqlite::params![school_code, school_name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_department(&self, department: &Department) -> Result<()> {
    let Department { dep_code, dep_title, school_code } = department.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO department (dep_code, dep_title, school_code)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![dep_code, dep_title, school_code],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_course(&self, course: &Course) -> Result<()> {
    let course = course.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO course (
             course_code, course_title, course_description, course_credits,
             course_classification, dep_code, course_type, course_level
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            course.code,
            course.title,
            course.description,
            course.credits,
            course.classification,
            course.dep_code,
            course.course_type,
            course.level,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_prerequisite(&self, edge: &Prerequisite) -> Result<()> {
    let Prerequisite { course_code, prereq_code, is_corequisite } = edge.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO course_prereq (course_code, prereq, prereq_is_corequisite)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![course_code, prereq_code, is_corequisite],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert FALL, SPRING and SUMMER for every year in `from..=to`.
  ///
  /// Returns how many rows were new.
  pub async fn seed_semesters(&self, from: i32, to: i32) -> Result<usize> {
    let semesters = (from..=to)
      .flat_map(|year| [Term::Fall, Term::Spring, Term::Summer].map(|t| Semester::new(t, year)))
      .collect();
    let added = self.insert_semesters(semesters).await?;
    tracing::info!(from, to, added, "seeded semesters");
    Ok(added)
  }

  async fn insert_semesters(&self, semesters: Vec<Semester>) -> Result<usize> {
    let added = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut added = 0;
        {
          let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO semester (sem_code, sem_year, sem_term) VALUES (?1, ?2, ?3)",
          )?;
          for s in &semesters {
            added += stmt.execute(rusqlite::params![s.sem_code, s.year, encode_term(s.term)])?;
          }
        }
        tx.commit()?;
        Ok(added)
      })
      .await?;
    Ok(added)
  }

  pub async fn insert_major(
    &self,
    major_code: &str,
    major_name: &str,
    department: &str,
    credit_requirements: u32,
  ) -> Result<Major> {
    let (code, name, dept) = (major_code.to_owned(), major_name.to_owned(), department.to_owned());
    let major_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO major (major_code, major_name, department_id, credit_requirements)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![code, name, dept, credit_requirements],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Major {
      major_id,
      major_code: major_code.to_owned(),
      major_name: major_name.to_owned(),
      department: department.to_owned(),
      credit_requirements,
    })
  }
}

// ─── PlannerStore impl ───────────────────────────────────────────────────────

impl PlannerStore for SqliteStore {
  type Error = crate::Error;

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn lookup_course(&self, code: &str) -> Result<Option<Course>> {
    let code = code.to_owned();
    let raw: Option<RawCourse> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {} FROM course WHERE course_code = ?1", RawCourse::COLUMNS);
        Ok(conn.query_row(&sql, [code], RawCourse::from_row).optional()?)
      })
      .await?;

    raw.map(RawCourse::into_course).transpose()
  }

  async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>> {
    let dep_code = filter.dep_code.clone();
    let classification = filter.classification.clone();
    let text_pattern = filter
      .text
      .as_deref()
      .map(|t| format!("%{}%", escape_like(t.trim())));
    let unplanned_for = filter.unplanned_for;

    let raws: Vec<RawCourse> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM course
           WHERE (?1 IS NULL OR dep_code = ?1)
             AND (?2 IS NULL OR course_classification = ?2)
             AND (?3 IS NULL OR course_code LIKE ?3 ESCAPE '\\'
                             OR course_title LIKE ?3 ESCAPE '\\')
             AND (?4 IS NULL OR course_code NOT IN
                   (SELECT course_code FROM course_planning WHERE profile_id = ?4))
           ORDER BY course_code",
          RawCourse::COLUMNS
        );
        let rows = conn
          .prepare(&sql)?
          .query_map(
            rusqlite::params![dep_code, classification, text_pattern, unplanned_for],
            RawCourse::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCourse::into_course).collect()
  }

  async fn list_prerequisites(&self, code: &str) -> Result<Vec<Prerequisite>> {
    let code = code.to_owned();
    let edges = self
      .conn
      .call(move |conn| {
        let rows = conn
          .prepare(
            "SELECT course_code, prereq, prereq_is_corequisite
             FROM course_prereq WHERE course_code = ?1 ORDER BY prereq",
          )?
          .query_map([code], prerequisite_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(edges)
  }

  async fn get_semester(&self, sem_code: &str) -> Result<Option<Semester>> {
    let sem_code = sem_code.to_owned();
    let raw: Option<RawSemester> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT sem_code, sem_year, sem_term FROM semester WHERE sem_code = ?1",
              [sem_code],
              RawSemester::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSemester::into_semester).transpose()
  }

  async fn list_semesters(&self) -> Result<Vec<Semester>> {
    let raws: Vec<RawSemester> = self
      .conn
      .call(|conn| {
        let rows = conn
          .prepare("SELECT sem_code, sem_year, sem_term FROM semester")?
          .query_map([], RawSemester::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut semesters = raws
      .into_iter()
      .map(RawSemester::into_semester)
      .collect::<Result<Vec<_>>>()?;
    semesters.sort();
    Ok(semesters)
  }

  async fn list_majors(&self) -> Result<Vec<Major>> {
    let raws: Vec<RawMajor> = self
      .conn
      .call(|conn| {
        let sql = format!("SELECT {} FROM major ORDER BY major_id", RawMajor::COLUMNS);
        let rows = conn
          .prepare(&sql)?
          .query_map([], RawMajor::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMajor::into_major).collect()
  }

  async fn get_major_by_name(&self, name: &str) -> Result<Option<Major>> {
    let name = name.to_owned();
    let raw: Option<RawMajor> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM major WHERE major_name = ?1 ORDER BY major_id LIMIT 1",
          RawMajor::COLUMNS
        );
        Ok(conn.query_row(&sql, [name], RawMajor::from_row).optional()?)
      })
      .await?;

    raw.map(RawMajor::into_major).transpose()
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn create_profile(&self, input: NewProfile) -> Result<Profile> {
    input.validate()?;

    let row = input.clone();
    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !exists(&tx, "SELECT 1 FROM major WHERE major_name = ?1", [&row.major])? {
          return Ok(Err(PlanError::InvalidProfile(format!(
            "unknown major: {}",
            row.major
          ))));
        }
        tx.execute(
          "INSERT INTO profile (
             fname, lname, graduation_year, starting_year, starting_semester, major, minor
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            row.first_name.trim(),
            row.last_name.trim(),
            row.graduation_year,
            row.starting_year,
            encode_term(row.starting_semester),
            row.major,
            row.minor,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Ok(id))
      })
      .await??;

    tracing::info!(profile_id = id, major = %input.major, "created profile");

    Ok(Profile {
      id,
      first_name: input.first_name.trim().to_owned(),
      last_name: input.last_name.trim().to_owned(),
      graduation_year: input.graduation_year,
      starting_year: input.starting_year,
      starting_semester: input.starting_semester,
      major: input.major,
      minor: input.minor,
    })
  }

  async fn get_profile(&self, id: i64) -> Result<Option<Profile>> {
    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {} FROM profile WHERE id = ?1", RawProfile::COLUMNS);
        Ok(conn.query_row(&sql, [id], RawProfile::from_row).optional()?)
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn active_profile(&self) -> Result<Option<Profile>> {
    let raw: Option<RawProfile> = self
      .conn
      .call(|conn| {
        let sql = format!("SELECT {} FROM profile ORDER BY id LIMIT 1", RawProfile::COLUMNS);
        Ok(conn.query_row(&sql, [], RawProfile::from_row).optional()?)
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  // ── Ledger ────────────────────────────────────────────────────────────────

  async fn can_plan(&self, profile_id: i64, course_code: &str) -> Result<Admissibility> {
    let code = course_code.to_owned();
    let verdict = self
      .conn
      .call(move |conn| Ok(admissibility(conn, profile_id, &code)?))
      .await?;
    Ok(verdict)
  }

  async fn add_course(&self, input: NewPlannedCourse) -> Result<PlannedCourse> {
    let row = input.clone();
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !exists(&tx, "SELECT 1 FROM course WHERE course_code = ?1", [&row.course_code])? {
          return Ok(Err(PlanError::UnknownCourse(row.course_code)));
        }
        if !exists(&tx, "SELECT 1 FROM semester WHERE sem_code = ?1", [&row.sem_code])? {
          return Ok(Err(PlanError::UnknownSemester(row.sem_code)));
        }
        if !exists(&tx, "SELECT 1 FROM profile WHERE id = ?1", [row.profile_id])? {
          return Ok(Err(PlanError::UnknownProfile(row.profile_id)));
        }
        if exists(
          &tx,
          "SELECT 1 FROM course_planning WHERE profile_id = ?1 AND course_code = ?2",
          rusqlite::params![row.profile_id, row.course_code],
        )? {
          return Ok(Err(PlanError::AlreadyPlanned(row.course_code)));
        }
        if let Err(blocked) =
          admissibility(&tx, row.profile_id, &row.course_code)?.into_result(&row.course_code)
        {
          return Ok(Err(blocked));
        }

        let (is_current, is_planned, is_done) = encode_status(row.status);
        tx.execute(
          "INSERT INTO course_planning (
             course_code, sem_code, is_current_course, is_planned_course,
             is_done_course, grade, profile_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            row.course_code,
            row.sem_code,
            is_current,
            is_planned,
            is_done,
            row.grade,
            row.profile_id,
          ],
        )?;
        let course_id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Ok(course_id))
      })
      .await?;

    let course_id = match outcome {
      Ok(id) => id,
      Err(e) => {
        tracing::debug!(course = %input.course_code, profile_id = input.profile_id, error = %e, "add rejected");
        return Err(e.into());
      }
    };

    tracing::info!(
      course = %input.course_code,
      semester = %input.sem_code,
      status = %input.status,
      profile_id = input.profile_id,
      "planned course"
    );

    Ok(PlannedCourse {
      course_id,
      course_code: input.course_code,
      sem_code: input.sem_code,
      status: input.status,
      grade: input.grade,
      profile_id: input.profile_id,
    })
  }

  async fn update_course(
    &self,
    profile_id: i64,
    course_code: &str,
    update: CourseUpdate,
  ) -> Result<PlannedCourse> {
    let code = course_code.to_owned();
    let row = update.clone();
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let course_id: Option<i64> = tx
          .query_row(
            "SELECT course_id FROM course_planning WHERE profile_id = ?1 AND course_code = ?2",
            rusqlite::params![profile_id, code],
            |r| r.get(0),
          )
          .optional()?;
        let Some(course_id) = course_id else {
          return Ok(Err(PlanError::NotFound(code)));
        };
        if !exists(&tx, "SELECT 1 FROM semester WHERE sem_code = ?1", [&row.sem_code])? {
          return Ok(Err(PlanError::UnknownSemester(row.sem_code)));
        }

        let (is_current, is_planned, is_done) = encode_status(row.status);
        tx.execute(
          "UPDATE course_planning
           SET sem_code = ?1, is_current_course = ?2, is_planned_course = ?3,
               is_done_course = ?4, grade = ?5
           WHERE course_id = ?6",
          rusqlite::params![row.sem_code, is_current, is_planned, is_done, row.grade, course_id],
        )?;
        tx.commit()?;
        Ok(Ok(course_id))
      })
      .await?;

    let course_id = match outcome {
      Ok(id) => id,
      Err(e) => {
        tracing::debug!(course = course_code, profile_id, error = %e, "update rejected");
        return Err(e.into());
      }
    };

    tracing::info!(
      course = course_code,
      semester = %update.sem_code,
      status = %update.status,
      profile_id,
      "updated course"
    );

    Ok(PlannedCourse {
      course_id,
      course_code: course_code.to_owned(),
      sem_code: update.sem_code,
      status: update.status,
      grade: update.grade,
      profile_id,
    })
  }

  async fn remove_course(&self, profile_id: i64, course_code: &str) -> Result<()> {
    let code = course_code.to_owned();
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM course_planning WHERE profile_id = ?1 AND course_code = ?2",
          rusqlite::params![profile_id, code],
        )?)
      })
      .await?;

    if removed == 0 {
      tracing::debug!(course = course_code, profile_id, "remove of unplanned course");
      return Err(PlanError::NotFound(course_code.to_owned()).into());
    }

    tracing::info!(course = course_code, profile_id, "removed course");
    Ok(())
  }

  async fn courses_in_semester(
    &self,
    profile_id: i64,
    sem_code: &str,
  ) -> Result<Vec<PlannedCourse>> {
    let sem_code = sem_code.to_owned();
    let raws: Vec<RawPlanned> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM course_planning p
           WHERE p.profile_id = ?1 AND p.sem_code = ?2
           ORDER BY p.course_id",
          RawPlanned::COLUMNS
        );
        let rows = conn
          .prepare(&sql)?
          .query_map(rusqlite::params![profile_id, sem_code], RawPlanned::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawPlanned::into_planned).collect())
  }

  async fn ledger(&self, profile_id: i64) -> Result<Vec<LedgerEntry>> {
    let raws: Vec<RawLedgerEntry> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {}, c.course_credits, s.sem_year, s.sem_term
           FROM course_planning p
           JOIN course   c ON c.course_code = p.course_code
           JOIN semester s ON s.sem_code    = p.sem_code
           WHERE p.profile_id = ?1
           ORDER BY p.course_id",
          RawPlanned::COLUMNS
        );
        let rows = conn
          .prepare(&sql)?
          .query_map([profile_id], RawLedgerEntry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLedgerEntry::into_entry).collect()
  }
}
