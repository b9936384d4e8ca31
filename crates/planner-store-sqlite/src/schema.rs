//! SQL schema for the planner's SQLite store.
//!
//! Catalog tables (`school` through `major`) are filled once by the seeding
//! helpers on [`crate::SqliteStore`]; only `profile` and `course_planning`
//! change afterwards.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS school (
    school_code TEXT NOT NULL PRIMARY KEY,
    school_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS department (
    dep_code    TEXT NOT NULL PRIMARY KEY,
    dep_title   TEXT NOT NULL,
    school_code TEXT NOT NULL REFERENCES school(school_code)
);

CREATE TABLE IF NOT EXISTS course (
    course_code           TEXT NOT NULL PRIMARY KEY,
    course_title          TEXT NOT NULL,
    course_description    TEXT,
    course_credits        INTEGER NOT NULL CHECK (course_credits > 0),
    course_classification TEXT,
    dep_code              TEXT NOT NULL REFERENCES department(dep_code),
    course_type           TEXT,
    course_level          TEXT
);

CREATE TABLE IF NOT EXISTS semester (
    sem_code TEXT NOT NULL PRIMARY KEY,   -- e.g. 'FALL2024'
    sem_year INTEGER NOT NULL,
    sem_term TEXT NOT NULL                -- 'FALL' | 'SPRING' | 'SUMMER'
);

CREATE TABLE IF NOT EXISTS profile (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    fname             TEXT NOT NULL,
    lname             TEXT NOT NULL,
    graduation_year   INTEGER NOT NULL,
    starting_year     INTEGER NOT NULL,
    starting_semester TEXT NOT NULL,
    major             TEXT NOT NULL,
    minor             TEXT
);

-- Exactly one status flag is written as 1; older rows may carry any mix.
CREATE TABLE IF NOT EXISTS course_planning (
    course_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    course_code       TEXT NOT NULL REFERENCES course(course_code),
    sem_code          TEXT NOT NULL REFERENCES semester(sem_code),
    is_current_course INTEGER NOT NULL,
    is_planned_course INTEGER NOT NULL,
    is_done_course    INTEGER NOT NULL,
    grade             TEXT,
    profile_id        INTEGER NOT NULL REFERENCES profile(id),
    UNIQUE (profile_id, course_code)
);

CREATE TABLE IF NOT EXISTS course_prereq (
    course_code           TEXT NOT NULL REFERENCES course(course_code),
    prereq                TEXT NOT NULL REFERENCES course(course_code),
    prereq_is_corequisite INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (course_code, prereq)
);

CREATE TABLE IF NOT EXISTS major (
    major_id            INTEGER PRIMARY KEY AUTOINCREMENT,
    major_code          TEXT NOT NULL,
    major_name          TEXT NOT NULL,
    department_id       TEXT NOT NULL REFERENCES department(dep_code),
    credit_requirements INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS planning_profile_idx  ON course_planning(profile_id);
CREATE INDEX IF NOT EXISTS planning_semester_idx ON course_planning(sem_code);

PRAGMA user_version = 1;
";
