//! Core types and trait definitions for the degree planner.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::PlannerStore`]; everything derived
//! from a student's ledger (GPA, standing, semester sequence) is computed
//! here from plain data.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod ledger;
pub mod prereq;
pub mod profile;
pub mod progress;
pub mod semester;
pub mod sequencer;
pub mod store;

pub use error::{Error, Result};
