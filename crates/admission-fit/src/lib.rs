//! Admission fit scoring and what-if simulation for secondary school applicants.
//!
//! The [`admissions`] module holds the deterministic engine (score calculator, fit
//! classifier, simulation runner, scenario comparator, improvement planner) together with
//! the reader traits, service facade, and HTTP router that sit around it.

pub mod admissions;
pub mod config;
pub mod error;
pub mod telemetry;
