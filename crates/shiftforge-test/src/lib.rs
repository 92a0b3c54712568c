//! Shared test fixtures for ShiftForge crates.
//!
//! This crate provides data builders and proptest strategies for testing.
//! It depends on `shiftforge-core` only, so every engine crate can use it as a
//! dev-dependency.
//!
//! - [`calendar`] - fixed reference dates
//! - [`staff`] - nurse builders and a standard ward team
//! - [`rota`] - shift builders and the weekly shift template
//! - [`scenarios`] - small infeasible cases with a known cause
//! - [`strategies`] - proptest strategies for random small instances
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! shiftforge-test = { workspace = true }
//! ```
//!
//! ```
//! use shiftforge_test::scenarios::sole_nurse_week;
//!
//! let scenario = sole_nurse_week();
//! assert_eq!(scenario.shifts.len(), 7);
//! ```

pub mod calendar;
pub mod rota;
pub mod scenarios;
pub mod staff;
pub mod strategies;

pub use calendar::{at, day};
pub use rota::{shift, week_template};
pub use scenarios::Scenario;
pub use staff::{nurse, ward_team};
