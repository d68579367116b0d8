//! Cursus Testkit: shared fixtures for access-control tests
//!
//! - [`fixtures::OrgFixture`]: a two-RTI organization with multi-campus
//!   programs, direct teacher assignments and a handful of actors
//! - [`strategies`]: proptest strategies over the fixture's resources

#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod fixtures;
pub mod strategies;

pub use fixtures::{actors, missing_resources, token_for, OrgFixture};
