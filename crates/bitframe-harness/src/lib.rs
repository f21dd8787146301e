//! Test harness for the bitframe protocol.
//!
//! Sample component definitions exercising every field kind and several
//! schema versions, plus proptest strategies for generating values, so
//! integration tests and fuzz targets share one vocabulary instead of each
//! inventing throwaway schemas.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod components;
pub mod strategies;

pub use components::{TELEMETRY_SCHEMA, TRANSFORM_SCHEMA, Telemetry, Transform};
