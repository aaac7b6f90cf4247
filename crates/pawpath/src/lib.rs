//! Matching and adoption-application workflows for the pawpath back end.

pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod workflows;
