//! Output formatting module
//!
//! Handles different output formats: table, JSON, YAML

mod common;
mod pods;

pub use pods::{output_pod_status, output_pods};
