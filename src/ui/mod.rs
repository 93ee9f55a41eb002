//! UI utilities for terminal output
//!
//! Progress spinners for wait loops and the interactive pod picker.

mod select;
mod spinner;

pub use select::select_pod;
pub use spinner::{create_spinner, finish_spinner};
