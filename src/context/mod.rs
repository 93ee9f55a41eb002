//! Pod context module
//!
//! Tracks which pod commands act on: the `.active_pod` cache, selection of
//! the active pod after a refresh, and bringing that pod up.

mod models;
mod resolve;
mod store;

pub use models::{CachedPod, Context};
pub use resolve::{
    ensure_started, load_cached, load_context, refresh_context, refresh_state, PodSelector,
};
pub use store::PodCache;
