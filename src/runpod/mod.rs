//! RunPod API client module
//!
//! Talks to the provider's GraphQL API to list, inspect, resume and stop
//! pods, and waits for power transitions to finish.

mod api;
mod client;
mod credentials;
mod models;
mod wait;

pub use client::RunPodClient;
pub use credentials::ApiKeyResolver;
pub use models::{Pod, Port, Runtime, SshEndpoint};
pub use wait::{wait_for_ssh, wait_for_stop, WaitOptions};

#[cfg(test)]
pub(crate) use api::test_fixtures;
