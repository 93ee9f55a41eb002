//! podctl - Run a remote RunPod GPU pod from the terminal
//!
//! Starts and stops the pod, waits for its SSH port, provisions it and
//! hands the terminal over to `ssh`, `scp` or a local sync script.
//!
//! # Features
//!
//! - Start/stop with polling, timeout and Ctrl-C cancellation
//! - `.active_pod` cache so repeated commands skip the API
//! - Provisioning script piped over SSH
//! - Pod listing as table, JSON or YAML
//!
//! # Example
//!
//! ```bash
//! # Start and provision the pod
//! REMOTE_DIR=/workspace/app CLOUDFLARE_DEMO_KEY=... pod start
//!
//! # Open a shell
//! pod ssh
//!
//! # Copy results back
//! pod pull outputs ./outputs
//!
//! # Stop the pod
//! pod stop
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod remote;
pub mod runpod;
pub mod ui;

pub use cli::{Cli, Command, OutputFormat};
pub use commands::{run_command, RemoteEnv};
pub use context::{CachedPod, Context, PodCache, PodSelector};
pub use error::{PodError, Result};
pub use remote::SshCommand;
pub use runpod::{ApiKeyResolver, Pod, Port, RunPodClient, Runtime, SshEndpoint, WaitOptions};
