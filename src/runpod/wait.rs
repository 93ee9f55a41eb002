//! Wait loops for pod power transitions
//!
//! Both loops poll the provider at a fixed interval, give up after an
//! optional deadline and stop early on Ctrl-C.

use std::future::Future;
use std::time::Duration;

use log::{debug, info};
use tokio::time::{sleep, Instant};

use crate::error::{PodError, Result};
use crate::ui::{create_spinner, finish_spinner};

use super::client::RunPodClient;
use super::models::{Pod, SshEndpoint};

/// Polling behaviour shared by the wait loops
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Delay between status queries
    pub interval: Duration,
    /// Give up after this long (`None` waits forever)
    pub timeout: Option<Duration>,
    /// Suppress the spinner
    pub quiet: bool,
}

impl WaitOptions {
    /// Build from CLI seconds; a timeout of 0 disables the deadline
    pub fn from_secs(interval: u64, timeout: u64, quiet: bool) -> Self {
        Self {
            interval: Duration::from_secs(interval),
            timeout: (timeout > 0).then(|| Duration::from_secs(timeout)),
            quiet,
        }
    }
}

/// Poll until the pod's runtime exposes the SSH port.
///
/// A runtime without an SSH mapping is still booting and keeps the loop going.
/// Returns the final pod state together with its endpoint.
pub async fn wait_for_ssh(
    client: &RunPodClient,
    pod_id: &str,
    options: &WaitOptions,
) -> Result<(Pod, SshEndpoint)> {
    let what = format!("pod '{}' to start", pod_id);
    poll(client, pod_id, options, &what, |pod| match pod {
        None => Err(PodError::PodNotFound(pod_id.to_string())),
        Some(pod) => Ok(pod.ssh_endpoint().map(|endpoint| (pod, endpoint))),
    })
    .await
}

/// Poll until the pod's runtime is gone.
///
/// A pod that disappears while stopping counts as stopped.
pub async fn wait_for_stop(
    client: &RunPodClient,
    pod_id: &str,
    options: &WaitOptions,
) -> Result<()> {
    let what = format!("pod '{}' to stop", pod_id);
    poll(client, pod_id, options, &what, |pod| match pod {
        Some(pod) if pod.is_on() => Ok(None),
        _ => Ok(Some(())),
    })
    .await
}

async fn poll<T, F>(
    client: &RunPodClient,
    pod_id: &str,
    options: &WaitOptions,
    what: &str,
    check: F,
) -> Result<T>
where
    F: FnMut(Option<Pod>) -> Result<Option<T>>,
{
    poll_until(client, pod_id, options, what, check, ctrl_c()).await
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        debug!("Ctrl-C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Poll loop that gives up with `Interrupted` once `cancel` resolves.
///
/// `cancel` is armed once, so a signal that arrives while a request is in
/// flight still ends the wait.
async fn poll_until<T, F, C>(
    client: &RunPodClient,
    pod_id: &str,
    options: &WaitOptions,
    what: &str,
    mut check: F,
    cancel: C,
) -> Result<T>
where
    F: FnMut(Option<Pod>) -> Result<Option<T>>,
    C: Future<Output = ()>,
{
    let started = Instant::now();
    let deadline = options.timeout.map(|t| started + t);
    let spinner = create_spinner(&format!("Waiting for {}...", what), options.quiet);
    let mut attempt: u32 = 0;
    tokio::pin!(cancel);

    loop {
        attempt += 1;
        let fetched = tokio::select! {
            result = client.get_pod(pod_id) => result,
            _ = &mut cancel => {
                finish_spinner(spinner, "Interrupted");
                return Err(PodError::Interrupted);
            }
        };
        let pod = match fetched {
            Ok(pod) => pod,
            Err(e) => {
                finish_spinner(spinner, "Failed");
                return Err(e);
            }
        };

        match check(pod) {
            Ok(Some(done)) => {
                info!(
                    "Done waiting for {} after {} polls ({}s)",
                    what,
                    attempt,
                    started.elapsed().as_secs()
                );
                finish_spinner(spinner, "Done");
                return Ok(done);
            }
            Ok(None) => debug!("Poll {}: still waiting for {}", attempt, what),
            Err(e) => {
                finish_spinner(spinner, "Failed");
                return Err(e);
            }
        }

        if let Some(s) = &spinner {
            s.set_message(format!(
                "Waiting for {}... ({}s)",
                what,
                started.elapsed().as_secs()
            ));
        }

        if deadline.is_some_and(|d| Instant::now() + options.interval > d) {
            finish_spinner(spinner, "Timed out");
            return Err(PodError::Timeout {
                waited_secs: started.elapsed().as_secs(),
                what: what.to_string(),
            });
        }

        tokio::select! {
            _ = sleep(options.interval) => {}
            _ = &mut cancel => {
                finish_spinner(spinner, "Interrupted");
                return Err(PodError::Interrupted);
            }
        }
    }
}
