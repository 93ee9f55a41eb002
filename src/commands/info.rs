//! status / list handlers

use log::debug;

use crate::cli::OutputFormat;
use crate::context::{Context, PodCache};
use crate::error::Result;
use crate::output::{output_pod_status, output_pods};
use crate::remote::SshCommand;
use crate::runpod::RunPodClient;

/// Show the active pod and the command that reaches it
pub fn run_status(ctx: &Context) -> Result<()> {
    let pod = ctx.require_active()?;
    let ssh_command = pod
        .ssh_endpoint()
        .map(|endpoint| SshCommand::for_endpoint(endpoint).to_shell_string());
    output_pod_status(pod, ssh_command.as_deref());
    Ok(())
}

/// List every pod on the account, marking the cached active one
pub async fn run_list(client: &RunPodClient, cache: &PodCache, format: OutputFormat) -> Result<()> {
    let pods = client.list_pods().await?;

    // an unreadable cache only loses the marker
    let active_id = match cache.load() {
        Ok(cached) => cached.map(|c| c.pod.id),
        Err(e) => {
            debug!("Ignoring pod cache: {}", e);
            None
        }
    };

    output_pods(&pods, active_id.as_deref(), format);
    Ok(())
}
