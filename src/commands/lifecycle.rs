//! start / stop handlers

use log::info;

use crate::cli::StartArgs;
use crate::config::env;
use crate::context::{Context, PodCache};
use crate::error::{PodError, Result};
use crate::remote::{self, SshCommand};
use crate::runpod::{wait_for_stop, RunPodClient, WaitOptions};

use super::RemoteEnv;

const CLOUDFLARED_NOTICE: &str = "cloudflared is still running in the background.
Run 'supervisorctl stop cloudflared' to stop it.
Run 'supervisorctl start cloudflared' to start it.
Run 'supervisorctl restart cloudflared' to restart it.";

/// Provision the (already running) pod
pub async fn run_start(ssh: &SshCommand, args: &StartArgs, remote: &RemoteEnv) -> Result<()> {
    if args.no_provision {
        println!("Pod is up. Connect with: {}", ssh.to_shell_string());
        return Ok(());
    }

    let key = remote
        .cloudflare_key
        .as_deref()
        .ok_or_else(|| PodError::EnvNotSet(env::CLOUDFLARE_DEMO_KEY.to_string()))?;

    println!("Provisioning the pod...");
    remote::provision(ssh, &args.script, key, &remote.remote_dir).await?;
    println!("Pod provisioned.");
    println!();
    println!("{}", CLOUDFLARED_NOTICE);
    Ok(())
}

/// Stop the active pod, wait for its runtime to go away and forget it
pub async fn run_stop(
    client: &RunPodClient,
    cache: &PodCache,
    ctx: &Context,
    wait: &WaitOptions,
) -> Result<()> {
    let pod_id = ctx.require_active()?.id.clone();

    match client.get_pod(&pod_id).await? {
        Some(pod) if pod.is_on() || pod.is_desired_running() => {
            println!("Stopping pod '{}' ({})...", pod.name, pod.id);
            client.stop_pod(&pod.id).await?;
            wait_for_stop(client, &pod.id, wait).await?;
            info!("Pod {} stopped", pod.id);
            println!("Pod '{}' stopped.", pod.name);
        }
        Some(pod) => println!("Pod '{}' is already stopped.", pod.name),
        None => println!("Pod '{}' no longer exists.", pod_id),
    }

    cache.clear()
}
