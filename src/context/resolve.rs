//! Active pod resolution and power-on

use std::time::Duration;

use chrono::Utc;
use log::{debug, info};

use crate::config::defaults;
use crate::error::{PodError, Result};
use crate::runpod::{wait_for_ssh, Pod, RunPodClient, SshEndpoint, WaitOptions};
use crate::ui::select_pod;

use super::models::Context;
use super::store::PodCache;

/// How to choose the active pod when the cache has none
#[derive(Debug, Clone, Default)]
pub struct PodSelector {
    /// Pod id or name requested with `--pod`
    pub pod: Option<String>,
    /// Prompt when several pods exist and none was requested
    pub interactive: bool,
}

/// Load the active pod from the cache, falling back to a provider refresh.
///
/// A cached pod that does not match `--pod` is ignored.
pub async fn load_context(
    client: &RunPodClient,
    cache: &PodCache,
    selector: &PodSelector,
) -> Result<Context> {
    match load_cached(cache, selector)? {
        Some(ctx) => Ok(ctx),
        None => refresh_context(client, selector).await,
    }
}

/// Context from the cache file alone, `None` if there is no usable entry
pub fn load_cached(cache: &PodCache, selector: &PodSelector) -> Result<Option<Context>> {
    let Some(cached) = cache.load()? else {
        return Ok(None);
    };

    let wanted = selector.pod.as_deref();
    if !wanted.is_none_or(|w| cached.pod.matches(w)) {
        debug!(
            "Cached pod '{}' does not match requested '{}'",
            cached.pod.id,
            wanted.unwrap_or_default()
        );
        return Ok(None);
    }

    println!(
        "Loaded active pod from {}: id={}, name={}, on={}",
        cache.path().display(),
        cached.pod.id,
        cached.pod.name,
        cached.pod.is_on()
    );
    Ok(Some(Context::from_cache(cached)))
}

/// Fresh context built from the provider's pod list
pub async fn refresh_context(client: &RunPodClient, selector: &PodSelector) -> Result<Context> {
    eprintln!("No active pod found. Refreshing pod data from RunPod.");
    let mut ctx = Context::default();
    refresh_state(client, &mut ctx, selector).await?;
    Ok(ctx)
}

/// Replace the known pod list and pick the active pod from it
pub async fn refresh_state(
    client: &RunPodClient,
    ctx: &mut Context,
    selector: &PodSelector,
) -> Result<()> {
    let pods = client.list_pods().await?;
    let index = choose_pod(&pods, selector)?;
    let active = pods[index].clone();
    info!("Active pod: {} ({})", active.name, active.id);

    ctx.active_pod = Some(active);
    ctx.saved_at = None;
    ctx.pods = Some(pods);
    Ok(())
}

/// Pick the requested pod, ask the user, or take the first one
fn choose_pod(pods: &[Pod], selector: &PodSelector) -> Result<usize> {
    if pods.is_empty() {
        return Err(PodError::NoPods);
    }

    if let Some(wanted) = &selector.pod {
        return pods
            .iter()
            .position(|p| p.matches(wanted))
            .ok_or_else(|| PodError::PodNotFound(wanted.clone()));
    }

    if pods.len() > 1 && selector.interactive {
        return select_pod(pods);
    }

    Ok(0)
}

/// Make sure the active pod is running and reachable over SSH.
///
/// Trusts a fresh cached endpoint; otherwise asks the provider, resumes the
/// pod if needed and waits for the SSH port. The final state is cached.
pub async fn ensure_started(
    client: &RunPodClient,
    cache: &PodCache,
    ctx: &mut Context,
    wait: &WaitOptions,
    max_cache_age: Duration,
) -> Result<SshEndpoint> {
    if ctx.has_fresh_endpoint(max_cache_age, Utc::now()) {
        debug!("Using cached SSH endpoint");
        return ctx.ssh_endpoint();
    }

    let pod_id = ctx.require_active()?.id.clone();
    let live = match client.get_pod(&pod_id).await? {
        Some(pod) => pod,
        None => {
            cache.clear()?;
            return Err(PodError::PodNotFound(pod_id));
        }
    };

    let live = if live.ssh_endpoint().is_some() {
        live
    } else {
        if live.is_desired_running() {
            println!("Pod '{}' is already starting...", live.name);
        } else {
            println!("Starting pod '{}' ({})...", live.name, live.id);
            client
                .resume_pod(&live.id, live.gpu_count.unwrap_or(defaults::GPU_COUNT))
                .await?;
        }
        let (pod, endpoint) = wait_for_ssh(client, &live.id, wait).await?;
        println!("Pod '{}' is up at {}:{}", pod.name, endpoint.ip, endpoint.port);
        pod
    };

    cache.save(&live)?;
    ctx.saved_at = Some(Utc::now());
    ctx.active_pod = Some(live);
    ctx.ssh_endpoint()
}
