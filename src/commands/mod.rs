//! Command handlers
//!
//! `run_command` validates the environment, loads the active pod, brings it
//! up when the operation needs SSH, and hands off to the handler. The API
//! key is only required once a command has to reach the provider.

mod info;
mod lifecycle;
mod shell;

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use log::debug;

use crate::cli::{Cli, Command};
use crate::config::env;
use crate::context::{
    ensure_started, load_cached, refresh_context, Context, PodCache, PodSelector,
};
use crate::error::{PodError, Result};
use crate::remote::SshCommand;
use crate::runpod::{ApiKeyResolver, RunPodClient, WaitOptions};

/// Environment values the pod operations depend on
#[derive(Debug, Default, Clone)]
pub struct RemoteEnv {
    pub remote_dir: String,
    pub cloudflare_key: Option<String>,
}

/// Shared handles for one invocation
struct Session {
    client: RunPodClient,
    cache: PodCache,
    wait: WaitOptions,
    max_cache_age: Duration,
    remote: RemoteEnv,
}

/// Run the parsed command line
pub async fn run_command(cli: &Cli) -> Result<()> {
    let remote = preflight(&cli.command)?;

    let cache = PodCache::new(cli.cache_file.clone());
    let selector = PodSelector {
        pod: cli.pod.clone(),
        interactive: !cli.batch && std::io::stdin().is_terminal() && std::io::stderr().is_terminal(),
    };

    let cached = match &cli.command {
        Command::List(_) => None,
        _ => load_cached(&cache, &selector)?,
    };
    // status answered from the cache needs no API key
    if let (Command::Status, Some(ctx)) = (&cli.command, &cached) {
        return info::run_status(ctx);
    }

    let api_key = ApiKeyResolver::resolve(cli.api_key.as_deref())?;
    let session = Session {
        client: RunPodClient::with_base_url(api_key, cli.api_url.clone()),
        cache,
        wait: WaitOptions::from_secs(cli.interval, cli.timeout, cli.batch),
        max_cache_age: Duration::from_secs(cli.max_cache_age),
        remote,
    };

    if let Command::List(args) = &cli.command {
        return info::run_list(&session.client, &session.cache, args.output).await;
    }

    let mut ctx = match cached {
        Some(ctx) => ctx,
        None => refresh_context(&session.client, &selector).await?,
    };
    debug!(
        "Running '{}' (needs a started pod: {})",
        cli.command.name(),
        cli.command.requires_started_pod()
    );

    match &cli.command {
        Command::Start(args) => {
            let ssh = require_started(&session, &mut ctx).await?;
            lifecycle::run_start(&ssh, args, &session.remote).await
        }
        Command::Stop => lifecycle::run_stop(&session.client, &session.cache, &ctx, &session.wait).await,
        Command::Ssh(args) => {
            let ssh = require_started(&session, &mut ctx).await?;
            shell::run_ssh(&ssh, &args.args).await
        }
        Command::Dev(args) => {
            let ssh = require_started(&session, &mut ctx).await?;
            shell::run_dev(&ssh, &args.script, &args.args).await
        }
        Command::Ranger => {
            let ssh = require_started(&session, &mut ctx).await?;
            shell::run_ranger(&ssh, &session.remote.remote_dir).await
        }
        Command::Pull(args) => {
            let ssh = require_started(&session, &mut ctx).await?;
            shell::run_pull(&ssh, &session.remote.remote_dir, &args.source, &args.dest).await
        }
        Command::Status => info::run_status(&ctx),
        Command::List(_) => unreachable!("list is handled before the context is loaded"),
    }
}

/// Checks that need neither the network nor the cache
fn preflight(command: &Command) -> Result<RemoteEnv> {
    let mut remote = RemoteEnv::default();
    if command.requires_remote_dir() {
        remote.remote_dir = require_env(env::REMOTE_DIR)?;
    }

    if let Command::Start(args) = command {
        if !args.no_provision {
            remote.cloudflare_key = Some(require_env(env::CLOUDFLARE_DEMO_KEY)?);
            if !Path::new(&args.script).is_file() {
                return Err(PodError::Config(format!(
                    "provisioning script '{}' not found",
                    args.script
                )));
            }
        }
    }
    Ok(remote)
}

/// Read a required, non-empty environment variable
pub fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(PodError::EnvNotSet(name.to_string())),
    }
}

/// Bring the active pod up and record how to reach it
async fn require_started(session: &Session, ctx: &mut Context) -> Result<SshCommand> {
    let endpoint = ensure_started(
        &session.client,
        &session.cache,
        ctx,
        &session.wait,
        session.max_cache_age,
    )
    .await?;

    let ssh = SshCommand::for_endpoint(endpoint);
    session.cache.write_ssh_command(&ssh.to_shell_string())?;
    Ok(ssh)
}
