//! Remote access module
//!
//! Everything that touches the pod goes through the local `ssh`/`scp`
//! binaries or a local helper script, with the terminal handed over.

mod exec;
mod ssh;

use log::info;

use crate::config::env;
use crate::error::Result;

pub use exec::Invocation;
pub use ssh::{remote_path, resolve_identity, shell_quote, SshCommand};

/// Interactive shell, or a one-off command when `extra` carries one
pub async fn open_shell(ssh: &SshCommand, extra: &[String]) -> Result<()> {
    let mut args = ssh.ssh_args();
    args.extend(extra.iter().cloned());
    Invocation::new("ssh", args).run().await
}

/// Pipe the provisioning script into `bash -s` on the pod
pub async fn provision(
    ssh: &SshCommand,
    script: &str,
    cloudflare_key: &str,
    remote_dir: &str,
) -> Result<()> {
    info!("Provisioning with {}", script);
    let mut args = ssh.ssh_args();
    args.push("-t".to_string());
    args.push(provision_command(cloudflare_key, remote_dir));
    Invocation::new("ssh", args).stdin_from(script).run().await
}

/// Remote command line that runs the script from stdin with its environment
fn provision_command(cloudflare_key: &str, remote_dir: &str) -> String {
    format!(
        "{}={} {}={} bash -s",
        env::CLOUDFLARE_DEMO_KEY,
        shell_quote(cloudflare_key),
        env::REMOTE_DIR,
        shell_quote(remote_dir)
    )
}

/// File browser in the remote working directory
pub async fn ranger(ssh: &SshCommand, remote_dir: &str) -> Result<()> {
    let mut args = ssh.ssh_args();
    args.push("-t".to_string());
    args.push(format!("ranger {}", shell_quote(remote_dir)));
    Invocation::new("ssh", args).run().await
}

/// Recursive copy from the pod; `source` is relative to the remote dir
pub async fn pull(ssh: &SshCommand, remote_dir: &str, source: &str, dest: &str) -> Result<()> {
    let remote = remote_path(remote_dir, source);
    info!("Pulling {} to {}", remote, dest);
    Invocation::new("scp", ssh.scp_pull_args(&remote, dest))
        .run()
        .await
}

/// Local watch-and-sync script, told how to reach the pod via `SSH_CMD`
pub async fn run_dev_script(ssh: &SshCommand, script: &str, extra: &[String]) -> Result<()> {
    Invocation::new(script, extra.to_vec())
        .env(env::SSH_CMD, &ssh.to_shell_string())
        .run()
        .await
}
