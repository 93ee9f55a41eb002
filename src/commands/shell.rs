//! Handlers that hand the terminal to ssh, scp or a local script

use log::debug;

use crate::error::Result;
use crate::remote::{self, SshCommand};

/// Interactive shell on the pod, or a one-off command from `args`
pub async fn run_ssh(ssh: &SshCommand, args: &[String]) -> Result<()> {
    debug!("Opening ssh to {}", ssh.endpoint().destination());
    remote::open_shell(ssh, args).await
}

/// Run the local watch-and-sync script against the pod
pub async fn run_dev(ssh: &SshCommand, script: &str, args: &[String]) -> Result<()> {
    println!("Syncing local changes to the pod, press Ctrl-C to stop...");
    remote::run_dev_script(ssh, script, args).await
}

/// ranger in the remote working directory
pub async fn run_ranger(ssh: &SshCommand, remote_dir: &str) -> Result<()> {
    remote::ranger(ssh, remote_dir).await
}

/// Copy `source` (relative to the remote dir) down to `dest`
pub async fn run_pull(ssh: &SshCommand, remote_dir: &str, source: &str, dest: &str) -> Result<()> {
    println!("Copying files from the pod...");
    remote::pull(ssh, remote_dir, source, dest).await?;
    println!("Copied {} to {}", remote::remote_path(remote_dir, source), dest);
    Ok(())
}
