//! SSH and SCP argument construction

use log::debug;
use std::path::PathBuf;

use crate::config::{env, ssh};
use crate::runpod::SshEndpoint;

/// How to reach a pod with the local ssh/scp clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommand {
    endpoint: SshEndpoint,
    identity: Option<PathBuf>,
}

impl SshCommand {
    /// Build for an endpoint, optionally with an identity file
    pub fn new(endpoint: SshEndpoint, identity: Option<PathBuf>) -> Self {
        Self { endpoint, identity }
    }

    /// Build with the identity from `resolve_identity`
    pub fn for_endpoint(endpoint: SshEndpoint) -> Self {
        Self::new(endpoint, resolve_identity())
    }

    pub fn endpoint(&self) -> &SshEndpoint {
        &self.endpoint
    }

    /// Options shared by ssh and scp (everything but the port flag)
    fn common_options(&self) -> Vec<String> {
        let mut args: Vec<String> = ssh::OPTIONS.iter().map(|s| s.to_string()).collect();
        if let Some(identity) = &self.identity {
            args.push("-i".to_string());
            args.push(identity.display().to_string());
        }
        args
    }

    /// Arguments for `ssh`, without a trailing remote command
    pub fn ssh_args(&self) -> Vec<String> {
        let mut args = vec![
            self.endpoint.destination(),
            "-p".to_string(),
            self.endpoint.port.to_string(),
        ];
        args.extend(self.common_options());
        args
    }

    /// Arguments for `scp -r` copying a remote path to a local one
    pub fn scp_pull_args(&self, remote_path: &str, local_path: &str) -> Vec<String> {
        let mut args = vec![
            "-r".to_string(),
            "-P".to_string(),
            self.endpoint.port.to_string(),
        ];
        args.extend(self.common_options());
        args.push(format!("{}:{}", self.endpoint.destination(), remote_path));
        args.push(local_path.to_string());
        args
    }

    /// The ssh invocation as a single shell-ready string
    pub fn to_shell_string(&self) -> String {
        std::iter::once("ssh".to_string())
            .chain(self.ssh_args().iter().map(|a| shell_quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Identity file: `POD_SSH_KEY` if set, else `~/.ssh/id_ed25519` if it exists
pub fn resolve_identity() -> Option<PathBuf> {
    if let Ok(key) = std::env::var(env::SSH_KEY) {
        if !key.is_empty() {
            debug!("Using SSH key from {}: {}", env::SSH_KEY, key);
            return Some(PathBuf::from(key));
        }
    }

    let default_key = dirs::home_dir()?.join(ssh::DEFAULT_KEY);
    if default_key.exists() {
        debug!("Using default SSH key {}", default_key.display());
        Some(default_key)
    } else {
        None
    }
}

/// Quote a word for POSIX sh; safe words pass through untouched
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Join a path below the remote working directory
pub fn remote_path(remote_dir: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        remote_dir.trim_end_matches('/'),
        relative.trim_start_matches("./")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> SshEndpoint {
        SshEndpoint {
            user: "root".to_string(),
            ip: "213.173.1.5".to_string(),
            port: 40123,
        }
    }

    #[test]
    fn test_ssh_args_without_identity() {
        let cmd = SshCommand::new(endpoint(), None);
        assert_eq!(
            cmd.ssh_args(),
            vec![
                "root@213.173.1.5",
                "-p",
                "40123",
                "-o",
                "StrictHostKeyChecking=no",
                "-o",
                "UserKnownHostsFile=/dev/null",
            ]
        );
    }

    #[test]
    fn test_ssh_args_with_identity() {
        let cmd = SshCommand::new(endpoint(), Some(PathBuf::from("/home/me/.ssh/pod")));
        let args = cmd.ssh_args();
        assert_eq!(&args[args.len() - 2..], ["-i", "/home/me/.ssh/pod"]);
    }

    #[test]
    fn test_scp_pull_args() {
        let cmd = SshCommand::new(endpoint(), None);
        let args = cmd.scp_pull_args("/workspace/out", "./out");
        assert_eq!(&args[..3], ["-r", "-P", "40123"]);
        assert_eq!(
            &args[args.len() - 2..],
            ["root@213.173.1.5:/workspace/out", "./out"]
        );
        assert!(!args.contains(&"-p".to_string()));
    }

    #[test]
    fn test_to_shell_string() {
        let cmd = SshCommand::new(endpoint(), Some(PathBuf::from("/keys/my key")));
        assert_eq!(
            cmd.to_shell_string(),
            "ssh root@213.173.1.5 -p 40123 -o StrictHostKeyChecking=no \
             -o UserKnownHostsFile=/dev/null -i '/keys/my key'"
        );
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain-word_1.txt"), "plain-word_1.txt");
        assert_eq!(shell_quote("two words"), "'two words'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
    }

    #[test]
    fn test_remote_path() {
        assert_eq!(remote_path("/workspace", "out"), "/workspace/out");
        assert_eq!(remote_path("/workspace/", "./out"), "/workspace/out");
    }
}
