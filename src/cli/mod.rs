//! CLI argument parsing

mod common;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{api, cache, defaults, env};

pub use common::OutputFormat;

/// Pod lifecycle helper
#[derive(Parser, Debug)]
#[command(name = "pod")]
#[command(version)]
#[command(about = "Start, stop and work on a remote RunPod GPU pod", long_about = None)]
#[command(after_help = "ENVIRONMENT:\n  \
        REMOTE_DIR           Working directory on the pod (required)\n  \
        CLOUDFLARE_DEMO_KEY  Passed to the provisioning script (required by 'start')\n  \
        RUNPOD_API_KEY       RunPod API key\n  \
        POD_SSH_KEY          SSH identity file (default: ~/.ssh/id_ed25519 if present)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pod id or name to use instead of the cached/first pod
    #[arg(long)]
    pub pod: Option<String>,

    /// Active pod cache file
    #[arg(long, env = env::CACHE_FILE, default_value = cache::FILE_NAME)]
    pub cache_file: PathBuf,

    /// Seconds between status polls while waiting for the pod
    #[arg(long, default_value_t = defaults::POLL_INTERVAL_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Seconds to wait for the pod to start or stop (0 = wait forever)
    #[arg(long, default_value_t = defaults::WAIT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Seconds a cached SSH endpoint is trusted without asking RunPod
    #[arg(long, default_value_t = cache::MAX_AGE_SECS)]
    pub max_cache_age: u64,

    /// RunPod API key (overrides RUNPOD_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// RunPod API base URL
    #[arg(long, env = env::API_URL, default_value = api::BASE_URL, hide = true)]
    pub api_url: String,

    /// Batch mode: no spinners, no interactive prompts
    #[arg(short = 'b', long, default_value_t = false)]
    pub batch: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,
}

/// Pod operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the pod and provision it
    Start(StartArgs),

    /// Stop the pod
    Stop,

    /// SSH into the pod
    Ssh(PassthroughArgs),

    /// Watches files for changes and syncs them to the pod
    Dev(DevArgs),

    /// Open ranger in the pod
    Ranger,

    /// Pull files from the pod
    Pull(PullArgs),

    /// Show the active pod and how to reach it
    Status,

    /// List all pods on the account
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

impl Command {
    /// Operation name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start(_) => "start",
            Command::Stop => "stop",
            Command::Ssh(_) => "ssh",
            Command::Dev(_) => "dev",
            Command::Ranger => "ranger",
            Command::Pull(_) => "pull",
            Command::Status => "status",
            Command::List(_) => "list",
        }
    }

    /// Whether the pod must be running with SSH reachable before the handler runs
    pub fn requires_started_pod(&self) -> bool {
        matches!(
            self,
            Command::Start(_) | Command::Ssh(_) | Command::Dev(_) | Command::Ranger | Command::Pull(_)
        )
    }

    /// Whether the operation needs REMOTE_DIR
    pub fn requires_remote_dir(&self) -> bool {
        !matches!(self, Command::Status | Command::List(_))
    }
}

/// Arguments for 'start'
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Only bring the pod up, skip the provisioning script
    #[arg(long, default_value_t = false)]
    pub no_provision: bool,

    /// Provisioning script piped to the pod
    #[arg(long, default_value = defaults::PROVISION_SCRIPT)]
    pub script: String,
}

/// Arguments handed straight to ssh
#[derive(Args, Debug)]
pub struct PassthroughArgs {
    /// Extra ssh arguments or a remote command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for 'dev'
#[derive(Args, Debug)]
pub struct DevArgs {
    /// Watch-and-sync script to run locally
    #[arg(long, default_value = defaults::DEV_SCRIPT)]
    pub script: String,

    /// Arguments for the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for 'pull'
#[derive(Args, Debug)]
#[command(after_help = "The remote source is relative to REMOTE_DIR.")]
pub struct PullArgs {
    /// Remote source, relative to REMOTE_DIR
    pub source: String,

    /// Local destination
    pub dest: String,
}

/// Arguments for 'list'
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["pod", "status"]);
        assert_eq!(cli.log_level, defaults::LOG_LEVEL);
        assert_eq!(cli.interval, defaults::POLL_INTERVAL_SECS);
        assert_eq!(cli.timeout, defaults::WAIT_TIMEOUT_SECS);
        assert_eq!(cli.max_cache_age, cache::MAX_AGE_SECS);
        assert!(!cli.batch);
        assert!(cli.pod.is_none());
        assert!(cli.api_key.is_none());
    }

    #[test]
    fn test_start_defaults() {
        let cli = Cli::parse_from(["pod", "start"]);
        match cli.command {
            Command::Start(args) => {
                assert!(!args.no_provision);
                assert_eq!(args.script, defaults::PROVISION_SCRIPT);
            }
            other => panic!("Expected start, got {:?}", other),
        }
    }

    #[test]
    fn test_start_no_provision() {
        let cli = Cli::parse_from(["pod", "start", "--no-provision"]);
        assert!(matches!(cli.command, Command::Start(StartArgs { no_provision: true, .. })));
    }

    #[test]
    fn test_ssh_passes_hyphen_args_through() {
        let cli = Cli::parse_from(["pod", "ssh", "-L", "8888:localhost:8888", "nvidia-smi"]);
        match cli.command {
            Command::Ssh(args) => {
                assert_eq!(args.args, vec!["-L", "8888:localhost:8888", "nvidia-smi"])
            }
            other => panic!("Expected ssh, got {:?}", other),
        }
    }

    #[test]
    fn test_dev_script_and_args() {
        let cli = Cli::parse_from(["pod", "dev", "--script", "tools/sync.sh", "--once", "src"]);
        match cli.command {
            Command::Dev(args) => {
                assert_eq!(args.script, "tools/sync.sh");
                assert_eq!(args.args, vec!["--once", "src"]);
            }
            other => panic!("Expected dev, got {:?}", other),
        }
    }

    #[test]
    fn test_pull_requires_both_paths() {
        assert!(Cli::try_parse_from(["pod", "pull", "outputs"]).is_err());
        let cli = Cli::parse_from(["pod", "pull", "outputs", "./local"]);
        match cli.command {
            Command::Pull(args) => {
                assert_eq!(args.source, "outputs");
                assert_eq!(args.dest, "./local");
            }
            other => panic!("Expected pull, got {:?}", other),
        }
    }

    #[test]
    fn test_list_alias_and_format() {
        let cli = Cli::parse_from(["pod", "ls", "-o", "json"]);
        match cli.command {
            Command::List(args) => assert_eq!(args.output, OutputFormat::Json),
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_interval_must_be_positive() {
        assert!(Cli::try_parse_from(["pod", "--interval", "0", "stop"]).is_err());
    }

    #[test]
    fn test_global_options_before_subcommand() {
        let cli = Cli::parse_from([
            "pod",
            "--pod",
            "trainer",
            "--timeout",
            "0",
            "-b",
            "-l",
            "debug",
            "stop",
        ]);
        assert_eq!(cli.pod, Some("trainer".to_string()));
        assert_eq!(cli.timeout, 0);
        assert!(cli.batch);
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Command::Stop));
    }

    #[test]
    fn test_command_requirements() {
        let start = Cli::parse_from(["pod", "start"]).command;
        assert!(start.requires_started_pod());
        assert!(start.requires_remote_dir());

        let stop = Cli::parse_from(["pod", "stop"]).command;
        assert!(!stop.requires_started_pod());
        assert!(stop.requires_remote_dir());
        assert_eq!(stop.name(), "stop");

        let status = Cli::parse_from(["pod", "status"]).command;
        assert!(!status.requires_started_pod());
        assert!(!status.requires_remote_dir());
    }
}
