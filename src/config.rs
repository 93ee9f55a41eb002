/// Configuration constants for the RunPod API
pub mod api {
    /// Default GraphQL endpoint
    pub const BASE_URL: &str = "https://api.runpod.io";

    /// GraphQL path appended to the base URL
    pub const GRAPHQL_PATH: &str = "/graphql";

    /// Pod status the provider reports for a pod that should be running
    pub const STATUS_RUNNING: &str = "RUNNING";
}

/// Environment variable names
pub mod env {
    /// Remote working directory on the pod
    pub const REMOTE_DIR: &str = "REMOTE_DIR";

    /// Key forwarded to the provisioning script
    pub const CLOUDFLARE_DEMO_KEY: &str = "CLOUDFLARE_DEMO_KEY";

    /// Provider API key
    pub const API_KEY: &str = "RUNPOD_API_KEY";

    /// Provider API URL override
    pub const API_URL: &str = "POD_API_URL";

    /// Cache file override
    pub const CACHE_FILE: &str = "POD_CACHE_FILE";

    /// SSH identity file override
    pub const SSH_KEY: &str = "POD_SSH_KEY";

    /// Variable carrying the SSH command into the dev script
    pub const SSH_CMD: &str = "SSH_CMD";
}

/// Local cache files
pub mod cache {
    /// Active pod cache, relative to the working directory
    pub const FILE_NAME: &str = ".active_pod";

    /// Shell-ready SSH command, written next to the cache file
    pub const SSH_CMD_FILE_NAME: &str = ".ssh_cmd";

    /// Seconds a cached runtime is trusted without asking the provider
    pub const MAX_AGE_SECS: u64 = 3600;
}

/// SSH connection settings
pub mod ssh {
    /// Port sshd listens on inside the pod
    pub const INTERNAL_PORT: u16 = 22;

    /// Login user on RunPod images
    pub const USER: &str = "root";

    /// Options for endpoints whose host key changes on every start
    pub const OPTIONS: &[&str] = &[
        "-o",
        "StrictHostKeyChecking=no",
        "-o",
        "UserKnownHostsFile=/dev/null",
    ];

    /// Identity used when present and no override is given (relative to HOME)
    pub const DEFAULT_KEY: &str = ".ssh/id_ed25519";
}

/// Default values for CLI
pub mod defaults {
    /// Seconds between provider status polls
    pub const POLL_INTERVAL_SECS: u64 = 5;

    /// Seconds before a wait loop gives up (0 = never)
    pub const WAIT_TIMEOUT_SECS: u64 = 600;

    /// Provisioning script piped into the pod by `start`
    pub const PROVISION_SCRIPT: &str = "pod_config/provision.sh";

    /// File watch-and-sync script run by `dev`
    pub const DEV_SCRIPT: &str = "pod/dev.sh";

    /// GPU count used when resuming a pod that does not report one
    pub const GPU_COUNT: u32 = 1;

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
