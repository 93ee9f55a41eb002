use std::fmt;

/// Custom error type for pod operations
#[derive(Debug)]
pub enum PodError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// API key not found in any source
    ApiKeyNotFound(String),
    /// Required environment variable is missing or empty
    EnvNotSet(String),
    /// Account has no pods at all
    NoPods,
    /// Pod with the given id or name does not exist
    PodNotFound(String),
    /// Pod is not powered on (no runtime)
    NoRuntime,
    /// Failed to read, parse or write the local cache
    Cache(String),
    /// Local setup the command needs is missing or invalid
    Config(String),
    /// JSON parsing error
    Json(String),
    /// Wait loop exceeded its deadline
    Timeout { waited_secs: u64, what: String },
    /// Wait loop cancelled with Ctrl-C
    Interrupted,
    /// Interactive prompt failed
    Prompt(String),
    /// Local program could not be started
    Spawn { program: String, message: String },
    /// Local program exited unsuccessfully
    CommandFailed { program: String, code: Option<i32> },
}

impl PodError {
    /// Process exit code for this error.
    ///
    /// A child that exited with a code passes it through; everything else is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            PodError::CommandFailed {
                code: Some(code), ..
            } if (1..=255).contains(code) => *code as u8,
            _ => 1,
        }
    }
}

impl fmt::Display for PodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PodError::Http(e) => write!(f, "HTTP request failed: {}", e),
            PodError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            PodError::ApiKeyNotFound(msg) => write!(f, "{}", msg),
            PodError::EnvNotSet(name) => write!(f, "{} is not set. Exiting.", name),
            PodError::NoPods => write!(f, "No pods found."),
            PodError::PodNotFound(pod) => write!(f, "Pod '{}' not found", pod),
            PodError::NoRuntime => write!(f, "No active pod found."),
            PodError::Cache(msg) => write!(f, "{}", msg),
            PodError::Config(msg) => write!(f, "Configuration error: {}", msg),
            PodError::Json(msg) => write!(f, "JSON error: {}", msg),
            PodError::Timeout { waited_secs, what } => {
                write!(f, "Timed out after {}s waiting for {}", waited_secs, what)
            }
            PodError::Interrupted => write!(f, "Interrupted"),
            PodError::Prompt(msg) => write!(f, "{}", msg),
            PodError::Spawn { program, message } => {
                write!(f, "Failed to run '{}': {}", program, message)
            }
            PodError::CommandFailed { program, code } => match code {
                Some(code) => write!(f, "'{}' exited with status {}", program, code),
                None => write!(f, "'{}' was terminated by a signal", program),
            },
        }
    }
}

impl std::error::Error for PodError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PodError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PodError {
    fn from(err: reqwest::Error) -> Self {
        PodError::Http(err)
    }
}

impl From<serde_json::Error> for PodError {
    fn from(err: serde_json::Error) -> Self {
        PodError::Json(err.to_string())
    }
}

impl From<std::io::Error> for PodError {
    fn from(err: std::io::Error) -> Self {
        PodError::Cache(err.to_string())
    }
}

/// Result type alias for pod operations
pub type Result<T> = std::result::Result<T, PodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_not_set_display() {
        let err = PodError::EnvNotSet("REMOTE_DIR".to_string());
        assert_eq!(err.to_string(), "REMOTE_DIR is not set. Exiting.");
    }

    #[test]
    fn test_api_error_display() {
        let err = PodError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PodError>();
    }

    #[test]
    fn test_config_display() {
        let err = PodError::Config("provisioning script 'setup.sh' not found".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: provisioning script 'setup.sh' not found"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_timeout_display() {
        let err = PodError::Timeout {
            waited_secs: 600,
            what: "pod abc to start".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 600s waiting for pod abc to start"
        );
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        assert_eq!(PodError::NoPods.exit_code(), 1);
        assert_eq!(PodError::EnvNotSet("X".to_string()).exit_code(), 1);
        assert_eq!(PodError::Interrupted.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_propagates_child_status() {
        let err = PodError::CommandFailed {
            program: "ssh".to_string(),
            code: Some(255),
        };
        assert_eq!(err.exit_code(), 255);
        assert!(err.to_string().contains("255"));
    }

    #[test]
    fn test_exit_code_signal_is_one() {
        let err = PodError::CommandFailed {
            program: "scp".to_string(),
            code: None,
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PodError = json_err.into();
        match err {
            PodError::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected PodError::Json"),
        }
    }

    #[test]
    fn test_error_source_none_for_non_http() {
        use std::error::Error;
        let err = PodError::PodNotFound("p-1".to_string());
        assert!(err.source().is_none());
    }
}
