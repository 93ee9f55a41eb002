//! Pod data models
//!
//! Field names follow the provider's camelCase GraphQL shape, which is also
//! the shape persisted in the local cache.

use serde::{Deserialize, Serialize};

use crate::config::ssh;
use crate::error::{PodError, Result};

/// A rented pod
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_count: Option<u32>,
    /// Present only while the pod is powered on
    #[serde(default)]
    pub runtime: Option<Runtime>,
}

/// Live network exposure of a running pod
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Runtime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime_in_seconds: Option<u64>,
    #[serde(default)]
    pub ports: Option<Vec<Port>>,
}

/// One internal port exposed on a public address
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub ip: String,
    #[serde(default)]
    pub is_ip_public: bool,
    pub private_port: u16,
    pub public_port: u16,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
}

/// Where to reach sshd on a running pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshEndpoint {
    pub user: String,
    pub ip: String,
    pub port: u16,
}

impl SshEndpoint {
    /// `user@ip` destination for ssh/scp
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.ip)
    }
}

impl Runtime {
    /// Port mappings, empty while the provider has not assigned any
    pub fn ports(&self) -> &[Port] {
        self.ports.as_deref().unwrap_or_default()
    }

    /// Mapping for the internal SSH port, preferring a public address
    pub fn ssh_port(&self) -> Option<&Port> {
        let mut candidates = self
            .ports()
            .iter()
            .filter(|p| p.private_port == ssh::INTERNAL_PORT);
        let first = candidates.next()?;
        if first.is_ip_public {
            return Some(first);
        }
        candidates.find(|p| p.is_ip_public).or(Some(first))
    }
}

impl Pod {
    /// True while the provider reports a runtime
    pub fn is_on(&self) -> bool {
        self.runtime.is_some()
    }

    /// SSH endpoint, if the runtime exposes the internal SSH port
    pub fn ssh_endpoint(&self) -> Option<SshEndpoint> {
        let port = self.runtime.as_ref()?.ssh_port()?;
        Some(SshEndpoint {
            user: ssh::USER.to_string(),
            ip: port.ip.clone(),
            port: port.public_port,
        })
    }

    /// SSH endpoint or `NoRuntime`
    pub fn require_ssh_endpoint(&self) -> Result<SshEndpoint> {
        self.ssh_endpoint().ok_or(PodError::NoRuntime)
    }

    /// Whether the provider is already bringing this pod up
    pub fn is_desired_running(&self) -> bool {
        self.desired_status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(crate::config::api::STATUS_RUNNING))
    }

    /// Status label for display
    pub fn status_label(&self) -> &str {
        if self.ssh_endpoint().is_some() {
            "running"
        } else if self.is_on() {
            "booting"
        } else {
            self.desired_status.as_deref().unwrap_or("stopped")
        }
    }

    /// Check if the pod matches by id or name
    pub fn matches(&self, input: &str) -> bool {
        self.id == input || self.name == input
    }
}

/// GraphQL response envelope
#[derive(Deserialize, Debug)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

/// Single GraphQL error entry
#[derive(Deserialize, Debug)]
pub struct GraphqlError {
    pub message: String,
}

impl<T> GraphqlResponse<T> {
    /// Turn GraphQL-level errors into `PodError::Api`
    pub fn into_data(self, error_context: &str) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(PodError::Api {
                status: 200,
                message: format!("{}: {}", error_context, messages.join("; ")),
            });
        }
        self.data.ok_or_else(|| PodError::Api {
            status: 200,
            message: format!("{}: response had no data", error_context),
        })
    }
}

/// `myself { pods }` payload
#[derive(Deserialize, Debug)]
pub struct MyselfData {
    pub myself: Myself,
}

#[derive(Deserialize, Debug)]
pub struct Myself {
    #[serde(default)]
    pub pods: Vec<Pod>,
}

/// `pod(input)` payload
#[derive(Deserialize, Debug)]
pub struct PodData {
    pub pod: Option<Pod>,
}

/// Result of `podResume` / `podStop`
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PodMutationResult {
    pub id: String,
    #[serde(default)]
    pub desired_status: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PodResumeData {
    pub pod_resume: Option<PodMutationResult>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PodStopData {
    pub pod_stop: Option<PodMutationResult>,
}
