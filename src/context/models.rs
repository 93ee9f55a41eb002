//! Pod context data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PodError, Result};
use crate::runpod::{Pod, SshEndpoint};

/// Known pods and the one commands act on
#[derive(Debug, Default, Clone)]
pub struct Context {
    /// Every pod on the account, `None` until refreshed from the provider
    pub pods: Option<Vec<Pod>>,
    /// Pod selected as active
    pub active_pod: Option<Pod>,
    /// When the active pod was written to the cache, if it came from there
    pub saved_at: Option<DateTime<Utc>>,
}

impl Context {
    /// Context seeded from the cache file
    pub fn from_cache(cached: CachedPod) -> Self {
        let saved_at = cached.saved_at();
        Self {
            pods: None,
            active_pod: Some(cached.pod),
            saved_at,
        }
    }

    /// First pod from the last refresh
    pub fn first_pod(&self) -> Option<&Pod> {
        self.pods.as_ref().and_then(|pods| pods.first())
    }

    /// Active pod or `NoRuntime`
    pub fn require_active(&self) -> Result<&Pod> {
        self.active_pod.as_ref().ok_or(PodError::NoRuntime)
    }

    /// SSH endpoint of the active pod
    pub fn ssh_endpoint(&self) -> Result<SshEndpoint> {
        self.require_active()?.require_ssh_endpoint()
    }

    /// Whether the cached runtime can be used without asking the provider
    pub fn has_fresh_endpoint(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        let Some(pod) = &self.active_pod else {
            return false;
        };
        let Some(saved_at) = self.saved_at else {
            return false;
        };
        let age = now.signed_duration_since(saved_at);
        // to_std() rejects negative ages, so a clock jump backwards is stale
        pod.ssh_endpoint().is_some() && age.to_std().is_ok_and(|age| age <= max_age)
    }
}

/// Contents of the `.active_pod` file
///
/// The pod is stored in the provider's own shape; `savedAt` sits next to its
/// fields so a bare pod JSON still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedPod {
    #[serde(flatten)]
    pub pod: Pod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl CachedPod {
    /// Stamp a pod with the given save time
    pub fn new(pod: Pod, now: DateTime<Utc>) -> Self {
        Self {
            pod,
            saved_at: Some(now.to_rfc3339()),
        }
    }

    /// Parsed save time, `None` if missing or malformed
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}
