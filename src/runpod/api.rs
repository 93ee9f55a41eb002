//! Pod API operations

use log::debug;
use serde_json::json;

use crate::error::{PodError, Result};

use super::client::RunPodClient;
use super::models::{MyselfData, Pod, PodData, PodResumeData, PodStopData};

/// Fields fetched for every pod
const POD_FIELDS: &str = "id name desiredStatus gpuCount \
    runtime { uptimeInSeconds ports { ip isIpPublic privatePort publicPort type } }";

impl RunPodClient {
    /// List every pod on the account
    pub async fn list_pods(&self) -> Result<Vec<Pod>> {
        let query = format!("query Pods {{ myself {{ pods {{ {} }} }} }}", POD_FIELDS);
        let data: MyselfData = self
            .graphql(&query, json!({}), "Failed to fetch pods")
            .await?;

        debug!("Fetched {} pods", data.myself.pods.len());
        Ok(data.myself.pods)
    }

    /// Get a single pod by id, `None` if it no longer exists
    pub async fn get_pod(&self, pod_id: &str) -> Result<Option<Pod>> {
        let query = format!(
            "query Pod($input: PodFilter) {{ pod(input: $input) {{ {} }} }}",
            POD_FIELDS
        );
        let data: PodData = self
            .graphql(
                &query,
                json!({ "input": { "podId": pod_id } }),
                &format!("Failed to fetch pod '{}'", pod_id),
            )
            .await?;

        debug!(
            "Pod '{}': {}",
            pod_id,
            data.pod.as_ref().map_or("missing", |p| p.status_label())
        );
        Ok(data.pod)
    }

    /// Request a stopped pod to power on
    pub async fn resume_pod(&self, pod_id: &str, gpu_count: u32) -> Result<()> {
        let query = "mutation PodResume($input: PodResumeInput!) { \
                     podResume(input: $input) { id desiredStatus } }";
        let data: PodResumeData = self
            .graphql(
                query,
                json!({ "input": { "podId": pod_id, "gpuCount": gpu_count } }),
                &format!("Failed to start pod '{}'", pod_id),
            )
            .await?;

        let result = data
            .pod_resume
            .ok_or_else(|| PodError::PodNotFound(pod_id.to_string()))?;
        debug!(
            "Resume requested for '{}', desired status {:?}",
            result.id, result.desired_status
        );
        Ok(())
    }

    /// Request a running pod to power off
    pub async fn stop_pod(&self, pod_id: &str) -> Result<()> {
        let query = "mutation PodStop($input: PodStopInput!) { \
                     podStop(input: $input) { id desiredStatus } }";
        let data: PodStopData = self
            .graphql(
                query,
                json!({ "input": { "podId": pod_id } }),
                &format!("Failed to stop pod '{}'", pod_id),
            )
            .await?;

        let result = data
            .pod_stop
            .ok_or_else(|| PodError::PodNotFound(pod_id.to_string()))?;
        debug!(
            "Stop requested for '{}', desired status {:?}",
            result.id, result.desired_status
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use serde_json::{json, Value};

    /// Pod JSON as the provider returns it, with or without an SSH runtime
    pub fn pod_json(id: &str, name: &str, running: bool) -> Value {
        let runtime = if running {
            json!({
                "uptimeInSeconds": 12,
                "ports": [
                    {"ip": "213.173.1.5", "isIpPublic": true, "privatePort": 22, "publicPort": 40123, "type": "tcp"}
                ]
            })
        } else {
            Value::Null
        };
        json!({
            "id": id,
            "name": name,
            "desiredStatus": if running { "RUNNING" } else { "EXITED" },
            "gpuCount": 1,
            "runtime": runtime
        })
    }

    pub fn pod_response(id: &str, running: bool) -> Value {
        json!({ "data": { "pod": pod_json(id, "trainer", running) } })
    }
}
