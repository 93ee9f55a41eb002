//! Pod output formatter

use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

use super::common::{format_uptime, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::runpod::Pod;

/// Serializable pod for structured output (JSON/YAML)
#[derive(Serialize, Debug, PartialEq)]
struct SerializablePod {
    id: String,
    name: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    gpu_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uptime_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssh: Option<String>,
}

impl From<&Pod> for SerializablePod {
    fn from(pod: &Pod) -> Self {
        Self {
            id: pod.id.clone(),
            name: pod.name.clone(),
            status: pod.status_label().to_string(),
            gpu_count: pod.gpu_count,
            uptime_seconds: pod.runtime.as_ref().and_then(|r| r.uptime_in_seconds),
            ssh: ssh_display(pod),
        }
    }
}

/// `ip:port` of the SSH mapping, if any
fn ssh_display(pod: &Pod) -> Option<String> {
    pod.ssh_endpoint()
        .map(|e| format!("{}:{}", e.ip, e.port))
}

/// Output pods in the specified format, marking the active one in tables
pub fn output_pods(pods: &[Pod], active_id: Option<&str>, format: OutputFormat) {
    match format {
        OutputFormat::Table => output_table(pods, active_id),
        OutputFormat::Json => print_json(&to_serializable(pods)),
        OutputFormat::Yaml => print_yaml(&to_serializable(pods)),
    }
}

fn to_serializable(pods: &[Pod]) -> Vec<SerializablePod> {
    pods.iter().map(SerializablePod::from).collect()
}

fn output_table(pods: &[Pod], active_id: Option<&str>) {
    if pods.is_empty() {
        println!("No pods found.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(vec!["", "Name", "ID", "Status", "GPUs", "Uptime", "SSH"]);

    for pod in pods {
        let marker = if active_id == Some(pod.id.as_str()) { "*" } else { "" };
        let gpus = pod.gpu_count.map(|g| g.to_string()).unwrap_or_default();
        let uptime = pod
            .runtime
            .as_ref()
            .and_then(|r| r.uptime_in_seconds)
            .map(format_uptime)
            .unwrap_or_default();
        let ssh = ssh_display(pod).unwrap_or_default();
        table.add_row(vec![
            marker,
            &pod.name,
            &pod.id,
            pod.status_label(),
            &gpus,
            &uptime,
            &ssh,
        ]);
    }

    println!("{table}");
    println!("\nTotal: {} pods", pods.len());
}

/// Print the active pod and the command that reaches it
pub fn output_pod_status(pod: &Pod, ssh_command: Option<&str>) {
    println!("Pod:     {} ({})", pod.name, pod.id);
    println!("Status:  {}", pod.status_label());
    if let Some(gpus) = pod.gpu_count {
        println!("GPUs:    {}", gpus);
    }
    if let Some(uptime) = pod.runtime.as_ref().and_then(|r| r.uptime_in_seconds) {
        println!("Uptime:  {}", format_uptime(uptime));
    }
    match ssh_command {
        Some(cmd) => println!("SSH:     {}", cmd),
        None => println!("SSH:     <not reachable, run 'pod start'>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runpod::test_fixtures::pod_json;

    fn pods() -> Vec<Pod> {
        vec![
            serde_json::from_value(pod_json("p-1", "trainer", true)).unwrap(),
            serde_json::from_value(pod_json("p-2", "idle", false)).unwrap(),
        ]
    }

    #[test]
    fn test_serializable_running_pod() {
        let pods = pods();
        let row = SerializablePod::from(&pods[0]);
        assert_eq!(row.status, "running");
        assert_eq!(row.ssh.as_deref(), Some("213.173.1.5:40123"));
        assert_eq!(row.uptime_seconds, Some(12));
    }

    #[test]
    fn test_serializable_stopped_pod_skips_runtime_fields() {
        let pods = pods();
        let json = serde_json::to_value(SerializablePod::from(&pods[1])).unwrap();
        assert_eq!(json["status"], "EXITED");
        assert!(json.get("ssh").is_none());
        assert!(json.get("uptime_seconds").is_none());
    }

    #[test]
    fn test_output_table_empty() {
        output_table(&[], None);
    }

    #[test]
    fn test_output_all_formats() {
        let pods = pods();
        output_pods(&pods, Some("p-1"), OutputFormat::Table);
        output_pods(&pods, None, OutputFormat::Json);
        output_pods(&pods, None, OutputFormat::Yaml);
    }

    #[test]
    fn test_output_pod_status() {
        let pods = pods();
        output_pod_status(&pods[0], Some("ssh root@213.173.1.5 -p 40123"));
        output_pod_status(&pods[1], None);
    }
}
