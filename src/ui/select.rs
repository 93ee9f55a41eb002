//! Interactive pod selection

use dialoguer::{theme::ColorfulTheme, Select};
use log::debug;

use crate::error::{PodError, Result};
use crate::runpod::Pod;

/// Prompt the user to pick one of several pods, returning its index
pub fn select_pod(pods: &[Pod]) -> Result<usize> {
    eprintln!("\nMultiple pods found on this account:");

    let items: Vec<String> = pods.iter().map(pod_label).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a pod")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| PodError::Prompt(format!("Failed to select pod: {}", e)))?;

    debug!("User selected pod: {}", pods[selection].id);
    Ok(selection)
}

fn pod_label(pod: &Pod) -> String {
    format!("{} ({}, {})", pod.name, pod.id, pod.status_label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_label() {
        let pod = Pod {
            id: "p-1".to_string(),
            name: "trainer".to_string(),
            desired_status: Some("EXITED".to_string()),
            gpu_count: None,
            runtime: None,
        };
        assert_eq!(pod_label(&pod), "trainer (p-1, EXITED)");
    }
}
