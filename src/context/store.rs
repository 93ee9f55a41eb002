//! Active pod cache file I/O

use chrono::Utc;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::cache as cache_config;
use crate::error::{PodError, Result};
use crate::runpod::Pod;

use super::models::CachedPod;

/// Handles reading and writing the `.active_pod` cache
pub struct PodCache {
    path: PathBuf,
}

impl Default for PodCache {
    fn default() -> Self {
        Self::new(PathBuf::from(cache_config::FILE_NAME))
    }
}

impl PodCache {
    /// Create a cache at the given path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the companion `.ssh_cmd` file, in the same directory
    pub fn ssh_cmd_path(&self) -> PathBuf {
        self.path.with_file_name(cache_config::SSH_CMD_FILE_NAME)
    }

    /// Load the cached pod.
    /// Returns None if the file doesn't exist, errors on corrupt JSON.
    pub fn load(&self) -> Result<Option<CachedPod>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(PodError::Cache(format!(
                    "Failed to read pod cache {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let cached: CachedPod = serde_json::from_str(&content).map_err(|e| {
            PodError::Cache(format!(
                "Failed to parse pod cache {}: {} (delete it to refresh from RunPod)",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(cached))
    }

    /// Save the pod, stamped with the current time.
    /// Uses atomic write (tmp file + rename).
    pub fn save(&self, pod: &Pod) -> Result<()> {
        let cached = CachedPod::new(pod.clone(), Utc::now());
        let json = serde_json::to_string_pretty(&cached)
            .map_err(|e| PodError::Cache(format!("Failed to serialize pod cache: {}", e)))?;

        let tmp_path = self.path.with_file_name(format!(
            "{}.tmp",
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| cache_config::FILE_NAME.to_string())
        ));
        fs::write(&tmp_path, &json).map_err(|e| {
            PodError::Cache(format!(
                "Failed to write temp cache file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            PodError::Cache(format!(
                "Failed to rename temp cache file to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("Saved pod '{}' to {}", pod.id, self.path.display());
        Ok(())
    }

    /// Write the shell-ready SSH command for external scripts
    pub fn write_ssh_command(&self, command: &str) -> Result<()> {
        let path = self.ssh_cmd_path();
        fs::write(&path, command).map_err(|e| {
            PodError::Cache(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Remove the cache and `.ssh_cmd` files; missing files are fine
    pub fn clear(&self) -> Result<()> {
        for path in [self.path.clone(), self.ssh_cmd_path()] {
            match fs::remove_file(&path) {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(PodError::Cache(format!(
                        "Failed to remove {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runpod::{Port, Runtime};
    use tempfile::TempDir;

    fn test_cache(dir: &TempDir) -> PodCache {
        PodCache::new(dir.path().join(".active_pod"))
    }

    fn sample_pod(running: bool) -> Pod {
        Pod {
            id: "p-1".to_string(),
            name: "trainer".to_string(),
            desired_status: Some(if running { "RUNNING" } else { "EXITED" }.to_string()),
            gpu_count: Some(2),
            runtime: running.then(|| Runtime {
                uptime_in_seconds: Some(100),
                ports: Some(vec![
                    Port {
                        ip: "100.65.0.2".to_string(),
                        is_ip_public: false,
                        private_port: 22,
                        public_port: 22,
                        port_type: Some("tcp".to_string()),
                    },
                    Port {
                        ip: "213.173.1.5".to_string(),
                        is_ip_public: true,
                        private_port: 22,
                        public_port: 40123,
                        port_type: Some("tcp".to_string()),
                    },
                ]),
            }),
        }
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(test_cache(&dir).load().unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_json_errors() {
        let dir = TempDir::new().unwrap();
        let cache = test_cache(&dir);
        fs::write(cache.path(), "not valid json!!!").unwrap();
        let err = cache.load().unwrap_err().to_string();
        assert!(err.contains("Failed to parse pod cache"));
    }

    #[test]
    fn test_save_load_roundtrip_running() {
        let dir = TempDir::new().unwrap();
        let cache = test_cache(&dir);
        let pod = sample_pod(true);

        cache.save(&pod).unwrap();
        let loaded = cache.load().unwrap().unwrap();

        assert_eq!(loaded.pod, pod);
        assert!(loaded.saved_at().is_some());
    }

    #[test]
    fn test_save_load_roundtrip_stopped() {
        let dir = TempDir::new().unwrap();
        let cache = test_cache(&dir);
        let pod = sample_pod(false);

        cache.save(&pod).unwrap();
        let loaded = cache.load().unwrap().unwrap();

        assert_eq!(loaded.pod, pod);
        assert!(loaded.pod.runtime.is_none());
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let cache = test_cache(&dir);
        cache.save(&sample_pod(true)).unwrap();

        let mut other = sample_pod(false);
        other.id = "p-2".to_string();
        cache.save(&other).unwrap();

        assert_eq!(cache.load().unwrap().unwrap().pod.id, "p-2");
        assert!(!dir.path().join(".active_pod.tmp").exists());
    }

    #[test]
    fn test_ssh_cmd_path_is_sibling() {
        let cache = PodCache::new(PathBuf::from("/work/project/.active_pod"));
        assert_eq!(
            cache.ssh_cmd_path(),
            PathBuf::from("/work/project/.ssh_cmd")
        );
    }

    #[test]
    fn test_clear_removes_both_files() {
        let dir = TempDir::new().unwrap();
        let cache = test_cache(&dir);
        cache.save(&sample_pod(true)).unwrap();
        cache.write_ssh_command("ssh root@1.2.3.4 -p 22").unwrap();
        assert!(cache.ssh_cmd_path().exists());

        cache.clear().unwrap();

        assert!(!cache.path().exists());
        assert!(!cache.ssh_cmd_path().exists());
    }

    #[test]
    fn test_clear_missing_files_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(test_cache(&dir).clear().is_ok());
    }

    #[test]
    fn test_default_path() {
        assert_eq!(PodCache::default().path(), Path::new(".active_pod"));
    }
}
