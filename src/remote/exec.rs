//! Local process execution with the terminal handed to the child

use log::debug;
use std::fs::File;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{PodError, Result};

/// A local program invocation
#[derive(Debug, Default)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    /// Feed this file to stdin instead of the terminal
    pub stdin_file: Option<String>,
}

impl Invocation {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
            ..Default::default()
        }
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn stdin_from(mut self, path: &str) -> Self {
        self.stdin_file = Some(path.to_string());
        self
    }

    /// Run to completion with inherited stdout/stderr.
    ///
    /// A non-zero exit becomes `CommandFailed` carrying the child's code.
    pub async fn run(&self) -> Result<()> {
        let stdin = match &self.stdin_file {
            Some(path) => Stdio::from(open_input(path)?),
            None => Stdio::inherit(),
        };

        debug!("Running {} {:?}", self.program, self.args);
        let status = Command::new(&self.program)
            .args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(stdin)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| PodError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        debug!("{} exited with {}", self.program, status);
        if status.success() {
            Ok(())
        } else {
            Err(PodError::CommandFailed {
                program: self.program.clone(),
                code: status.code(),
            })
        }
    }
}

fn open_input(path: &str) -> Result<File> {
    File::open(Path::new(path)).map_err(|e| PodError::Spawn {
        program: path.to_string(),
        message: format!("cannot open input: {}", e),
    })
}
