//! Command provider adapter.
//!
//! Spawns a bridge executable per request, writes the request as a single
//! JSON document on stdin and takes stdout as the response text. The bridge
//! owns the network transport and any vendor SDK.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::trait_def::{GenerationProvider, ProviderError};
use super::types::GenerationRequest;

/// Provider that delegates each request to an external command.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    command: String,
    args: Vec<String>,
    /// Environment variable that must hold the provider credential.
    api_key_env: Option<String>,
}

impl CommandProvider {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            api_key_env: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Require `var` to be set before any process is spawned.
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn check_credentials(&self) -> Result<(), ProviderError> {
        match &self.api_key_env {
            Some(var) if std::env::var_os(var).is_none_or(|v| v.is_empty()) => {
                Err(ProviderError::MissingCredentials { var: var.clone() })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl GenerationProvider for CommandProvider {
    fn name(&self) -> &str {
        "command"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        self.check_credentials()?;
        let body = serde_json::to_vec(request)?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A deadline that drops this future must not leave a stray process.
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProviderError::Spawn {
                command: self.command.clone(),
                source,
            })?;
        debug!(command = %self.command, pid = ?child.id(), "provider process spawned");

        // Feed stdin while draining stdout and stderr so neither pipe can fill up.
        let stdin = child.stdin.take();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(&body).await {
                Ok(()) => Ok(()),
                // The bridge may exit before reading; its exit status tells the story.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    debug!("provider closed stdin early");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        fed?;
        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(command = %self.command, status = %output.status, "provider exited with failure");
            return Err(ProviderError::Rejected {
                status: output.status.to_string(),
                message,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
