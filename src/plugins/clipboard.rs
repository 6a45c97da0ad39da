//! System clipboard access

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{split_command, CapabilityError};

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), CapabilityError>;
}

/// Clipboard backed by a command reading stdin (wl-copy, pbcopy, xclip...)
pub struct CommandClipboard {
    command: Vec<String>,
}

impl CommandClipboard {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
        let (program, args) =
            split_command(&self.command).ok_or(CapabilityError::Unavailable("clipboard"))?;

        let spawn_err = |source: std::io::Error| CapabilityError::Spawn {
            program: program.clone(),
            source,
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_err)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(spawn_err)?;
        }

        let status = child.wait().await.map_err(spawn_err)?;
        if !status.success() {
            return Err(CapabilityError::Exit {
                program: program.clone(),
                status,
            });
        }

        Ok(())
    }
}
