//! Text-to-speech

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::{split_command, CapabilityError};

#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), CapabilityError>;
}

/// Speaker backed by a command taking the text as its last argument (espeak, say...)
pub struct CommandSpeaker {
    command: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str) -> Result<(), CapabilityError> {
        let (program, args) =
            split_command(&self.command).ok_or(CapabilityError::Unavailable("speech"))?;

        let status = Command::new(program)
            .args(args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| CapabilityError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CapabilityError::Exit {
                program: program.clone(),
                status,
            });
        }

        Ok(())
    }
}
