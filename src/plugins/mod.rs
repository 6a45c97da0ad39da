//! External capabilities the widget calls into
//!
//! The clipboard and text-to-speech live outside the process. Each is a trait
//! with a default implementation that shells out to a configured command.

pub mod clipboard;
pub mod speech;

pub use clipboard::{Clipboard, CommandClipboard};
pub use speech::{CommandSpeaker, Speaker};

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("{0} is not configured")]
    Unavailable(&'static str),
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },
}

/// Split a configured command into program and arguments
fn split_command(command: &[String]) -> Option<(&String, &[String])> {
    command.split_first().filter(|(program, _)| !program.is_empty())
}
