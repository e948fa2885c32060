//! Infrastructure errors: application failures and the interactive terminal

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Reading commands from or writing replies to the terminal failed.
    #[error("terminal failed during '{command}': {source}")]
    Terminal {
        command: &'static str,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    /// Error mapper for terminal I/O of `command`, for use with `map_err`.
    pub fn terminal(command: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Terminal { command, source }
    }

    /// The other end went away (closed pipe or truncated input).
    pub fn is_disconnect(&self) -> bool {
        match self {
            Self::Terminal { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::BrokenPipe | io::ErrorKind::UnexpectedEof
            ),
            Self::Application(_) => false,
        }
    }
}
