use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crossterm::{cursor::MoveTo, execute};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to position cursor for artwork: {0}")]
    Cursor(#[source] std::io::Error),

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}")]
    Exit { command: String, status: ExitStatus },
}

/// Puts a bitmap file on the terminal with its top-left corner at cell (`x`, `y`).
pub trait BitmapRenderer {
    fn blit(&mut self, path: &Path, x: u16, y: u16) -> Result<(), RenderError>;
}

/// Hands the bitmap to an external encoder (`img2sixel` by default) that writes
/// straight to our stdout. Blocks until the program exits.
#[derive(Debug, Clone)]
pub struct ExternalBlit {
    command: String,
    args: Vec<String>,
}

impl ExternalBlit {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl BitmapRenderer for ExternalBlit {
    fn blit(&mut self, path: &Path, x: u16, y: u16) -> Result<(), RenderError> {
        let mut stdout = std::io::stdout();
        execute!(stdout, MoveTo(x, y)).map_err(RenderError::Cursor)?;

        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| RenderError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(RenderError::Exit {
                command: self.command.clone(),
                status,
            });
        }
        Ok(())
    }
}
