//! Command orchestration from controller actions to the backend command queue.

use thiserror::Error;
use tokio::sync::mpsc::{error::TrySendError, Sender};

use crate::commands::BackendCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("UI command queue is full; please retry")]
    QueueFull,
    #[error("Backend command processor disconnected; restart the app and retry")]
    Disconnected,
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), DispatchError> {
    let cmd_name = cmd.name();
    let request = cmd.request();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, %request, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, %request, "ui->backend command queue is full");
            Err(DispatchError::QueueFull)
        }
        Err(TrySendError::Closed(_)) => {
            tracing::error!(command = cmd_name, %request, "backend command processor is gone");
            Err(DispatchError::Disconnected)
        }
    }
}
