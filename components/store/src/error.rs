use thiserror::Error;
use tokio::sync::mpsc::error::SendError;

use crate::store::queue::Command;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("StorageWriteError: {0}")]
    StorageWrite(#[from] std::io::Error),
    #[error("EncodeError: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Writer task is not running")]
    WriterClosed,
}

impl From<SendError<Command>> for StoreError {
    fn from(value: SendError<Command>) -> Self {
        log::error!("Failed to hand {:?} to the writer task", value.0);
        StoreError::WriterClosed
    }
}
