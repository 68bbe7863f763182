use std::fmt::{Debug, Formatter};

use tokio::{
    sync::{
        mpsc::{self, Receiver, Sender},
        oneshot,
    },
    task::JoinHandle,
};

use crate::{
    record::{NewWithdrawal, WithdrawalRecord},
    store::file::FileStore,
    StoreError,
};

const QUEUE_CAPACITY: usize = 32;

type Reply<T> = oneshot::Sender<T>;

pub(crate) enum Command {
    List(Reply<Vec<WithdrawalRecord>>),
    Append(NewWithdrawal, Reply<Result<WithdrawalRecord, StoreError>>),
    Delete(String, Reply<Result<usize, StoreError>>),
}

// card data stays out of the logs
impl Debug for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::List(_) => write!(f, "List"),
            Command::Append(..) => write!(f, "Append"),
            Command::Delete(timestamp, _) => write!(f, "Delete({timestamp})"),
        }
    }
}

/// Single writer in front of a [`FileStore`].
///
/// One task owns the file and runs commands strictly one after another, so no
/// two read-modify-write cycles overlap and no reader sees a half written file.
#[derive(Clone)]
pub(crate) struct WriterQueue {
    sender: Sender<Command>,
}

impl WriterQueue {
    pub(crate) fn spawn(file: FileStore) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel::<Command>(QUEUE_CAPACITY);
        let handle = tokio::spawn(Self::run(file, rx));
        (Self { sender: tx }, handle)
    }

    async fn run(file: FileStore, mut receiver: Receiver<Command>) {
        log::debug!("Writer task started for {}", file.path().display());

        // commands are received until every handle is dropped
        while let Some(command) = receiver.recv().await {
            log::trace!("{command:?}");

            // a dropped reply only means the caller stopped waiting
            match command {
                Command::List(reply) => {
                    let _ = reply.send(file.list().await);
                },
                Command::Append(new, reply) => {
                    let _ = reply.send(file.append(new).await);
                },
                Command::Delete(timestamp, reply) => {
                    let _ = reply.send(file.delete_by_timestamp(&timestamp).await);
                },
            }
        }

        log::debug!("Writer task for {} finished", file.path().display());
    }

    pub(crate) async fn list(&self) -> Result<Vec<WithdrawalRecord>, StoreError> {
        let (reply, response) = oneshot::channel();
        self.sender.send(Command::List(reply)).await?;
        response.await.map_err(|_| StoreError::WriterClosed)
    }

    pub(crate) async fn append(&self, new: NewWithdrawal) -> Result<WithdrawalRecord, StoreError> {
        let (reply, response) = oneshot::channel();
        self.sender.send(Command::Append(new, reply)).await?;
        response.await.map_err(|_| StoreError::WriterClosed)?
    }

    pub(crate) async fn delete_by_timestamp(&self, timestamp: &str) -> Result<usize, StoreError> {
        let (reply, response) = oneshot::channel();
        self.sender.send(Command::Delete(timestamp.to_string(), reply)).await?;
        response.await.map_err(|_| StoreError::WriterClosed)?
    }
}
