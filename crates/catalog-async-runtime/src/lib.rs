use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

// Re-export types from library crates
pub use catalog_core::CatalogOptions;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum CatalogCommand {
    /// Point the worker at a catalog directory; resets all image state
    LoadCatalog {
        root: PathBuf,
        options: CatalogOptions,
    },
    /// Images for the current view and its neighbours, most urgent first.
    /// A newer request replaces any queued older one.
    PreloadPriority { indices: Vec<u32> },
    /// Idle-time fetch of every image not yet finalized
    PreloadRemaining,
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum CatalogUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    CatalogLoaded {
        content_pages: u32,
    },
    ImageLoaded {
        index: u32,
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    /// Retries exhausted; the image stays failed for this session
    ImageFailed {
        index: u32,
        message: String,
    },
    Error {
        message: String,
    },
}

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Worker is not running")]
    WorkerStopped,
}

/// UI-side ends of the worker channels
pub struct WorkerChannels {
    pub command_tx: mpsc::UnboundedSender<CatalogCommand>,
    pub update_rx: mpsc::UnboundedReceiver<CatalogUpdate>,
}

/// Worker-side ends of the worker channels
pub struct WorkerEndpoints {
    pub command_rx: mpsc::UnboundedReceiver<CatalogCommand>,
    pub update_tx: mpsc::UnboundedSender<CatalogUpdate>,
}

/// Create both channel pairs
pub fn channels() -> (WorkerChannels, WorkerEndpoints) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    (
        WorkerChannels {
            command_tx,
            update_rx,
        },
        WorkerEndpoints {
            command_rx,
            update_tx,
        },
    )
}

impl WorkerChannels {
    pub fn send(&self, command: CatalogCommand) -> Result<(), ChannelError> {
        self.command_tx
            .send(command)
            .map_err(|_| ChannelError::WorkerStopped)
    }

    /// Drain every update that has arrived so far
    pub fn drain_updates(&mut self) -> Vec<CatalogUpdate> {
        let mut updates = Vec::new();
        while let Ok(update) = self.update_rx.try_recv() {
            updates.push(update);
        }
        updates
    }
}
