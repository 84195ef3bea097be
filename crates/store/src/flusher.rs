use crate::{SaveBackend, Saves, StoreError};
use dashmap::DashMap;
use setlatro_core::GameState;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

pub type Sessions = DashMap<String, Arc<Mutex<GameState>>>;

enum FlushRequest {
    Flush,
    Shutdown,
}

/// Background writer. Requests queued while a write is in progress collapse
/// into a single follow-up write.
pub struct Flusher {
    sender: Sender<FlushRequest>,
    handle: Option<JoinHandle<()>>,
}

/// Snapshots the live sessions and writes them as one step. Writes leave
/// in the order their snapshots were taken, so an older save never lands
/// over a newer one.
pub struct SaveWriter {
    sessions: Arc<Sessions>,
    backend: Arc<dyn SaveBackend>,
    lock: Mutex<()>,
}

impl SaveWriter {
    pub fn new(sessions: Arc<Sessions>, backend: Arc<dyn SaveBackend>) -> Self {
        Self {
            sessions,
            backend,
            lock: Mutex::new(()),
        }
    }

    pub fn write_all(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.backend.save(&collect_snapshots(&self.sessions))
    }
}

impl Flusher {
    pub fn spawn(writer: Arc<SaveWriter>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("setlatro-flusher".to_string())
            .spawn(move || run(receiver, &writer))
            .map_err(|err| error!(%err, "could not start flusher thread; saves run inline"))
            .ok();
        Self { sender, handle }
    }

    /// Queues a write. Falls back to reporting failure when the writer is gone.
    pub fn request(&self) -> bool {
        self.handle.is_some() && self.sender.send(FlushRequest::Flush).is_ok()
    }

    /// Stops the writer after one last write.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.send(FlushRequest::Shutdown);
            if handle.join().is_err() {
                error!("flusher thread panicked");
            }
        }
    }
}

impl Drop for Flusher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(receiver: Receiver<FlushRequest>, writer: &SaveWriter) {
    while let Ok(request) = receiver.recv() {
        let mut stop = matches!(request, FlushRequest::Shutdown);
        let mut coalesced = 0usize;
        while let Ok(next) = receiver.try_recv() {
            coalesced += 1;
            stop |= matches!(next, FlushRequest::Shutdown);
        }
        debug!(coalesced, "writing saves");
        if let Err(err) = writer.write_all() {
            error!(%err, "failed to write saves");
        }
        if stop {
            break;
        }
    }
}

pub fn collect_snapshots(sessions: &Sessions) -> Saves {
    let handles: Vec<(String, Arc<Mutex<GameState>>)> = sessions
        .iter()
        .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
        .collect();
    handles
        .into_iter()
        .map(|(id, handle)| {
            let state = handle.lock().unwrap_or_else(PoisonError::into_inner);
            (id, state.snapshot())
        })
        .collect()
}
