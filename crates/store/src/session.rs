use crate::{Flusher, SaveBackend, SaveWriter, Sessions, StoreError};
use setlatro_core::{
    Catalog, Event, EventBus, GameConfig, GameSnapshot, GameState, RunError, SaveSummary,
};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Result of a committed operation: its own value, the state after it and
/// the events it produced.
#[derive(Debug, Clone)]
pub struct Applied<T> {
    pub value: T,
    pub state: GameSnapshot,
    pub events: Vec<Event>,
}

/// Live sessions keyed by id. Operations on one id are serialized by its
/// lock; different ids proceed in parallel.
pub struct SessionStore {
    sessions: Arc<Sessions>,
    catalog: Arc<Catalog>,
    config: Arc<GameConfig>,
    writer: Arc<SaveWriter>,
    flusher: Flusher,
}

impl SessionStore {
    /// Loads every save the backend holds and starts the background writer.
    /// Unreadable or outdated saves are skipped with a warning.
    pub fn open(
        backend: Arc<dyn SaveBackend>,
        catalog: Arc<Catalog>,
        config: Arc<GameConfig>,
    ) -> Result<Self, StoreError> {
        let sessions = Arc::new(Sessions::new());
        for (id, snapshot) in backend.load()? {
            match GameState::restore(snapshot, Arc::clone(&catalog), Arc::clone(&config)) {
                Ok(restored) => {
                    if !restored.dropped.is_empty() {
                        warn!(%id, dropped = ?restored.dropped, "save referenced unknown ids");
                    }
                    sessions.insert(id, Arc::new(Mutex::new(restored.state)));
                }
                Err(err) => warn!(%id, %err, "skipping save"),
            }
        }
        info!(sessions = sessions.len(), "session store opened");
        let writer = Arc::new(SaveWriter::new(Arc::clone(&sessions), backend));
        let flusher = Flusher::spawn(Arc::clone(&writer));
        Ok(Self {
            sessions,
            catalog,
            config,
            writer,
            flusher,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Starts a new run under a fresh id. Without a seed one is drawn from
    /// the thread generator.
    pub fn create(&self, seed: Option<u64>) -> Result<Applied<String>, StoreError> {
        let seed = seed.unwrap_or_else(rand::random);
        let mut events = EventBus::default();
        let state = GameState::new_run(
            Arc::clone(&self.catalog),
            Arc::clone(&self.config),
            seed,
            &mut events,
        )?;
        let id = Uuid::new_v4().to_string();
        let snapshot = state.snapshot();
        self.sessions
            .insert(id.clone(), Arc::new(Mutex::new(state)));
        info!(%id, seed, "run created");
        self.request_flush();
        Ok(Applied {
            value: id,
            state: snapshot,
            events: events.drain().collect(),
        })
    }

    pub fn get(&self, id: &str) -> Result<GameSnapshot, StoreError> {
        let handle = self.handle(id)?;
        let state = handle.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(state.snapshot())
    }

    /// Runs `op` against a working copy of the session. The copy replaces
    /// the live state only when `op` succeeds, so a rejected or faulted
    /// operation leaves the session exactly as it was.
    pub fn update<T, F>(&self, id: &str, op: F) -> Result<Applied<T>, StoreError>
    where
        F: FnOnce(&mut GameState, &mut EventBus) -> Result<T, RunError>,
    {
        let handle = self.handle(id)?;
        let applied = {
            let mut state = handle.lock().unwrap_or_else(PoisonError::into_inner);
            let mut working = state.clone();
            let mut events = EventBus::default();
            let value = op(&mut working, &mut events)?;
            let snapshot = working.snapshot();
            *state = working;
            Applied {
                value,
                state: snapshot,
                events: events.drain().collect(),
            }
        };
        self.request_flush();
        Ok(applied)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        if self.sessions.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!(%id, "session deleted");
        self.request_flush();
        Ok(())
    }

    /// Summaries of every live session, ordered by id.
    pub fn list(&self) -> Vec<SaveSummary> {
        let handles: Vec<_> = self
            .sessions
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        let mut summaries: Vec<SaveSummary> = handles
            .into_iter()
            .map(|(id, handle)| {
                let state = handle.lock().unwrap_or_else(PoisonError::into_inner);
                state.summary(&id)
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Writes every session now, on the calling thread.
    pub fn flush_all(&self) -> Result<(), StoreError> {
        self.writer.write_all()
    }

    fn request_flush(&self) {
        if self.flusher.request() {
            return;
        }
        if let Err(err) = self.flush_all() {
            error!(%err, "failed to write saves");
        }
    }

    fn handle(&self, id: &str) -> Result<Arc<Mutex<GameState>>, StoreError> {
        self.sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
