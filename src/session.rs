// sprinkler-console/src/session.rs

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::document::{Draft, DraftEvent};
use crate::error::{Error, Result};
use crate::store::ConfigStore;

/// Connection and edit status of a session, as the rendering layer sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// True once the first load has succeeded; never drops back to false.
    pub connected: bool,
    /// True while local edits have not been confirmed written.
    pub dirty: bool,
    /// True while a commit is on the wire.
    pub pending_write: bool,
}

/// One coherent view of the session: the current draft plus its state.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub document: Draft,
    pub state: SessionState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Load,
    Commit,
}

struct Inner {
    draft: Draft,
    connected: bool,
    dirty: bool,
    in_flight: Option<Pending>,
    // Bumped on every mutation; lets a finished commit tell whether the
    // draft it wrote is still the draft it sees.
    revision: u64,
}

impl Inner {
    fn check_idle(&self) -> Result<()> {
        match self.in_flight {
            Some(Pending::Commit) => Err(Error::WriteInFlight),
            Some(Pending::Load) => Err(Error::LoadInFlight),
            None => Ok(()),
        }
    }

    fn state(&self) -> SessionState {
        SessionState {
            connected: self.connected,
            dirty: self.dirty,
            pending_write: self.in_flight == Some(Pending::Commit),
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { document: self.draft.clone(), state: self.state() }
    }
}

/// Single authoritative view of the remote configuration document.
///
/// The session owns the editable draft, funnels every read and write through
/// the `ConfigStore` boundary, and broadcasts a fresh `Snapshot` after each
/// visible change so renderers re-draw instead of reaching in. Loads and
/// commits never overlap: whichever transfer is already in flight wins and
/// the new call is rejected with a typed error.
#[derive(Clone)]
pub struct ConfigSession {
    store: Arc<dyn ConfigStore>,
    inner: Arc<Mutex<Inner>>,
    tx: broadcast::Sender<Snapshot>,
}

impl ConfigSession {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            inner: Arc::new(Mutex::new(Inner {
                draft: Draft::default(),
                connected: false,
                dirty: false,
                in_flight: None,
                revision: 0,
            })),
            tx: broadcast::channel(64).0,
        }
    }

    /// Fetches the remote document and replaces the draft with it.
    ///
    /// On success the session is connected and clean; any edits made before
    /// the first load are replaced along with the rest of the draft. On
    /// failure the previous draft and state stay untouched; retrying is the
    /// caller's call.
    pub async fn load(&self) -> Result<Snapshot> {
        {
            let mut inner = self.inner.lock();
            inner.check_idle()?;
            inner.in_flight = Some(Pending::Load);
        }
        let fetched = self.store.get().await;
        let snapshot = {
            let mut inner = self.inner.lock();
            inner.in_flight = None;
            let document = match fetched {
                Ok(document) => document,
                Err(err) => {
                    warn!("load failed: {err}");
                    return Err(err);
                }
            };
            inner.draft = Draft::from_wire(&document);
            inner.connected = true;
            inner.dirty = false;
            let snapshot = inner.snapshot();
            let _ = self.tx.send(snapshot.clone());
            snapshot
        };
        info!(
            "configuration loaded ({} scheduled events)",
            snapshot.document.schedule.events.len()
        );
        Ok(snapshot)
    }

    /// Applies an edit to the live draft and marks the session dirty.
    /// Never touches the network.
    pub fn mutate<F>(&self, edit: F)
    where
        F: FnOnce(&mut Draft),
    {
        let mut inner = self.inner.lock();
        edit(&mut inner.draft);
        inner.dirty = true;
        inner.revision += 1;
        let _ = self.tx.send(inner.snapshot());
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.mutate(|draft| draft.enabled = enabled);
    }

    pub fn set_overwrite(&self, overwrite: bool) {
        self.mutate(|draft| draft.overwrite = overwrite);
    }

    /// Appends a schedule event with clock-string times. The strings are not
    /// validated here; commit-time parsing is where bad input surfaces.
    pub fn add_event(&self, from: impl Into<String>, to: impl Into<String>) {
        let event = DraftEvent::new(from, to);
        self.mutate(|draft| draft.schedule.events.push(event));
    }

    /// Removes the event at `index` in the current display order. An index
    /// past the end is a typed error, not a silent no-op.
    pub fn remove_event(&self, index: usize) -> Result<()> {
        let mut inner = self.inner.lock();
        if index >= inner.draft.schedule.events.len() {
            return Err(Error::NoSuchEvent(index));
        }
        inner.draft.schedule.events.remove(index);
        inner.dirty = true;
        inner.revision += 1;
        let _ = self.tx.send(inner.snapshot());
        Ok(())
    }

    /// Writes the current draft to the store in one round trip.
    ///
    /// Rejected until the first load has succeeded: an unloaded draft is a
    /// placeholder, not the backend's document. The draft is parsed into an
    /// independent wire document up front, so an edit arriving while the
    /// write is on the wire touches only the live draft and rides along with
    /// the next commit; the session also stays dirty in that case. At most
    /// one commit is in flight at a time; a second call is rejected, not
    /// queued.
    pub async fn commit(&self) -> Result<Snapshot> {
        let (wire, base_revision) = {
            let mut inner = self.inner.lock();
            inner.check_idle()?;
            if !inner.connected {
                return Err(Error::NotConnected);
            }
            let wire = inner.draft.to_wire()?;
            inner.in_flight = Some(Pending::Commit);
            let _ = self.tx.send(inner.snapshot());
            (wire, inner.revision)
        };
        debug!("writing configuration ({} events)", wire.schedule.events.len());
        let outcome = self.store.put(&wire).await;
        let snapshot = {
            let mut inner = self.inner.lock();
            inner.in_flight = None;
            if let Err(err) = outcome {
                warn!("commit failed, draft kept dirty: {err}");
                let _ = self.tx.send(inner.snapshot());
                return Err(err);
            }
            if inner.revision == base_revision {
                inner.dirty = false;
            }
            let snapshot = inner.snapshot();
            let _ = self.tx.send(snapshot.clone());
            snapshot
        };
        info!("configuration committed");
        Ok(snapshot)
    }

    /// Current draft, cloned out. Edits go through `mutate`.
    pub fn document(&self) -> Draft {
        self.inner.lock().draft.clone()
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    /// Subscribes to snapshots; one arrives after every visible change,
    /// including the pending-write flip at the start of a commit. Snapshots
    /// are sent while the state lock is held, so delivery order matches
    /// state order.
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}
