//! Active-project context shared by every view.
//!
//! Switching projects persists the choice and then publishes it on a
//! watch channel. Views hold a receiver and re-read on change, so no
//! route reload is needed to propagate a switch.

use tokio::sync::watch;
use tracing::info;

use crate::errors::Result;
use crate::models::Project;
use crate::storage::SessionStore;

pub struct ProjectContext {
    store: SessionStore,
    tx: watch::Sender<Option<Project>>,
}

impl ProjectContext {
    /// Seed the context from whatever project the store last persisted.
    pub fn new(store: SessionStore) -> Self {
        let (tx, _rx) = watch::channel(store.load_project());
        Self { store, tx }
    }

    pub fn current(&self) -> Option<Project> {
        self.tx.borrow().clone()
    }

    pub fn active_project_id(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|p| p.uid.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Project>> {
        self.tx.subscribe()
    }

    /// Persist `project` under `CONVOY_PROJECT`, then notify subscribers.
    pub fn set_active(&self, project: Project) -> Result<()> {
        self.store.save_project(&project)?;
        info!(
            project_id = %project.uid,
            project_type = %project.project_type,
            "active project set"
        );
        self.tx.send_replace(Some(project));
        Ok(())
    }

    /// Forget the active project, e.g. on logout.
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }
}
