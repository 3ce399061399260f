use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::context::ProjectContext;
use crate::errors::Result;
use crate::notification::Notifier;
use crate::router::Navigator;
use crate::storage::{SessionStore, Storage};

/// Shared dashboard state handed to every controller.
pub struct DashboardState {
    pub config: Config,
    pub store: SessionStore,
    pub api: ApiClient,
    pub context: ProjectContext,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Notifier,
}

impl DashboardState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Arc<Self>> {
        let store = SessionStore::new(storage);
        let api = ApiClient::new(&config, store.clone())?;
        let context = ProjectContext::new(store.clone());

        Ok(Arc::new(Self {
            config,
            store,
            api,
            context,
            navigator,
            notifier: Notifier::new(),
        }))
    }
}
