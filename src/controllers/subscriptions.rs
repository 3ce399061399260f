//! Subscription list with an optional subscription opened for detail.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

use crate::errors::{DashboardError, Result};
use crate::models::{Paginated, Project, Subscription};
use crate::router::Route;
use crate::state::DashboardState;

#[derive(Serialize)]
pub struct Subscriptions {
    #[serde(skip)]
    state: Arc<DashboardState>,
    pub project_id: Option<String>,
    pub subscriptions: Option<Paginated<Subscription>>,
    pub active_subscription: Option<Subscription>,
    pub should_show_create_modal: bool,
    pub is_loading_subscriptions: bool,
}

impl Subscriptions {
    pub fn new(state: Arc<DashboardState>) -> Self {
        let project_id = state.context.active_project_id();
        Self {
            state,
            project_id,
            subscriptions: None,
            active_subscription: None,
            should_show_create_modal: false,
            is_loading_subscriptions: false,
        }
    }

    /// Screen entry for `url`, with `query_id` taken from `?id=`.
    pub async fn activate(&mut self, url: &str, query_id: Option<&str>) {
        self.activate_page(url, query_id, None).await;
    }

    /// Like [`activate`](Self::activate), starting on `page` instead of the first.
    pub async fn activate_page(&mut self, url: &str, query_id: Option<&str>, page: Option<u32>) {
        self.should_show_create_modal =
            matches!(Route::parse(url), Some(Route::NewSubscription(_)));
        self.get_subscriptions(page).await;
        self.on_query_params(query_id);
    }

    pub async fn get_subscriptions(&mut self, page: Option<u32>) {
        self.is_loading_subscriptions = true;
        self.project_id = self.state.context.active_project_id();

        match self.fetch(page).await {
            Ok(page) => self.subscriptions = Some(page),
            Err(e) => warn!(error = %e, "failed to load subscriptions"),
        }
        self.is_loading_subscriptions = false;
    }

    async fn fetch(&self, page: Option<u32>) -> Result<Paginated<Subscription>> {
        let project_id = self
            .project_id
            .as_deref()
            .ok_or(DashboardError::NoActiveProject)?;
        Ok(self
            .state
            .api
            .get_subscriptions(project_id, page)
            .await?
            .data)
    }

    /// Pick the subscription whose uid matches `id` in the loaded page.
    pub fn on_query_params(&mut self, id: Option<&str>) {
        self.active_subscription = match (id, &self.subscriptions) {
            (Some(id), Some(page)) => page.content.iter().find(|s| s.uid == id).cloned(),
            _ => None,
        };
    }

    /// Wait for the next project switch and reload for the new project.
    ///
    /// Returns `false` once the context has been dropped.
    pub async fn follow_project(&mut self, rx: &mut watch::Receiver<Option<Project>>) -> bool {
        if rx.changed().await.is_err() {
            return false;
        }
        rx.borrow_and_update();
        self.active_subscription = None;
        self.get_subscriptions(None).await;
        true
    }
}
