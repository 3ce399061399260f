//! Application details: endpoints, portal link and CLI key availability.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::CAN_CREATE_CLI_API_KEY;
use crate::errors::{DashboardError, Result};
use crate::layout;
use crate::models::{Application, Endpoint, KeyRequest};
use crate::router::Route;
use crate::state::DashboardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppTab {
    CliKeys,
    Devices,
}

/// Markup embedding the app portal at `url`.
pub fn portal_iframe(url: &str) -> String {
    format!(
        r#"<iframe style="width: 100%; height: 98%; border: none;" frameborder="0" src="{}"></iframe>"#,
        url
    )
}

#[derive(Serialize)]
pub struct AppDetails {
    #[serde(skip)]
    state: Arc<DashboardState>,
    pub app_id: Option<String>,
    pub app: Option<Application>,
    pub selected_endpoint: Option<Endpoint>,
    pub endpoint_secret_key: Option<String>,
    pub app_portal_link: Option<String>,
    pub app_portal_iframe: Option<String>,
    pub is_loading_app_details: bool,
    pub loading_app_portal_token: bool,
    pub is_deleting_endpoint: bool,
    pub show_add_endpoint_modal: bool,
    pub show_add_event_modal: bool,
    pub show_endpoint_secret: bool,
    pub show_delete_modal: bool,
    pub should_render_small_size: bool,
    pub screen_width: u32,
    pub active_tab: AppTab,
    pub is_cli_available: bool,
}

impl AppDetails {
    pub fn new(state: Arc<DashboardState>) -> Self {
        let screen_width = state.config.screen_width;
        Self {
            state,
            app_id: None,
            app: None,
            selected_endpoint: None,
            endpoint_secret_key: None,
            app_portal_link: None,
            app_portal_iframe: None,
            is_loading_app_details: false,
            loading_app_portal_token: false,
            is_deleting_endpoint: false,
            show_add_endpoint_modal: false,
            show_add_event_modal: false,
            show_endpoint_secret: false,
            show_delete_modal: false,
            should_render_small_size: layout::renders_small(screen_width),
            screen_width,
            active_tab: AppTab::CliKeys,
            is_cli_available: false,
        }
    }

    /// Screen entry: check the CLI key flag once, then load the app.
    pub async fn activate(&mut self, app_id: &str) {
        self.is_loading_app_details = true;
        self.is_cli_available = match self.state.context.active_project_id() {
            Some(project_id) => {
                self.state
                    .api
                    .get_flag(&project_id, CAN_CREATE_CLI_API_KEY)
                    .await
            }
            None => false,
        };
        self.on_resize(self.screen_width);
        self.get_app_details(app_id).await;
    }

    pub async fn get_app_details(&mut self, app_id: &str) {
        self.selected_endpoint = None;
        self.is_loading_app_details = true;
        self.app_id = Some(app_id.to_string());

        let result = self.fetch_app(app_id).await;
        self.is_loading_app_details = false;

        match result {
            Ok(app) => {
                self.app = Some(app);
                self.get_app_portal_token(false).await;
            }
            Err(e) => warn!(app_id, error = %e, "failed to load app details"),
        }
    }

    async fn fetch_app(&self, app_id: &str) -> Result<Application> {
        let project_id = self.project_id()?;
        Ok(self.state.api.get_app(&project_id, app_id).await?.data)
    }

    /// Request an app-portal key and derive the portal link and iframe.
    ///
    /// Incoming projects have no portal. Returns the link to open when
    /// `redirect` is set and the key was issued.
    pub async fn get_app_portal_token(&mut self, redirect: bool) -> Option<String> {
        if !self.is_outgoing_project() {
            return None;
        }
        let app_id = self.app.as_ref()?.uid.clone();
        let project_id = self.project_id().ok()?;

        self.loading_app_portal_token = true;
        let result = self
            .state
            .api
            .generate_key(&project_id, &app_id, &KeyRequest::app_portal())
            .await;
        self.loading_app_portal_token = false;

        match result {
            Ok(resp) => {
                let url = resp.data.url;
                self.app_portal_iframe = Some(portal_iframe(&url));
                self.app_portal_link = Some(url.clone());
                redirect.then_some(url)
            }
            Err(e) => {
                warn!(app_id = %app_id, error = %e, "failed to generate app portal key");
                None
            }
        }
    }

    /// Delete the selected endpoint and reload the app on success.
    pub async fn delete_endpoint(&mut self) -> bool {
        let (Some(app_id), Some(endpoint_id)) = (
            self.app.as_ref().map(|a| a.uid.clone()),
            self.selected_endpoint.as_ref().map(|e| e.uid.clone()),
        ) else {
            debug!("delete requested without a selected endpoint");
            return false;
        };

        self.is_deleting_endpoint = true;
        let result = match self.project_id() {
            Ok(project_id) => {
                self.state
                    .api
                    .delete_endpoint(&project_id, &app_id, &endpoint_id)
                    .await
            }
            Err(e) => Err(e),
        };
        self.is_deleting_endpoint = false;

        match result {
            Ok(resp) => {
                self.state.notifier.success(resp.message);
                self.show_delete_modal = false;
                self.get_app_details(&app_id).await;
                true
            }
            Err(e) => {
                warn!(
                    app_id = %app_id,
                    endpoint_id = %endpoint_id,
                    error = %e,
                    "failed to delete endpoint"
                );
                self.state.notifier.error("Failed to delete endpoint");
                false
            }
        }
    }

    pub fn select_endpoint(&mut self, endpoint_id: &str) -> bool {
        self.selected_endpoint = self
            .app
            .as_ref()
            .and_then(|app| app.endpoints.iter().find(|e| e.uid == endpoint_id))
            .cloned();
        self.selected_endpoint.is_some()
    }

    /// Select `endpoint_id` and open the delete confirmation.
    pub fn request_delete(&mut self, endpoint_id: &str) -> bool {
        self.show_delete_modal = self.select_endpoint(endpoint_id);
        self.show_delete_modal
    }

    pub fn view_endpoint_secret_key(&mut self, secret_key: &str) {
        self.show_endpoint_secret = !self.show_endpoint_secret;
        self.endpoint_secret_key = Some(secret_key.to_string());
    }

    pub fn close_edit_endpoint_modal(&mut self) {
        self.show_add_endpoint_modal = false;
        self.selected_endpoint = None;
    }

    pub fn toggle_active_tab(&mut self, tab: AppTab) {
        self.active_tab = tab;
    }

    /// Jump to the event log filtered to `app_id`.
    pub fn load_events(&self, app_id: &str) {
        let Some(project_id) = self.state.context.active_project_id() else {
            warn!(app_id, "no active project to show events for");
            return;
        };
        self.state.navigator.navigate(Route::ProjectEvents {
            project_id,
            app_id: Some(app_id.to_string()),
        });
    }

    pub fn on_resize(&mut self, screen_width: u32) {
        self.screen_width = screen_width;
        self.should_render_small_size = layout::renders_small(screen_width);
    }

    fn is_outgoing_project(&self) -> bool {
        self.state
            .context
            .current()
            .map(|p| p.is_outgoing())
            .unwrap_or(false)
    }

    fn project_id(&self) -> Result<String> {
        self.state
            .context
            .active_project_id()
            .ok_or(DashboardError::NoActiveProject)
    }
}
