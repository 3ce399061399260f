//! Project shell: resolves the active project, the sibling project list and
//! the sidebar, and handles switching between projects.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::{DashboardError, Result};
use crate::layout;
use crate::models::{Project, ProjectStatistics};
use crate::navigation::NavigationMenu;
use crate::router::Route;
use crate::state::DashboardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BootstrapState {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Serialize)]
pub struct ProjectShell {
    #[serde(skip)]
    state: Arc<DashboardState>,
    pub bootstrap: BootstrapState,
    pub menu: NavigationMenu,
    pub secondary_menu: NavigationMenu,
    pub project_details: Option<Project>,
    pub statistics: Option<ProjectStatistics>,
    pub projects: Vec<Project>,
    pub is_loading_project_details: bool,
    pub show_help_dropdown: bool,
    pub screen_width: u32,
    pub should_show_full_sidebar: bool,
}

impl ProjectShell {
    pub fn new(state: Arc<DashboardState>) -> Self {
        let screen_width = state.config.screen_width;
        Self {
            state,
            bootstrap: BootstrapState::Idle,
            menu: NavigationMenu::primary(),
            secondary_menu: NavigationMenu::secondary(),
            project_details: None,
            statistics: None,
            projects: Vec::new(),
            is_loading_project_details: false,
            show_help_dropdown: false,
            screen_width,
            should_show_full_sidebar: layout::sidebar_is_full(screen_width),
        }
    }

    /// Load the active project and the project list side by side.
    ///
    /// Neither fetch waits on the other and neither failure cancels the
    /// other. Only a failed project-details fetch leaves the shell `Failed`.
    pub async fn init(&mut self) -> BootstrapState {
        self.bootstrap = BootstrapState::Loading;
        self.is_loading_project_details = true;

        let state = Arc::clone(&self.state);
        let active_id = state.context.active_project_id();
        let details = async {
            match active_id {
                Some(id) => state.api.get_project(&id).await.map(|r| r.data),
                None => Err(DashboardError::NoActiveProject),
            }
        };
        let (details, projects) = tokio::join!(details, state.api.get_projects());

        match projects {
            Ok(resp) => self.projects = resp.data,
            Err(e) => warn!(error = %e, "failed to load project list"),
        }

        self.bootstrap = match details {
            Ok(project) => {
                self.menu.apply_project_type(project.project_type);
                if let Err(e) = self.state.context.set_active(project.clone()) {
                    warn!(
                        project_id = %project.uid,
                        error = %e,
                        "failed to persist active project"
                    );
                }
                self.project_details = Some(project);
                BootstrapState::Ready
            }
            Err(e) => {
                warn!(error = %e, "failed to load project details");
                BootstrapState::Failed
            }
        };

        self.is_loading_project_details = false;
        self.bootstrap
    }

    /// Make `project` the active project and move to its landing page.
    ///
    /// The choice is persisted and published before anything is fetched,
    /// so storage already holds the new project when navigation happens.
    /// Returns whether the switch reached navigation.
    pub async fn switch_project(&mut self, project: Project) -> bool {
        self.is_loading_project_details = true;
        let project_id = project.uid.clone();
        let outcome = self.try_switch(project).await;
        self.is_loading_project_details = false;

        match outcome {
            Ok(()) => true,
            Err(e) => {
                warn!(project_id = %project_id, error = %e, "project switch failed");
                false
            }
        }
    }

    async fn try_switch(&mut self, project: Project) -> Result<()> {
        let project_id = project.uid.clone();

        self.state.context.set_active(project.clone())?;
        self.menu.apply_project_type(project.project_type);
        self.project_details = Some(project);

        let fresh = self.state.api.get_project(&project_id).await?.data;
        let stats = self.state.api.get_project_stats(&project_id).await?.data;
        self.project_details = Some(fresh);
        self.statistics = Some(stats);

        info!(project_id = %project_id, "switched project");
        self.state.navigator.navigate(Route::Project(project_id));
        Ok(())
    }

    pub fn is_outgoing_project(&self) -> bool {
        self.project_details
            .as_ref()
            .map(Project::is_outgoing)
            .unwrap_or(false)
    }

    pub fn toggle_help_dropdown(&mut self) {
        self.show_help_dropdown = !self.show_help_dropdown;
    }

    pub fn on_resize(&mut self, screen_width: u32) {
        self.screen_width = screen_width;
        self.should_show_full_sidebar = layout::sidebar_is_full(screen_width);
    }
}
