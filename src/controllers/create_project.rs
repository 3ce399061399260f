//! Project creation wizard.
//!
//! `CreateProject -> CreateSource | CreateApplication -> CreateSubscription`,
//! branching on the new project's type. There is no way back; cancelling
//! leaves the wizard for the project list.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{CreateProjectResponse, NewProject, ProjectType};
use crate::router::Route;
use crate::state::DashboardState;

pub const HASH_ALGORITHMS: [&str; 12] = [
    "SHA256",
    "SHA512",
    "MD5",
    "SHA1",
    "SHA224",
    "SHA384",
    "SHA3_224",
    "SHA3_256",
    "SHA3_384",
    "SHA3_512",
    "SHA512_256",
    "SHA512_224",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetryStrategy {
    pub id: &'static str,
    pub label: &'static str,
}

pub const RETRY_STRATEGIES: [RetryStrategy; 2] = [
    RetryStrategy {
        id: "linear",
        label: "Linear time retry",
    },
    RetryStrategy {
        id: "exponential",
        label: "Exponential time backoff",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStage {
    CreateProject,
    CreateSource,
    CreateApplication,
    CreateSubscription,
}

impl WizardStage {
    /// Stage following project creation for a project of `project_type`.
    pub fn after_project(project_type: ProjectType) -> Self {
        match project_type {
            ProjectType::Incoming => WizardStage::CreateSource,
            ProjectType::Outgoing => WizardStage::CreateApplication,
        }
    }
}

#[derive(Serialize)]
pub struct CreateProjectWizard {
    #[serde(skip)]
    state: Arc<DashboardState>,
    pub stage: WizardStage,
    pub project_type: ProjectType,
    pub is_creating_project: bool,
    pub created: Option<CreateProjectResponse>,
}

impl CreateProjectWizard {
    pub fn new(state: Arc<DashboardState>) -> Self {
        Self {
            state,
            stage: WizardStage::CreateProject,
            project_type: ProjectType::default(),
            is_creating_project: false,
            created: None,
        }
    }

    /// Advance past the first stage once a project of `project_type` exists.
    pub fn on_project_created(&mut self, project_type: ProjectType) {
        if self.stage != WizardStage::CreateProject {
            return;
        }
        self.project_type = project_type;
        self.stage = WizardStage::after_project(project_type);
    }

    /// Source or application is in place; move on to the subscription.
    pub fn on_step_completed(&mut self) {
        if matches!(
            self.stage,
            WizardStage::CreateSource | WizardStage::CreateApplication
        ) {
            self.stage = WizardStage::CreateSubscription;
        }
    }

    /// Create the project, make it active and advance the wizard.
    ///
    /// The stage is left untouched when the request fails.
    pub async fn create_project(
        &mut self,
        new_project: &NewProject,
    ) -> Option<CreateProjectResponse> {
        self.is_creating_project = true;
        let result = self.state.api.create_project(new_project).await;
        self.is_creating_project = false;

        let created = match result {
            Ok(resp) => resp.data,
            Err(e) => {
                warn!(name = %new_project.name, error = %e, "failed to create project");
                return None;
            }
        };

        info!(
            project_id = %created.project.uid,
            project_type = %created.project.project_type,
            "project created"
        );
        if let Err(e) = self.state.context.set_active(created.project.clone()) {
            warn!(project_id = %created.project.uid, error = %e, "failed to persist new project");
        }
        self.on_project_created(created.project.project_type);
        self.created = Some(created.clone());
        Some(created)
    }

    pub fn cancel(&self) {
        self.state.navigator.navigate(Route::Projects);
    }
}
