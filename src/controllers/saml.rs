//! SSO callback: trade the one-time SAML access code for a session.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::{DashboardError, Result};
use crate::router::Route;
use crate::state::DashboardState;

pub const ACCESS_CODE_PARAM: &str = "saml_access_code";

#[derive(Serialize)]
pub struct SamlCallback {
    #[serde(skip)]
    state: Arc<DashboardState>,
    #[serde(skip)]
    access_code: Option<String>,
    pub is_authenticating: bool,
}

impl SamlCallback {
    pub fn new(state: Arc<DashboardState>, access_code: Option<String>) -> Self {
        Self {
            state,
            access_code,
            is_authenticating: false,
        }
    }

    /// Build from the callback's query string (leading `?` optional).
    pub fn from_query(state: Arc<DashboardState>, query: &str) -> Self {
        let access_code = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(k, _)| k == ACCESS_CODE_PARAM)
            .map(|(_, v)| v.into_owned());
        Self::new(state, access_code)
    }

    pub fn access_code(&self) -> Option<&str> {
        self.access_code.as_deref()
    }

    /// Exchange the code once: `/` on success, `/login` otherwise.
    pub async fn authenticate(&mut self) -> bool {
        self.is_authenticating = true;
        let outcome = self.exchange().await;
        self.is_authenticating = false;

        match outcome {
            Ok(()) => {
                self.state.navigator.navigate(Route::Home);
                true
            }
            Err(e) => {
                warn!(error = %e, "saml authentication failed");
                self.state.navigator.navigate(Route::Login);
                false
            }
        }
    }

    async fn exchange(&self) -> Result<()> {
        let code = self
            .access_code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(DashboardError::MissingAccessCode)?;

        let payload = self.state.api.authenticate_with_saml(code).await?.data;
        self.state.store.save_auth_with_tokens(&payload)?;
        info!(user = %payload.session.uid, "saml session established");

        self.load_organisations().await;
        Ok(())
    }

    async fn load_organisations(&self) {
        match self.state.api.get_organisations().await {
            Ok(resp) => {
                if let Err(e) = self.state.store.save_organisations(&resp.data.content) {
                    warn!(error = %e, "failed to persist organisations");
                }
            }
            Err(e) => warn!(error = %e, "failed to load organisations"),
        }
    }
}
