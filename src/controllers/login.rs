//! Username/password login and logout.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::models::LoginRequest;
use crate::router::Route;
use crate::state::DashboardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

impl FromStr for LoginField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "username" => Ok(LoginField::Username),
            "password" => Ok(LoginField::Password),
            other => Err(format!("unknown login field '{}'", other)),
        }
    }
}

#[derive(Serialize)]
pub struct LoginPage {
    #[serde(skip)]
    state: Arc<DashboardState>,
    #[serde(skip)]
    pub form: LoginRequest,
    pub show_login_password: bool,
    pub disable_login_btn: bool,
}

impl LoginPage {
    pub fn new(state: Arc<DashboardState>) -> Self {
        Self {
            state,
            form: LoginRequest::default(),
            show_login_password: false,
            disable_login_btn: false,
        }
    }

    /// Apply an input change event. No validation; the last write wins.
    pub fn handle_input(&mut self, name: &str, value: impl Into<String>) {
        match name.parse::<LoginField>() {
            Ok(LoginField::Username) => self.form.username = value.into(),
            Ok(LoginField::Password) => self.form.password = value.into(),
            Err(e) => debug!(error = %e, "ignoring input event"),
        }
    }

    pub fn toggle_show_password(&mut self) {
        self.show_login_password = !self.show_login_password;
    }

    /// Post the form once. On success the session is stored and the user
    /// lands on `/`; failures leave the user on the form.
    pub async fn submit(&mut self) -> bool {
        self.disable_login_btn = true;
        let outcome = self.try_login().await;
        self.disable_login_btn = false;

        match outcome {
            Ok(()) => {
                self.state.navigator.navigate(Route::Home);
                true
            }
            Err(e) => {
                warn!(username = %self.form.username, error = %e, "login failed");
                false
            }
        }
    }

    async fn try_login(&self) -> Result<()> {
        let payload = self.state.api.login(&self.form).await?.data;
        self.state.store.save_auth(&payload)?;
        info!(user = %payload.session.uid, "logged in");
        Ok(())
    }
}

/// End the session: tell the API, forget local state, go to `/login`.
///
/// The API call is best effort; local state is cleared either way.
pub async fn logout(state: &DashboardState) {
    if let Err(e) = state.api.logout().await {
        warn!(error = %e, "logout request failed");
    }
    if let Err(e) = state.store.clear() {
        warn!(error = %e, "failed to clear session store");
    }
    state.context.clear();
    state.navigator.navigate(Route::Login);
}
