//! One method per remote action.
//!
//! Every call is a single attempt: no retry, no backoff and no
//! de-duplication of concurrent identical calls. Callers own failure
//! handling.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::{DashboardError, Result};
use crate::models::envelope::ErrorBody;
use crate::models::{
    Application, ApiResponse, AuthPayload, CreateProjectResponse, KeyRequest, LoginRequest,
    NewProject, Organisation, Paginated, PortalKey, Project, ProjectStatistics, Subscription,
};
use crate::storage::SessionStore;

/// Header carrying the one-time SAML access code during the SSO exchange.
pub const SAML_TOKEN_HEADER: &str = "X-Convoy-SAML-Token";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("convoy-dashboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ── Auth ─────────────────────────────────────────────────

    pub async fn login(&self, credentials: &LoginRequest) -> Result<ApiResponse<AuthPayload>> {
        self.send(Method::POST, "/auth/login", Auth::Anonymous, |req| {
            req.json(credentials)
        })
        .await
    }

    pub async fn logout(&self) -> Result<ApiResponse<Option<Value>>> {
        self.execute(Method::POST, "/auth/logout", |req| req).await
    }

    /// Exchange a one-time SAML access code for a session.
    pub async fn authenticate_with_saml(
        &self,
        access_code: &str,
    ) -> Result<ApiResponse<AuthPayload>> {
        self.send(Method::POST, "/saml/token", Auth::Anonymous, |req| {
            req.header(SAML_TOKEN_HEADER, access_code)
        })
        .await
    }

    pub async fn get_organisations(&self) -> Result<ApiResponse<Paginated<Organisation>>> {
        self.execute(Method::GET, "/organisations", |req| req).await
    }

    // ── Projects ─────────────────────────────────────────────

    pub async fn get_projects(&self) -> Result<ApiResponse<Vec<Project>>> {
        self.execute(Method::GET, "/projects", |req| req).await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<ApiResponse<Project>> {
        let path = format!("/projects/{}", seg(project_id));
        self.execute(Method::GET, &path, |req| req).await
    }

    pub async fn get_project_stats(
        &self,
        project_id: &str,
    ) -> Result<ApiResponse<ProjectStatistics>> {
        let path = format!("/projects/{}/stats", seg(project_id));
        self.execute(Method::GET, &path, |req| req).await
    }

    pub async fn create_project(
        &self,
        project: &NewProject,
    ) -> Result<ApiResponse<CreateProjectResponse>> {
        self.execute(Method::POST, "/projects", |req| req.json(project)).await
    }

    // ── Applications & endpoints ─────────────────────────────

    pub async fn get_apps(
        &self,
        project_id: &str,
        page: u32,
    ) -> Result<ApiResponse<Paginated<Application>>> {
        let path = format!("/projects/{}/apps", seg(project_id));
        let page = page.max(1);
        self.execute(Method::GET, &path, |req| req.query(&[("page", page)])).await
    }

    pub async fn get_app(
        &self,
        project_id: &str,
        app_id: &str,
    ) -> Result<ApiResponse<Application>> {
        let path = format!("/projects/{}/apps/{}", seg(project_id), seg(app_id));
        self.execute(Method::GET, &path, |req| req).await
    }

    /// Mint a key for the given application, e.g. an app-portal key.
    pub async fn generate_key(
        &self,
        project_id: &str,
        app_id: &str,
        body: &KeyRequest,
    ) -> Result<ApiResponse<PortalKey>> {
        let path = format!("/projects/{}/apps/{}/keys", seg(project_id), seg(app_id));
        self.execute(Method::POST, &path, |req| req.json(body)).await
    }

    pub async fn delete_endpoint(
        &self,
        project_id: &str,
        app_id: &str,
        endpoint_id: &str,
    ) -> Result<ApiResponse<Option<Value>>> {
        let path = format!(
            "/projects/{}/apps/{}/endpoints/{}",
            seg(project_id),
            seg(app_id),
            seg(endpoint_id)
        );
        self.execute(Method::DELETE, &path, |req| req).await
    }

    // ── Subscriptions ────────────────────────────────────────

    pub async fn get_subscriptions(
        &self,
        project_id: &str,
        page: Option<u32>,
    ) -> Result<ApiResponse<Paginated<Subscription>>> {
        let path = format!("/projects/{}/subscriptions", seg(project_id));
        let page = page.unwrap_or(1).max(1);
        self.execute(Method::GET, &path, |req| req.query(&[("page", page)])).await
    }

    // ── Feature flags ────────────────────────────────────────

    /// Whether `flag` is enabled for the project. Any failure reads as disabled.
    pub async fn get_flag(&self, project_id: &str, flag: &str) -> bool {
        let body = json!({ "feature": flag, "project_id": project_id });
        let result: Result<ApiResponse<Option<Value>>> = self
            .execute(Method::POST, "/flags", |req| req.json(&body))
            .await;
        match result {
            Ok(_) => true,
            Err(e) => {
                debug!(flag, project_id, error = %e, "feature flag unavailable");
                false
            }
        }
    }

    // ── Transport ────────────────────────────────────────────

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        self.send(method, path, Auth::Bearer, configure).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        auth: Auth,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut req = self
            .http
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header("x-request-id", &request_id);
        let token = match auth {
            Auth::Bearer => self.session.access_token(),
            Auth::Anonymous => None,
        };
        let sent_token = token.is_some();
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        debug!(%method, path, request_id = %request_id, "api request");
        let resp = configure(req).send().await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            // only a rejected token invalidates the stored session
            if sent_token {
                warn!(
                    %method,
                    path,
                    request_id = %request_id,
                    "api answered 401, dropping session"
                );
                if let Err(e) = self.session.clear() {
                    warn!(error = %e, "failed to clear session store");
                }
            } else {
                debug!(%method, path, request_id = %request_id, "api answered 401");
            }
            return Err(DashboardError::Unauthorized);
        }

        let body = resp.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .map(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            debug!(%method, path, status = status.as_u16(), %message, "api request failed");
            return Err(DashboardError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Whether a call carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

fn seg(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}
