use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Endpoint {
    pub uid: String,
    #[serde(default)]
    pub target_url: String,
    #[serde(default)]
    pub description: String,
    /// Signing secret shown on demand in the endpoint list.
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub uid: String,
    #[serde(default, alias = "group_id")]
    pub project_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub support_email: String,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyRequest {
    pub key_type: String,
}

impl KeyRequest {
    pub fn app_portal() -> Self {
        Self {
            key_type: "app_portal".to_string(),
        }
    }
}

/// Token-scoped key granting access to an application's portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalKey {
    pub key: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key_type: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default, alias = "group_id")]
    pub project_id: String,
}
