use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    /// Not checked client-side: an expired token surfaces as a 401.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// The authenticated user as returned by login and SAML exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: serde_json::Value,
    pub token: Token,
}

/// Login or SAML payload: the typed session plus the exact JSON it was
/// decoded from, which is what gets persisted under `CONVOY_AUTH`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPayload {
    pub session: Session,
    pub raw: Value,
}

impl AuthPayload {
    /// The `token` object exactly as the server sent it.
    pub fn raw_token(&self) -> &Value {
        &self.raw["token"]
    }
}

impl<'de> Deserialize<'de> for AuthPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let session = Session::deserialize(&raw).map_err(serde::de::Error::custom)?;
        Ok(Self { session, raw })
    }
}

impl Serialize for AuthPayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organisation {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: String,
}
