use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized")]
    Unauthorized,

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("no active project")]
    NoActiveProject,

    #[error("missing saml access code")]
    MissingAccessCode,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    /// HTTP status of the failed call, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::Unauthorized => Some(401),
            DashboardError::Api { status, .. } => Some(*status),
            DashboardError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
