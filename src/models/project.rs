use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a project. Fixed at creation; decides the sidebar shape
/// and the creation wizard branch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Receives events from external sources.
    Incoming,
    /// Delivers events to subscribed endpoints.
    #[default]
    Outgoing,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Incoming => "incoming",
            ProjectType::Outgoing => "outgoing",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "incoming" => Ok(ProjectType::Incoming),
            "outgoing" => Ok(ProjectType::Outgoing),
            other => Err(format!("unknown project type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectStatistics {
    #[serde(default)]
    pub messages_sent: u64,
    #[serde(default)]
    pub total_apps: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ProjectStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn is_outgoing(&self) -> bool {
        self.project_type == ProjectType::Outgoing
    }
}

/// Payload of the create-project form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProject {
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProjectResponse {
    pub project: Project,
    /// Shown once; the backend never returns the key again.
    #[serde(default)]
    pub api_key: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_is_lowercase_on_the_wire() {
        let json = serde_json::json!({
            "uid": "p1",
            "name": "Payments",
            "type": "incoming"
        });
        let project: Project = serde_json::from_value(json).unwrap();
        assert_eq!(project.project_type, ProjectType::Incoming);
        assert!(!project.is_outgoing());

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["type"], "incoming");
        assert!(back.get("logo_url").is_none());
    }

    #[test]
    fn test_unknown_project_type_is_rejected() {
        let json = serde_json::json!({ "uid": "p1", "name": "x", "type": "sideways" });
        assert!(serde_json::from_value::<Project>(json).is_err());
        assert!("sideways".parse::<ProjectType>().is_err());
        assert_eq!("OUTGOING".parse::<ProjectType>(), Ok(ProjectType::Outgoing));
    }
}
