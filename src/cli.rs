use clap::{Parser, Subcommand};

/// convoy-dash: Convoy dashboard from the terminal
#[derive(Parser)]
#[command(name = "convoy-dash", version, about)]
pub struct Cli {
    /// Dashboard API base URL
    #[arg(long, global = true, env = "CONVOY_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with username and password
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CONVOY_PASSWORD")]
        password: String,
    },

    /// Complete an SSO login with a SAML access code
    Saml {
        /// Access code, or the full callback query string
        code: String,
    },

    /// End the current session
    Logout,

    /// Show the active project, the sidebar and all projects
    Projects,

    /// Switch the active project
    Switch {
        project_id: String,
    },

    /// Create a project and show the next wizard stage
    CreateProject {
        #[arg(long)]
        name: String,
        /// incoming or outgoing
        #[arg(long = "type", default_value = "outgoing")]
        project_type: String,
        #[arg(long)]
        logo_url: Option<String>,
    },

    /// Show an application with its endpoints and portal link
    App {
        app_id: String,
        /// Delete this endpoint before showing the app
        #[arg(long)]
        delete_endpoint: Option<String>,
    },

    /// List subscriptions of the active project
    Subscriptions {
        /// Subscription to open for detail
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
}
