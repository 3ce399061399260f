use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use convoy_dashboard::config::{self, Config};
use convoy_dashboard::controllers::{
    self, AppDetails, CreateProjectWizard, LoginPage, ProjectShell, SamlCallback, Subscriptions,
};
use convoy_dashboard::models::{NewProject, ProjectType};
use convoy_dashboard::router::{History, Route};
use convoy_dashboard::storage::FileStorage;
use convoy_dashboard::DashboardState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let default_filter = "convoy_dashboard=info,convoy_dash=info";
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
    );
    if std::env::var("CONVOY_LOG_JSON").map(|v| v == "1").unwrap_or(false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let args = cli::Cli::parse();
    let mut cfg = config::load()?;
    if let Some(api_url) = args.api_url.as_deref() {
        cfg.api_url = Config::with_api_url(api_url)?.api_url;
    }

    let result = run(cfg, args.command).await;
    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run(cfg: Config, command: cli::Commands) -> anyhow::Result<()> {
    let storage = Arc::new(FileStorage::new(cfg.storage_path.clone()));
    let history = Arc::new(History::new());
    let state = DashboardState::new(cfg, storage, history.clone())
        .context("failed to initialise dashboard client")?;

    match command {
        cli::Commands::Login { username, password } => {
            let mut page = LoginPage::new(state.clone());
            page.handle_input("username", username);
            page.handle_input("password", password);
            let ok = page.submit().await;
            render(&page)?;
            ensure(ok, "login failed")?;
        }
        cli::Commands::Saml { code } => {
            let mut callback = if code.contains('=') {
                SamlCallback::from_query(state.clone(), &code)
            } else {
                SamlCallback::new(state.clone(), Some(code))
            };
            let ok = callback.authenticate().await;
            render(&state.store.load_organisations())?;
            ensure(ok, "saml authentication failed")?;
        }
        cli::Commands::Logout => {
            controllers::logout(&state).await;
        }
        cli::Commands::Projects => {
            let mut shell = ProjectShell::new(state.clone());
            shell.init().await;
            render(&shell)?;
        }
        cli::Commands::Switch { project_id } => {
            let mut shell = ProjectShell::new(state.clone());
            shell.init().await;
            let project = shell
                .projects
                .iter()
                .find(|p| p.uid == project_id)
                .cloned()
                .with_context(|| format!("project '{}' not found", project_id))?;
            let ok = shell.switch_project(project).await;
            render(&shell)?;
            ensure(ok, "project switch failed")?;
        }
        cli::Commands::CreateProject {
            name,
            project_type,
            logo_url,
        } => {
            let project_type: ProjectType = project_type
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let mut wizard = CreateProjectWizard::new(state.clone());
            let created = wizard
                .create_project(&NewProject {
                    name,
                    project_type,
                    logo_url,
                    config: None,
                })
                .await;
            render(&wizard)?;
            ensure(created.is_some(), "project creation failed")?;
        }
        cli::Commands::App {
            app_id,
            delete_endpoint,
        } => {
            let mut details = AppDetails::new(state.clone());
            details.activate(&app_id).await;
            if let Some(endpoint_id) = delete_endpoint {
                if !details.request_delete(&endpoint_id) {
                    anyhow::bail!("endpoint '{}' not found on app '{}'", endpoint_id, app_id);
                }
                details.delete_endpoint().await;
            }
            render(&details)?;
        }
        cli::Commands::Subscriptions { id, page } => {
            let mut view = Subscriptions::new(state.clone());
            let project_id = view.project_id.clone().unwrap_or_default();
            let route = Route::ProjectSubscriptions {
                project_id,
                subscription_id: id.clone(),
            };
            view.activate_page(&route.to_string(), id.as_deref(), page).await;
            render(&view)?;
        }
    }

    for notification in state.notifier.drain() {
        eprintln!("[{:?}] {}", notification.style, notification.message);
    }
    if let Some(route) = history.current() {
        tracing::info!(route = %route, "final route");
    }
    Ok(())
}

fn render<T: Serialize + ?Sized>(view: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(view).context("failed to render view")?;
    println!("{}", json);
    Ok(())
}

fn ensure(ok: bool, message: &str) -> anyhow::Result<()> {
    if ok {
        Ok(())
    } else {
        anyhow::bail!("{}", message)
    }
}
