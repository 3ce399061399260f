//! Client-side routes and the navigator controllers drive.

use std::fmt;
use std::sync::Mutex;

use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Projects,
    Project(String),
    ProjectEvents {
        project_id: String,
        app_id: Option<String>,
    },
    ProjectSubscriptions {
        project_id: String,
        subscription_id: Option<String>,
    },
    NewSubscription(String),
    PortalLinks,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Home => f.write_str("/"),
            Route::Projects => f.write_str("/projects"),
            Route::Project(id) => write!(f, "/projects/{}", id),
            Route::ProjectEvents { project_id, app_id } => {
                write!(f, "/projects/{}/events", project_id)?;
                if let Some(app_id) = app_id {
                    write!(f, "?eventsApp={}", urlencoding::encode(app_id))?;
                }
                Ok(())
            }
            Route::ProjectSubscriptions {
                project_id,
                subscription_id,
            } => {
                write!(f, "/projects/{}/subscriptions", project_id)?;
                if let Some(id) = subscription_id {
                    write!(f, "?id={}", urlencoding::encode(id))?;
                }
                Ok(())
            }
            Route::NewSubscription(project_id) => {
                write!(f, "/projects/{}/subscriptions/new", project_id)
            }
            Route::PortalLinks => f.write_str("/portal-links"),
        }
    }
}

impl Route {
    /// Parse a dashboard URL path (with optional query) into a route.
    pub fn parse(url: &str) -> Option<Route> {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let param = |name: &str| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
        };
        let segments: Vec<&str> = path.trim_end_matches('/').split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["projects"] => Some(Route::Projects),
            ["portal-links"] => Some(Route::PortalLinks),
            ["projects", id] => Some(Route::Project(id.to_string())),
            ["projects", id, "events"] => Some(Route::ProjectEvents {
                project_id: id.to_string(),
                app_id: param("eventsApp"),
            }),
            ["projects", id, "subscriptions", "new"] => {
                Some(Route::NewSubscription(id.to_string()))
            }
            ["projects", id, "subscriptions", ..] => Some(Route::ProjectSubscriptions {
                project_id: id.to_string(),
                subscription_id: param("id"),
            }),
            _ => None,
        }
    }
}

/// Moves the user between screens.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every visited route, most recent last.
#[derive(Default)]
pub struct History {
    visited: Mutex<Vec<Route>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.visited
            .lock()
            .ok()
            .and_then(|visited| visited.last().cloned())
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        info!(route = %route, "navigate");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_render_as_paths() {
        assert_eq!(Route::Login.to_string(), "/login");
        assert_eq!(Route::Home.to_string(), "/");
        assert_eq!(Route::Project("p1".into()).to_string(), "/projects/p1");
        assert_eq!(
            Route::ProjectEvents {
                project_id: "p1".into(),
                app_id: Some("app 1".into()),
            }
            .to_string(),
            "/projects/p1/events?eventsApp=app%201"
        );
    }

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/projects/"), Some(Route::Projects));
        assert_eq!(Route::parse("/projects/p9"), Some(Route::Project("p9".into())));
        assert_eq!(
            Route::parse("/projects/p9/events?eventsApp=a%201"),
            Some(Route::ProjectEvents {
                project_id: "p9".into(),
                app_id: Some("a 1".into()),
            })
        );
        assert_eq!(
            Route::parse("/projects/p9/subscriptions?id=s1"),
            Some(Route::ProjectSubscriptions {
                project_id: "p9".into(),
                subscription_id: Some("s1".into()),
            })
        );
        assert_eq!(
            Route::parse("/projects/p9/subscriptions/new"),
            Some(Route::NewSubscription("p9".into()))
        );
        assert_eq!(Route::parse("/nowhere/else"), None);
    }

    #[test]
    fn test_history_records_in_order() {
        let history = History::new();
        assert!(history.current().is_none());
        history.navigate(Route::Login);
        history.navigate(Route::Home);
        assert_eq!(history.current(), Some(Route::Home));
        assert_eq!(history.visited(), vec![Route::Login, Route::Home]);
    }
}
