//! Project bootstrap and project switching.

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use convoy_dashboard::config::Config;
use convoy_dashboard::controllers::{BootstrapState, ProjectShell};
use convoy_dashboard::models::ProjectType;
use convoy_dashboard::navigation::{NavigationMenu, PORTAL_ICON};
use convoy_dashboard::router::Route;
use convoy_dashboard::storage::{MemoryStorage, PROJECT_KEY};
use convoy_dashboard::DashboardState;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_project(server: &MockServer, uid: &str, project_type: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/projects/{}", uid)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(project_json(uid, project_type))),
        )
        .mount(server)
        .await;
}

async fn mount_project_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            project_json("p1", "outgoing"),
            project_json("p2", "incoming"),
        ]))))
        .mount(server)
        .await;
}

async fn mount_stats(server: &MockServer, uid: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/projects/{}/stats", uid)))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "messages_sent": 42,
            "total_apps": 3,
        }))))
        .mount(server)
        .await;
}

mod bootstrap_tests {
    use super::*;

    #[tokio::test]
    async fn test_init_loads_details_and_list() {
        let h = Harness::with_active_project(&project("p1", ProjectType::Outgoing)).await;
        mount_project(&h.server, "p1", "outgoing").await;
        mount_project_list(&h.server).await;

        let mut shell = ProjectShell::new(h.state.clone());
        assert_eq!(shell.bootstrap, BootstrapState::Idle);

        let outcome = shell.init().await;

        assert_eq!(outcome, BootstrapState::Ready);
        assert!(!shell.is_loading_project_details);
        assert_eq!(shell.projects.len(), 2);
        assert!(shell.is_outgoing_project());
        assert_eq!(shell.menu.items().last().unwrap().icon, PORTAL_ICON);
        assert_eq!(shell.menu.len(), NavigationMenu::primary().len() + 1);
    }

    #[tokio::test]
    async fn test_incoming_project_has_no_portal_links() {
        let h = Harness::with_active_project(&project("p2", ProjectType::Incoming)).await;
        mount_project(&h.server, "p2", "incoming").await;
        mount_project_list(&h.server).await;

        let mut shell = ProjectShell::new(h.state.clone());
        shell.init().await;

        assert_eq!(shell.menu, NavigationMenu::primary());
    }

    #[tokio::test]
    async fn test_details_failure_does_not_cancel_list() {
        let h = Harness::with_active_project(&project("p1", ProjectType::Outgoing)).await;
        Mock::given(method("GET"))
            .and(path("/projects/p1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(error_body("boom")))
            .mount(&h.server)
            .await;
        mount_project_list(&h.server).await;

        let mut shell = ProjectShell::new(h.state.clone());
        let outcome = shell.init().await;

        assert_eq!(outcome, BootstrapState::Failed);
        assert!(!shell.is_loading_project_details);
        assert!(shell.project_details.is_none());
        assert_eq!(shell.projects.len(), 2);
    }

    #[tokio::test]
    async fn test_list_failure_does_not_fail_bootstrap() {
        let h = Harness::with_active_project(&project("p1", ProjectType::Outgoing)).await;
        mount_project(&h.server, "p1", "outgoing").await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&h.server)
            .await;

        let mut shell = ProjectShell::new(h.state.clone());
        let outcome = shell.init().await;

        assert_eq!(outcome, BootstrapState::Ready);
        assert!(shell.projects.is_empty());
        assert!(!shell.is_loading_project_details);
    }

    #[tokio::test]
    async fn test_no_active_project_fails_without_details_request() {
        let h = Harness::start().await;
        mount_project_list(&h.server).await;

        let mut shell = ProjectShell::new(h.state.clone());
        let outcome = shell.init().await;

        assert_eq!(outcome, BootstrapState::Failed);
        assert_eq!(shell.projects.len(), 2);
        let requests = h.server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/projects");
    }

    #[tokio::test]
    async fn test_resize_toggles_full_sidebar() {
        let h = Harness::start().await;
        let mut shell = ProjectShell::new(h.state.clone());
        shell.on_resize(1100);
        assert!(!shell.should_show_full_sidebar);
        shell.on_resize(1440);
        assert!(shell.should_show_full_sidebar);
        shell.toggle_help_dropdown();
        assert!(shell.show_help_dropdown);
    }
}

mod switch_tests {
    use super::*;

    #[tokio::test]
    async fn test_switch_persists_before_navigation() {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(SnapshotNavigator {
            storage: storage.clone(),
            seen: Mutex::new(Vec::new()),
        });
        let config = Config::with_api_url(server.uri()).unwrap();
        let state = DashboardState::new(config, storage.clone(), navigator.clone()).unwrap();
        state.context.set_active(project("p1", ProjectType::Outgoing)).unwrap();

        mount_project(&server, "p2", "incoming").await;
        mount_stats(&server, "p2").await;

        let mut shell = ProjectShell::new(state.clone());
        assert!(shell.switch_project(project("p2", ProjectType::Incoming)).await);

        let seen = navigator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (route, stored) = &seen[0];
        assert_eq!(route, &Route::Project("p2".into()));
        let stored: serde_json::Value = serde_json::from_str(stored.as_deref().unwrap()).unwrap();
        assert_eq!(stored["uid"], "p2");
    }

    #[tokio::test]
    async fn test_switch_updates_menu_stats_and_subscribers() {
        let h = Harness::with_active_project(&project("p1", ProjectType::Outgoing)).await;
        mount_project(&h.server, "p1", "outgoing").await;
        mount_project(&h.server, "p2", "incoming").await;
        mount_project_list(&h.server).await;
        mount_stats(&h.server, "p2").await;

        let mut shell = ProjectShell::new(h.state.clone());
        shell.init().await;
        assert!(shell.menu.has_portal_links());

        let mut rx = h.state.context.subscribe();
        assert!(shell.switch_project(project("p2", ProjectType::Incoming)).await);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().uid, "p2");
        assert!(!shell.menu.has_portal_links());
        assert_eq!(shell.statistics.as_ref().unwrap().messages_sent, 42);
        assert!(!shell.is_loading_project_details);
        assert_eq!(h.history.current(), Some(Route::Project("p2".into())));
        assert_eq!(h.raw(PROJECT_KEY).unwrap()["uid"], "p2");
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_flag_and_stays_put() {
        let h = Harness::with_active_project(&project("p1", ProjectType::Incoming)).await;
        mount_project(&h.server, "p2", "outgoing").await;
        Mock::given(method("GET"))
            .and(path("/projects/p2/stats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&h.server)
            .await;

        let mut shell = ProjectShell::new(h.state.clone());
        assert!(!shell.switch_project(project("p2", ProjectType::Outgoing)).await);

        assert!(!shell.is_loading_project_details);
        assert!(h.history.current().is_none());
        assert_eq!(h.state.context.active_project_id().as_deref(), Some("p2"));
    }
}
