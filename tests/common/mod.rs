#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use convoy_dashboard::config::Config;
use convoy_dashboard::models::{Project, ProjectType};
use convoy_dashboard::router::{History, Navigator, Route};
use convoy_dashboard::storage::{MemoryStorage, Storage, PROJECT_KEY};
use convoy_dashboard::{DashboardError, DashboardState};
use serde_json::{json, Value};
use wiremock::MockServer;

pub struct Harness {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub history: Arc<History>,
    pub state: Arc<DashboardState>,
}

impl Harness {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        Self::with_storage(server, storage)
    }

    /// Start with `project` already persisted as the active project.
    pub async fn with_active_project(project: &Project) -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(PROJECT_KEY, &serde_json::to_string(project).unwrap())
            .unwrap();
        Self::with_storage(server, storage)
    }

    /// Start with a backend that fails every write to `refused`.
    pub async fn refusing_writes_to(refused: &'static str) -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        let backend = Arc::new(RefusingStorage {
            inner: storage.clone(),
            refused,
        });
        Self::with_backend(server, storage, backend)
    }

    fn with_storage(server: MockServer, storage: Arc<MemoryStorage>) -> Self {
        Self::with_backend(server, storage.clone(), storage)
    }

    fn with_backend(
        server: MockServer,
        storage: Arc<MemoryStorage>,
        backend: Arc<dyn Storage>,
    ) -> Self {
        let history = Arc::new(History::new());
        let config = Config::with_api_url(server.uri()).unwrap();
        let state = DashboardState::new(config, backend, history.clone()).unwrap();
        Self {
            server,
            storage,
            history,
            state,
        }
    }

    pub fn raw(&self, key: &str) -> Option<Value> {
        self.storage
            .get(key)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }
}

/// Memory storage that fails writes to a single key.
pub struct RefusingStorage {
    pub inner: Arc<MemoryStorage>,
    pub refused: &'static str,
}

impl Storage for RefusingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DashboardError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DashboardError> {
        if key == self.refused {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), DashboardError> {
        self.inner.remove(key)
    }
}

/// Navigator that records, for every navigation, what `CONVOY_PROJECT`
/// held at that moment.
pub struct SnapshotNavigator {
    pub storage: Arc<MemoryStorage>,
    pub seen: Mutex<Vec<(Route, Option<String>)>>,
}

impl Navigator for SnapshotNavigator {
    fn navigate(&self, route: Route) {
        let stored = self.storage.get(PROJECT_KEY).unwrap();
        self.seen.lock().unwrap().push((route, stored));
    }
}

pub fn envelope(data: Value) -> Value {
    json!({ "status": true, "message": "ok", "data": data })
}

pub fn envelope_with_message(message: &str, data: Value) -> Value {
    json!({ "status": true, "message": message, "data": data })
}

pub fn error_body(message: &str) -> Value {
    json!({ "status": false, "message": message })
}

pub fn project_json(uid: &str, project_type: &str) -> Value {
    json!({
        "uid": uid,
        "name": format!("Project {}", uid),
        "type": project_type,
    })
}

pub fn project(uid: &str, project_type: ProjectType) -> Project {
    serde_json::from_value(project_json(uid, project_type.as_str())).unwrap()
}

pub fn session_json(access_token: &str) -> Value {
    json!({
        "uid": "usr_1",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "role": { "type": "super_user", "project": "" },
        "token": {
            "access_token": access_token,
            "refresh_token": "refresh-1",
        },
    })
}

pub fn app_json(uid: &str, endpoint_ids: &[&str]) -> Value {
    let endpoints: Vec<Value> = endpoint_ids
        .iter()
        .map(|id| {
            json!({
                "uid": id,
                "target_url": format!("https://hooks.example.com/{}", id),
                "description": "orders",
                "secret": format!("secret-{}", id),
                "status": "active",
            })
        })
        .collect();
    json!({
        "uid": uid,
        "group_id": "p1",
        "name": "Billing",
        "support_email": "billing@example.com",
        "is_disabled": false,
        "endpoints": endpoints,
    })
}

pub fn subscriptions_page(uids: &[&str]) -> Value {
    let content: Vec<Value> = uids
        .iter()
        .map(|uid| json!({ "uid": uid, "name": format!("sub {}", uid), "status": "active" }))
        .collect();
    json!({
        "content": content,
        "pagination": {
            "total": uids.len(),
            "page": 1,
            "per_page": 20,
            "prev": 0,
            "next": 0,
            "totalPage": 1,
        },
    })
}
