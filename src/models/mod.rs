pub mod app;
pub mod auth;
pub mod envelope;
pub mod project;
pub mod subscription;

pub use app::{Application, Endpoint, KeyRequest, PortalKey};
pub use auth::{AuthPayload, LoginRequest, Organisation, Session, Token};
pub use envelope::{ApiResponse, Paginated, Pagination};
pub use project::{CreateProjectResponse, NewProject, Project, ProjectStatistics, ProjectType};
pub use subscription::Subscription;
