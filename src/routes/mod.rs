pub mod auth;

pub mod dashboard;

pub mod students;

pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use students::configure_students_routes;
