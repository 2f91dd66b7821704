pub mod auth;
pub mod dashboard;
pub mod progress;
pub mod students;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use progress::ProgressService;
pub use students::StudentService;
