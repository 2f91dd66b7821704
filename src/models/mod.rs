//! 数据模型定义
//!
//! - `entities`：业务实体
//! - `requests`：HTTP 请求体 / 查询参数
//! - `responses`：HTTP 响应体

pub mod auth;
pub mod common;
pub mod dashboard;
pub mod progress;
pub mod students;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000+
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证错误 2000+
    AuthFailed = 2000,
    RegisterFailed = 2001,
    PasswordMismatch = 2002,
    PasswordPolicyViolation = 2003,
    AccountNotFound = 2004,
    VerificationFailed = 2005,

    // 账号错误 3000+
    UserEmailInvalid = 3001,
    UserEmailAlreadyExists = 3002,

    // 学生错误 4000+
    StudentNotFound = 4000,
    StudentInvalid = 4001,
    StudentRollNumberExists = 4002,
    StudentCreationFailed = 4003,
    StudentUpdateFailed = 4004,
    StudentDeleteFailed = 4005,

    // 成绩单错误 5000+
    ProgressSheetNotFound = 5000,
    ProgressSheetInvalid = 5001,
    ProgressSheetAlreadyExists = 5002,
    ProgressSheetCreationFailed = 5003,
    ProgressSheetUpdateFailed = 5004,
    ProgressSheetDeleteFailed = 5005,
}
