use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
//
// `redirect_to` 指明客户端接下来应展示的视图（例如新建成绩单冲突时回到学生详情页），
// 没有后续视图时省略。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub redirect_to: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            redirect_to: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            redirect_to: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 附加后续视图路径
    pub fn redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            redirect_to: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            redirect_to: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_is_omitted_when_absent() {
        let json = serde_json::to_value(ApiResponse::success_empty("ok")).unwrap();
        assert_eq!(json["code"], 0);
        assert!(json.get("redirect_to").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_redirect_is_serialized() {
        let resp = ApiResponse::error_empty(ErrorCode::ProgressSheetAlreadyExists, "exists")
            .redirect("/api/v1/students/1");
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["code"], ErrorCode::ProgressSheetAlreadyExists as i32);
        assert_eq!(json["redirect_to"], "/api/v1/students/1");
    }
}
