pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{StudentListParams, StudentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_student_fields;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生列表（搜索、班级、考试类型筛选，分页）
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    // 新建学生
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: StudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    // 学生详情（含成绩汇总）
    pub async fn get_student_detail(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_student_detail(self, request, student_id).await
    }

    // 编辑学生
    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        student_data: StudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, student_data).await
    }

    // 删除学生
    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }
}

/// 学生列表页路径
pub const STUDENT_LIST_PATH: &str = "/api/v1/students";

/// 学生详情页路径
pub fn student_detail_path(student_id: i64) -> String {
    format!("/api/v1/students/{student_id}")
}

/// 去除首尾空白并校验，失败时返回 400 响应
pub(crate) fn normalize_student_request(
    student_data: StudentRequest,
) -> Result<StudentRequest, HttpResponse> {
    let normalized = StudentRequest {
        full_name: student_data.full_name.trim().to_string(),
        email: student_data.email.trim().to_string(),
        roll_number: student_data.roll_number.trim().to_string(),
        class_batch: student_data.class_batch.trim().to_string(),
        date_of_birth: student_data.date_of_birth,
    };

    validate_student_fields(
        &normalized.full_name,
        &normalized.email,
        &normalized.roll_number,
        &normalized.class_batch,
    )
    .map_err(|msg| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg))
    })?;

    Ok(normalized)
}

pub(crate) fn roll_number_conflict(roll_number: &str) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::StudentRollNumberExists,
        format!("A student with roll number '{roll_number}' already exists."),
    ))
}
