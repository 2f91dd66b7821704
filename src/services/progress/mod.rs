pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use super::students::student_detail_path;
use crate::models::progress::entities::{ExamType, ProgressSheet, Subject};
use crate::models::progress::requests::ProgressSheetRequest;
use crate::models::progress::responses::ProgressSheetConflict;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ProgressService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProgressService {
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

    // 为学生新建成绩单
    pub async fn create_sheet(
        &self,
        request: &HttpRequest,
        student_id: i64,
        sheet_data: ProgressSheetRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_sheet(self, request, student_id, sheet_data).await
    }

    // 获取成绩单
    pub async fn get_sheet(
        &self,
        request: &HttpRequest,
        student_id: i64,
        sheet_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_sheet(self, request, student_id, sheet_id).await
    }

    // 编辑成绩单
    pub async fn update_sheet(
        &self,
        request: &HttpRequest,
        student_id: i64,
        sheet_id: i64,
        sheet_data: ProgressSheetRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_sheet(self, request, student_id, sheet_id, sheet_data).await
    }

    // 删除成绩单
    pub async fn delete_sheet(
        &self,
        request: &HttpRequest,
        student_id: i64,
        sheet_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_sheet(self, request, student_id, sheet_id).await
    }
}

/// 同一 (学生, 考试, 科目) 已有成绩单时的 409 响应，引导客户端回到学生详情页
pub(crate) fn duplicate_sheet_response(
    student_id: i64,
    exam_type: ExamType,
    subject: Subject,
    existing_sheet_id: Option<i64>,
) -> HttpResponse {
    HttpResponse::Conflict().json(
        ApiResponse::error(
            ErrorCode::ProgressSheetAlreadyExists,
            ProgressSheetConflict {
                student_id,
                existing_sheet_id,
            },
            format!(
                "A progress sheet already exists for {} exam in {} subject. \
                 Please edit the existing entry instead.",
                exam_type.label(),
                subject.label()
            ),
        )
        .redirect(student_detail_path(student_id)),
    )
}

/// 加载属于指定学生的成绩单，不存在或不属于该学生时返回 404 响应
pub(crate) async fn load_owned_sheet(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    sheet_id: i64,
) -> Result<ProgressSheet, HttpResponse> {
    match storage.get_progress_sheet_by_id(sheet_id).await {
        Ok(Some(sheet)) if sheet.student_id == student_id => Ok(sheet),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProgressSheetNotFound,
            "Progress sheet not found",
        ))),
        Err(e) => {
            error!("Failed to get progress sheet {}: {}", sheet_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get progress sheet",
                )),
            )
        }
    }
}
