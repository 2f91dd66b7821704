use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ProgressService, duplicate_sheet_response};
use crate::models::progress::requests::ProgressSheetRequest;
use crate::models::progress::responses::ProgressSheetResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::student_detail_path;
use crate::utils::validate::validate_marks;

pub async fn create_sheet(
    service: &ProgressService,
    request: &HttpRequest,
    student_id: i64,
    sheet_data: ProgressSheetRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            error!("Failed to get student {}: {}", student_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProgressSheetCreationFailed,
                    "Failed to create progress sheet",
                )),
            );
        }
    }

    if let Err(msg) = validate_marks(sheet_data.marks) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProgressSheetInvalid,
            msg,
        )));
    }

    let exam_type = sheet_data.exam_type;
    let subject = sheet_data.subject;

    // 先查重，给出带已有记录的提示
    match storage
        .find_progress_sheet(student_id, exam_type, subject)
        .await
    {
        Ok(Some(existing)) => {
            return Ok(duplicate_sheet_response(
                student_id,
                exam_type,
                subject,
                Some(existing.id),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to look up progress sheet: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProgressSheetCreationFailed,
                    "Failed to create progress sheet",
                )),
            );
        }
    }

    match storage
        .create_progress_sheet(sheet_data.for_student(student_id))
        .await
    {
        Ok(sheet) => {
            info!(
                "Progress sheet {} created for student {}",
                sheet.id, student_id
            );
            Ok(HttpResponse::Created().json(
                ApiResponse::success(
                    ProgressSheetResponse { sheet },
                    "Progress sheet added successfully.",
                )
                .redirect(student_detail_path(student_id)),
            ))
        }
        Err(e) if e.is_conflict() => {
            // 并发写入时由唯一索引兜底
            let existing = storage
                .find_progress_sheet(student_id, exam_type, subject)
                .await
                .ok()
                .flatten()
                .map(|s| s.id);
            Ok(duplicate_sheet_response(
                student_id, exam_type, subject, existing,
            ))
        }
        Err(e) => {
            error!("Failed to create progress sheet: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProgressSheetCreationFailed,
                    "Failed to create progress sheet",
                )),
            )
        }
    }
}
