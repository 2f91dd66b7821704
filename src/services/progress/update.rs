use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ProgressService, duplicate_sheet_response, load_owned_sheet};
use crate::models::progress::requests::ProgressSheetRequest;
use crate::models::progress::responses::ProgressSheetResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::student_detail_path;
use crate::utils::validate::validate_marks;

pub async fn update_sheet(
    service: &ProgressService,
    request: &HttpRequest,
    student_id: i64,
    sheet_id: i64,
    sheet_data: ProgressSheetRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_owned_sheet(&storage, student_id, sheet_id).await {
        return Ok(response);
    }

    if let Err(msg) = validate_marks(sheet_data.marks) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProgressSheetInvalid,
            msg,
        )));
    }

    let exam_type = sheet_data.exam_type;
    let subject = sheet_data.subject;

    // 与自身相同的组合不算重复
    match storage
        .find_progress_sheet(student_id, exam_type, subject)
        .await
    {
        Ok(Some(other)) if other.id != sheet_id => {
            return Ok(duplicate_sheet_response(
                student_id,
                exam_type,
                subject,
                Some(other.id),
            ));
        }
        Ok(_) => {}
        Err(e) => {
            error!("Failed to look up progress sheet: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProgressSheetUpdateFailed,
                    "Failed to update progress sheet",
                )),
            );
        }
    }

    match storage
        .update_progress_sheet(sheet_id, sheet_data.for_student(student_id))
        .await
    {
        Ok(Some(sheet)) => {
            info!("Progress sheet {} updated", sheet.id);
            Ok(HttpResponse::Ok().json(
                ApiResponse::success(
                    ProgressSheetResponse { sheet },
                    "Progress sheet updated successfully.",
                )
                .redirect(student_detail_path(student_id)),
            ))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProgressSheetNotFound,
            "Progress sheet not found",
        ))),
        Err(e) if e.is_conflict() => Ok(duplicate_sheet_response(
            student_id, exam_type, subject, None,
        )),
        Err(e) => {
            error!("Failed to update progress sheet {}: {}", sheet_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProgressSheetUpdateFailed,
                    "Failed to update progress sheet",
                )),
            )
        }
    }
}
