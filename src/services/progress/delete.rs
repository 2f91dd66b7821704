use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ProgressService, load_owned_sheet};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::student_detail_path;

pub async fn delete_sheet(
    service: &ProgressService,
    request: &HttpRequest,
    student_id: i64,
    sheet_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_owned_sheet(&storage, student_id, sheet_id).await {
        return Ok(response);
    }

    match storage.delete_progress_sheet(sheet_id).await {
        Ok(true) => {
            info!("Progress sheet {} deleted", sheet_id);
            Ok(HttpResponse::Ok().json(
                ApiResponse::<()>::success_empty("Progress sheet deleted successfully.")
                    .redirect(student_detail_path(student_id)),
            ))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProgressSheetNotFound,
            "Progress sheet not found",
        ))),
        Err(e) => {
            error!("Failed to delete progress sheet {}: {}", sheet_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProgressSheetDeleteFailed,
                    "Failed to delete progress sheet",
                )),
            )
        }
    }
}
