use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProgressService, load_owned_sheet};
use crate::models::ApiResponse;
use crate::models::progress::responses::ProgressSheetResponse;

pub async fn get_sheet(
    service: &ProgressService,
    request: &HttpRequest,
    student_id: i64,
    sheet_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_owned_sheet(&storage, student_id, sheet_id).await {
        Ok(sheet) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProgressSheetResponse { sheet },
            "Progress sheet retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}
