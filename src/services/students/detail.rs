use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::analytics::summarize_student;
use crate::models::students::responses::StudentDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_student_detail(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
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
                    ErrorCode::InternalServerError,
                    "Failed to get student information",
                )),
            );
        }
    };

    let sheets = match storage.list_student_progress_sheets(student_id).await {
        Ok(sheets) => sheets,
        Err(e) => {
            error!("Failed to list progress sheets of student {}: {}", student_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get student information",
                )),
            );
        }
    };

    let summary = summarize_student(sheets);
    let response = StudentDetailResponse {
        student,
        exam_data: summary.exam_data,
        total_marks: summary.total_marks,
        average_score: summary.average_score,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Student information retrieved successfully",
    )))
}
