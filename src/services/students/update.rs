use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{
    STUDENT_LIST_PATH, StudentService, normalize_student_request, roll_number_conflict,
};
use crate::models::students::requests::StudentRequest;
use crate::models::students::responses::StudentResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    student_data: StudentRequest,
) -> ActixResult<HttpResponse> {
    let student_data = match normalize_student_request(student_data) {
        Ok(data) => data,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);

    // 学号不能与其他学生重复
    match storage
        .get_student_by_roll_number(&student_data.roll_number)
        .await
    {
        Ok(Some(other)) if other.id != student_id => {
            return Ok(roll_number_conflict(&student_data.roll_number));
        }
        Ok(_) => {}
        Err(e) => {
            error!("Failed to check roll number: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentUpdateFailed,
                    "Failed to update student",
                )),
            );
        }
    }

    let roll_number = student_data.roll_number.clone();
    match storage.update_student(student_id, student_data).await {
        Ok(Some(student)) => {
            info!("Student {} updated", student.id);
            Ok(HttpResponse::Ok().json(
                ApiResponse::success(StudentResponse { student }, "Student updated successfully.")
                    .redirect(STUDENT_LIST_PATH),
            ))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) if e.is_conflict() => Ok(roll_number_conflict(&roll_number)),
        Err(e) => {
            error!("Failed to update student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentUpdateFailed,
                    "Failed to update student",
                )),
            )
        }
    }
}
