use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{
    STUDENT_LIST_PATH, StudentService, normalize_student_request, roll_number_conflict,
};
use crate::models::students::requests::StudentRequest;
use crate::models::students::responses::StudentResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: StudentRequest,
) -> ActixResult<HttpResponse> {
    let student_data = match normalize_student_request(student_data) {
        Ok(data) => data,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);

    // 学号唯一
    match storage
        .get_student_by_roll_number(&student_data.roll_number)
        .await
    {
        Ok(Some(_)) => return Ok(roll_number_conflict(&student_data.roll_number)),
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check roll number: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentCreationFailed,
                    "Failed to create student",
                )),
            );
        }
    }

    let roll_number = student_data.roll_number.clone();
    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} created", student.id);
            Ok(HttpResponse::Created().json(
                ApiResponse::success(StudentResponse { student }, "Student added successfully.")
                    .redirect(STUDENT_LIST_PATH),
            ))
        }
        Err(e) if e.is_conflict() => Ok(roll_number_conflict(&roll_number)),
        Err(e) => {
            error!("Failed to create student: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentCreationFailed,
                    "Failed to create student",
                )),
            )
        }
    }
}
