use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::analytics::{ListingFilters, distinct_classes, filter_and_rank};
use crate::config::AppConfig;
use crate::models::common::paginate;
use crate::models::progress::entities::ExamType;
use crate::models::students::requests::StudentListParams;
use crate::models::students::responses::{ChoiceOption, StudentListResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentListParams,
) -> ActixResult<HttpResponse> {
    let filters = match ListingFilters::from_params(&query) {
        Ok(filters) => filters,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    };

    let storage = service.get_storage(request);

    let students = match storage.list_all_students().await {
        Ok(students) => students,
        Err(e) => {
            error!("Failed to list students: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list students",
                )),
            );
        }
    };

    // 只有按考试类型排序时才需要成绩单
    let sheets = match filters.exam_type {
        Some(exam_type) => match storage.list_progress_sheets(Some(exam_type)).await {
            Ok(sheets) => sheets,
            Err(e) => {
                error!("Failed to list progress sheets: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to list students",
                    )),
                );
            }
        },
        None => Vec::new(),
    };

    let all_classes = distinct_classes(&students);
    let ranked = filter_and_rank(students, &sheets, &filters);

    let response = StudentListResponse {
        students: paginate(
            ranked,
            query.page.as_deref(),
            AppConfig::get().listing.page_size,
        ),
        exam_types: ExamType::all()
            .iter()
            .map(|exam| ChoiceOption {
                value: exam.as_str().to_string(),
                label: exam.label().to_string(),
            })
            .collect(),
        all_classes,
        selected_exam: query.exam_type.unwrap_or_default(),
        search_query: query.search.unwrap_or_default(),
        selected_class: query.class_batch.unwrap_or_default(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Students retrieved successfully",
    )))
}
