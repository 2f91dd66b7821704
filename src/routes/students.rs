use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::progress::requests::ProgressSheetRequest;
use crate::models::students::requests::{StudentListParams, StudentRequest};
use crate::services::{ProgressService, StudentService};
use crate::utils::{SafeIDI64, SafeSheetIdI64};

// 懒加载的全局服务实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static PROGRESS_SERVICE: Lazy<ProgressService> = Lazy::new(ProgressService::new_lazy);

// HTTP处理程序
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<StudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn get_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student_detail(&req, student_id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeIDI64,
    student_data: web::Json<StudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, student_id.0, student_data.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, student_id.0).await
}

pub async fn create_sheet(
    req: HttpRequest,
    student_id: SafeIDI64,
    sheet_data: web::Json<ProgressSheetRequest>,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .create_sheet(&req, student_id.0, sheet_data.into_inner())
        .await
}

pub async fn get_sheet(
    req: HttpRequest,
    student_id: SafeIDI64,
    sheet_id: SafeSheetIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .get_sheet(&req, student_id.0, sheet_id.0)
        .await
}

pub async fn update_sheet(
    req: HttpRequest,
    student_id: SafeIDI64,
    sheet_id: SafeSheetIdI64,
    sheet_data: web::Json<ProgressSheetRequest>,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .update_sheet(&req, student_id.0, sheet_id.0, sheet_data.into_inner())
        .await
}

pub async fn delete_sheet(
    req: HttpRequest,
    student_id: SafeIDI64,
    sheet_id: SafeSheetIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .delete_sheet(&req, student_id.0, sheet_id.0)
        .await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(web::resource("/{id}").route(web::get().to(get_student)))
            .service(web::resource("/{id}/edit").route(web::post().to(update_student)))
            .service(web::resource("/{id}/delete").route(web::post().to(delete_student)))
            // 成绩单
            .service(web::resource("/{id}/progress").route(web::post().to(create_sheet)))
            .service(web::resource("/{id}/progress/{sheet_id}").route(web::get().to(get_sheet)))
            .service(
                web::resource("/{id}/progress/{sheet_id}/edit")
                    .route(web::post().to(update_sheet)),
            )
            .service(
                web::resource("/{id}/progress/{sheet_id}/delete")
                    .route(web::post().to(delete_sheet)),
            ),
    );
}
