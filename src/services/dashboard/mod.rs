use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::analytics::{round2, top_performer};
use crate::models::dashboard::responses::{DashboardResponse, TopPerformer};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    /// 学生总数与平均分最高的学生
    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        let snapshot = async {
            let total_students = storage.count_students().await?;
            let students = storage.list_all_students().await?;
            let sheets = storage.list_progress_sheets(None).await?;
            Ok::<_, crate::errors::AppError>((total_students, students, sheets))
        }
        .await;

        let (total_students, students, sheets) = match snapshot {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to load dashboard: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to load dashboard",
                    )),
                );
            }
        };

        let top_performer = top_performer(&students, &sheets).map(|(student, average)| {
            TopPerformer {
                student: student.clone(),
                average: round2(average),
            }
        });

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            DashboardResponse {
                total_students,
                top_performer,
            },
            "Dashboard retrieved successfully",
        )))
    }
}
