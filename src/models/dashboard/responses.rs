use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

// 成绩最好的学生
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct TopPerformer {
    pub student: Student,
    pub average: f64,
}

// 仪表盘响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct DashboardResponse {
    pub total_students: i64,
    pub top_performer: Option<TopPerformer>,
}
