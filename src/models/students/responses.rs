use super::entities::Student;
use crate::models::PaginatedResponse;
use crate::models::progress::entities::{ExamType, ProgressSheet};
use serde::Serialize;
use ts_rs::TS;

// 学生响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentResponse {
    pub student: Student,
}

// 下拉框选项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

// 学生列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListResponse {
    pub students: PaginatedResponse<Student>,
    pub exam_types: Vec<ChoiceOption>,
    pub all_classes: Vec<String>,
    pub selected_exam: String,
    pub search_query: String,
    pub selected_class: String,
}

// 按考试类型分组的成绩单
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ExamGroup {
    pub exam_type: ExamType,
    pub label: String,
    pub sheets: Vec<ProgressSheet>,
}

// 学生详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentDetailResponse {
    pub student: Student,
    pub exam_data: Vec<ExamGroup>,
    pub total_marks: f64,
    pub average_score: f64,
}
