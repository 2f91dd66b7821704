use super::entities::{ExamType, Subject};
use serde::Deserialize;
use ts_rs::TS;

// 成绩单创建/编辑请求（学生由路径指定）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressSheetRequest {
    pub exam_type: ExamType,
    pub subject: Subject,
    pub marks: f64,
}

// 存储层写入成绩单使用
#[derive(Debug, Clone)]
pub struct NewProgressSheet {
    pub student_id: i64,
    pub exam_type: ExamType,
    pub subject: Subject,
    pub marks: f64,
}

impl ProgressSheetRequest {
    pub fn for_student(self, student_id: i64) -> NewProgressSheet {
        NewProgressSheet {
            student_id,
            exam_type: self.exam_type,
            subject: self.subject,
            marks: self.marks,
        }
    }
}
