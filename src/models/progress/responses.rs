use super::entities::ProgressSheet;
use serde::Serialize;
use ts_rs::TS;

// 成绩单响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressSheetResponse {
    pub sheet: ProgressSheet,
}

// 新建成绩单冲突时返回已有记录，客户端据此跳转到编辑
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressSheetConflict {
    pub student_id: i64,
    pub existing_sheet_id: Option<i64>,
}
