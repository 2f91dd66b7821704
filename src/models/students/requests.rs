use serde::Deserialize;
use ts_rs::TS;

// 学生列表查询参数（来自HTTP请求）
//
// 所有参数均允许为空字符串，空值等同于不筛选。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    pub search: Option<String>,
    #[serde(rename = "class")]
    pub class_batch: Option<String>,
    pub exam_type: Option<String>,
    pub page: Option<String>,
}

// 学生创建/编辑请求（编辑为整体替换）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentRequest {
    pub full_name: String,
    pub email: String,
    pub roll_number: String,
    pub class_batch: String,
    pub date_of_birth: chrono::NaiveDate,
}
