use std::sync::Arc;

use crate::models::{
    progress::{
        entities::{ExamType, ProgressSheet, Subject},
        requests::NewProgressSheet,
    },
    students::{entities::Student, requests::StudentRequest},
    users::entities::{Account, NewAccount, Profile},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号与资料（同一事务）
    async fn create_account(&self, account: NewAccount) -> Result<(Account, Profile)>;
    // 通过ID获取账号
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>>;
    // 通过邮箱获取账号
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;
    // 获取账号资料
    async fn get_profile_by_account_id(&self, account_id: i64) -> Result<Option<Profile>>;
    // 标记账号已验证并清除验证码
    async fn mark_profile_verified(&self, account_id: i64) -> Result<bool>;
    // 更新最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 记录已注销的 token（按 jti），保留到 token 过期
    async fn revoke_token(&self, jti: &str, account_id: i64, expires_at: i64) -> Result<()>;
    // token 是否已注销
    async fn is_token_revoked(&self, jti: &str) -> Result<bool>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: StudentRequest) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生
    async fn get_student_by_roll_number(&self, roll_number: &str) -> Result<Option<Student>>;
    // 整体更新学生资料
    async fn update_student(&self, id: i64, update: StudentRequest) -> Result<Option<Student>>;
    // 删除学生（连同成绩单）
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 全部学生，按 ID 升序
    async fn list_all_students(&self) -> Result<Vec<Student>>;
    // 学生总数
    async fn count_students(&self) -> Result<i64>;

    /// 成绩单管理方法
    // 创建成绩单
    async fn create_progress_sheet(&self, sheet: NewProgressSheet) -> Result<ProgressSheet>;
    // 通过ID获取成绩单
    async fn get_progress_sheet_by_id(&self, id: i64) -> Result<Option<ProgressSheet>>;
    // 按 (学生, 考试类型, 科目) 查找成绩单
    async fn find_progress_sheet(
        &self,
        student_id: i64,
        exam_type: ExamType,
        subject: Subject,
    ) -> Result<Option<ProgressSheet>>;
    // 整体更新成绩单
    async fn update_progress_sheet(
        &self,
        id: i64,
        update: NewProgressSheet,
    ) -> Result<Option<ProgressSheet>>;
    // 删除成绩单
    async fn delete_progress_sheet(&self, id: i64) -> Result<bool>;
    // 全部成绩单（可按考试类型过滤），按 ID 升序
    async fn list_progress_sheets(&self, exam_type: Option<ExamType>) -> Result<Vec<ProgressSheet>>;
    // 某学生的成绩单，按 ID 升序
    async fn list_student_progress_sheets(&self, student_id: i64) -> Result<Vec<ProgressSheet>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
