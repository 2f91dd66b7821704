use super::SeaOrmStorage;
use crate::entity::progress_sheets::{Column as SheetColumn, Entity as ProgressSheets};
use crate::entity::students::{ActiveModel, Column, DATE_FORMAT, Entity as Students};
use crate::errors::{AppError, Result};
use crate::models::students::{entities::Student, requests::StudentRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: StudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            full_name: Set(req.full_name),
            email: Set(req.email),
            roll_number: Set(req.roll_number),
            class_batch: Set(req.class_batch),
            date_of_birth: Set(req.date_of_birth.format(DATE_FORMAT).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db_err(e, "创建学生失败"))?;

        result.into_student()
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询学生失败: {e}")))?;

        result.map(|m| m.into_student()).transpose()
    }

    /// 通过学号获取学生
    pub async fn get_student_by_roll_number_impl(&self, roll_number: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::RollNumber.eq(roll_number))
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询学生失败: {e}")))?;

        result.map(|m| m.into_student()).transpose()
    }

    /// 整体更新学生资料
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: StudentRequest,
    ) -> Result<Option<Student>> {
        // 先检查学生是否存在
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            full_name: Set(update.full_name),
            email: Set(update.email),
            roll_number: Set(update.roll_number),
            class_batch: Set(update.class_batch),
            date_of_birth: Set(update.date_of_birth.format(DATE_FORMAT).to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_db_err(e, "更新学生失败"))?;

        result.into_student().map(Some)
    }

    /// 删除学生，先删除其成绩单
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::database_operation(format!("开启事务失败: {e}")))?;

        ProgressSheets::delete_many()
            .filter(SheetColumn::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::database_operation(format!("删除学生成绩单失败: {e}")))?;

        let result = Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AppError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 全部学生
    pub async fn list_all_students_impl(&self) -> Result<Vec<Student>> {
        let models = Students::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询学生列表失败: {e}")))?;

        models.into_iter().map(|m| m.into_student()).collect()
    }

    /// 学生总数
    pub async fn count_students_impl(&self) -> Result<i64> {
        let count = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::entities::{ExamType, Subject};
    use crate::models::progress::requests::NewProgressSheet;
    use chrono::NaiveDate;

    async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::connect("sqlite::memory:", 1, 5).await.unwrap()
    }

    fn request(roll: &str) -> StudentRequest {
        StudentRequest {
            full_name: "Asha Rao".to_string(),
            email: "asha@school.edu".to_string(),
            roll_number: roll.to_string(),
            class_batch: "10A".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 5, 17).unwrap(),
        }
    }

    #[actix_web::test]
    async fn test_create_and_read_back() {
        let storage = storage().await;
        let created = storage.create_student_impl(request("R-01")).await.unwrap();

        let found = storage
            .get_student_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, created);
        assert_eq!(found.date_of_birth, NaiveDate::from_ymd_opt(2010, 5, 17).unwrap());

        let by_roll = storage
            .get_student_by_roll_number_impl("R-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_roll.id, created.id);
    }

    #[actix_web::test]
    async fn test_duplicate_roll_number_is_conflict() {
        let storage = storage().await;
        storage.create_student_impl(request("R-01")).await.unwrap();

        let err = storage.create_student_impl(request("R-01")).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(storage.count_students_impl().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_update_missing_student() {
        let storage = storage().await;
        assert!(
            storage
                .update_student_impl(42, request("R-01"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn test_update_replaces_fields() {
        let storage = storage().await;
        let created = storage.create_student_impl(request("R-01")).await.unwrap();

        let mut update = request("R-99");
        update.class_batch = "11B".to_string();
        let updated = storage
            .update_student_impl(created.id, update)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.roll_number, "R-99");
        assert_eq!(updated.class_batch, "11B");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[actix_web::test]
    async fn test_delete_removes_sheets() {
        let storage = storage().await;
        let student = storage.create_student_impl(request("R-01")).await.unwrap();
        let other = storage.create_student_impl(request("R-02")).await.unwrap();

        for (student_id, subject) in [(student.id, Subject::English), (other.id, Subject::Science)] {
            storage
                .create_progress_sheet_impl(NewProgressSheet {
                    student_id,
                    exam_type: ExamType::Midterm,
                    subject,
                    marks: 70.0,
                })
                .await
                .unwrap();
        }

        assert!(storage.delete_student_impl(student.id).await.unwrap());
        assert!(!storage.delete_student_impl(student.id).await.unwrap());

        let remaining = storage.list_progress_sheets_impl(None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].student_id, other.id);
    }

    #[actix_web::test]
    async fn test_list_in_id_order() {
        let storage = storage().await;
        let a = storage.create_student_impl(request("R-01")).await.unwrap();
        let b = storage.create_student_impl(request("R-02")).await.unwrap();

        let ids: Vec<i64> = storage
            .list_all_students_impl()
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(storage.count_students_impl().await.unwrap(), 2);
    }
}
