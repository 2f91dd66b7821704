use super::SeaOrmStorage;
use crate::entity::progress_sheets::{ActiveModel, Column, Entity as ProgressSheets};
use crate::errors::{AppError, Result};
use crate::models::progress::{
    entities::{ExamType, ProgressSheet, Subject},
    requests::NewProgressSheet,
};
use crate::utils::validate::validate_marks;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建成绩单
    ///
    /// 分数在写入前再校验一次；三元组重复由唯一索引拒绝并映射为 Conflict。
    pub async fn create_progress_sheet_impl(&self, req: NewProgressSheet) -> Result<ProgressSheet> {
        validate_marks(req.marks).map_err(AppError::validation)?;

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            exam_type: Set(req.exam_type.to_string()),
            subject: Set(req.subject.to_string()),
            marks: Set(req.marks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db_err(e, "创建成绩单失败"))?;

        result.into_progress_sheet()
    }

    /// 通过 ID 获取成绩单
    pub async fn get_progress_sheet_by_id_impl(&self, id: i64) -> Result<Option<ProgressSheet>> {
        let result = ProgressSheets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询成绩单失败: {e}")))?;

        result.map(|m| m.into_progress_sheet()).transpose()
    }

    /// 按 (学生, 考试类型, 科目) 查找
    pub async fn find_progress_sheet_impl(
        &self,
        student_id: i64,
        exam_type: ExamType,
        subject: Subject,
    ) -> Result<Option<ProgressSheet>> {
        let result = ProgressSheets::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ExamType.eq(exam_type.as_str()))
            .filter(Column::Subject.eq(subject.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询成绩单失败: {e}")))?;

        result.map(|m| m.into_progress_sheet()).transpose()
    }

    /// 整体更新成绩单
    pub async fn update_progress_sheet_impl(
        &self,
        id: i64,
        update: NewProgressSheet,
    ) -> Result<Option<ProgressSheet>> {
        validate_marks(update.marks).map_err(AppError::validation)?;

        if self.get_progress_sheet_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            student_id: Set(update.student_id),
            exam_type: Set(update.exam_type.to_string()),
            subject: Set(update.subject.to_string()),
            marks: Set(update.marks),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_db_err(e, "更新成绩单失败"))?;

        result.into_progress_sheet().map(Some)
    }

    /// 删除成绩单
    pub async fn delete_progress_sheet_impl(&self, id: i64) -> Result<bool> {
        let result = ProgressSheets::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("删除成绩单失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 全部成绩单，可按考试类型过滤
    pub async fn list_progress_sheets_impl(
        &self,
        exam_type: Option<ExamType>,
    ) -> Result<Vec<ProgressSheet>> {
        let mut select = ProgressSheets::find();
        if let Some(exam_type) = exam_type {
            select = select.filter(Column::ExamType.eq(exam_type.as_str()));
        }

        let models = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询成绩单列表失败: {e}")))?;

        models.into_iter().map(|m| m.into_progress_sheet()).collect()
    }

    /// 某学生的全部成绩单
    pub async fn list_student_progress_sheets_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<ProgressSheet>> {
        let models = ProgressSheets::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询学生成绩单失败: {e}")))?;

        models.into_iter().map(|m| m.into_progress_sheet()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::StudentRequest;
    use chrono::NaiveDate;

    async fn storage_with_student() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5).await.unwrap();
        let student = storage
            .create_student_impl(StudentRequest {
                full_name: "Asha Rao".to_string(),
                email: "asha@school.edu".to_string(),
                roll_number: "R-01".to_string(),
                class_batch: "10A".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2010, 5, 17).unwrap(),
            })
            .await
            .unwrap();
        (storage, student.id)
    }

    fn sheet(student_id: i64, exam_type: ExamType, subject: Subject, marks: f64) -> NewProgressSheet {
        NewProgressSheet {
            student_id,
            exam_type,
            subject,
            marks,
        }
    }

    #[actix_web::test]
    async fn test_unique_triple_is_enforced_by_store() {
        let (storage, student_id) = storage_with_student().await;
        storage
            .create_progress_sheet_impl(sheet(student_id, ExamType::Quarterly, Subject::Mathematics, 80.0))
            .await
            .unwrap();

        let err = storage
            .create_progress_sheet_impl(sheet(student_id, ExamType::Quarterly, Subject::Mathematics, 60.0))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let all = storage.list_progress_sheets_impl(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].marks, 80.0);
    }

    #[actix_web::test]
    async fn test_model_layer_rejects_bad_marks() {
        let (storage, student_id) = storage_with_student().await;

        for marks in [150.0, -1.0, 85.555, f64::NAN] {
            let err = storage
                .create_progress_sheet_impl(sheet(student_id, ExamType::Model, Subject::Science, marks))
                .await
                .unwrap_err();
            assert_eq!(err.code(), "E007");
        }
        assert!(storage.list_progress_sheets_impl(None).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_decimal_marks_round_trip() {
        let (storage, student_id) = storage_with_student().await;
        let created = storage
            .create_progress_sheet_impl(sheet(student_id, ExamType::EndTerm, Subject::English, 85.55))
            .await
            .unwrap();

        let found = storage
            .find_progress_sheet_impl(student_id, ExamType::EndTerm, Subject::English)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.marks, 85.55);
    }

    #[actix_web::test]
    async fn test_update_onto_other_triple_is_conflict() {
        let (storage, student_id) = storage_with_student().await;
        storage
            .create_progress_sheet_impl(sheet(student_id, ExamType::Midterm, Subject::English, 50.0))
            .await
            .unwrap();
        let second = storage
            .create_progress_sheet_impl(sheet(student_id, ExamType::Midterm, Subject::Science, 60.0))
            .await
            .unwrap();

        // 保持自身三元组可以更新
        let updated = storage
            .update_progress_sheet_impl(
                second.id,
                sheet(student_id, ExamType::Midterm, Subject::Science, 65.0),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.marks, 65.0);

        let err = storage
            .update_progress_sheet_impl(
                second.id,
                sheet(student_id, ExamType::Midterm, Subject::English, 65.0),
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[actix_web::test]
    async fn test_list_filtered_by_exam_type() {
        let (storage, student_id) = storage_with_student().await;
        storage
            .create_progress_sheet_impl(sheet(student_id, ExamType::Midterm, Subject::English, 50.0))
            .await
            .unwrap();
        storage
            .create_progress_sheet_impl(sheet(student_id, ExamType::Model, Subject::English, 70.0))
            .await
            .unwrap();

        let midterm = storage
            .list_progress_sheets_impl(Some(ExamType::Midterm))
            .await
            .unwrap();
        assert_eq!(midterm.len(), 1);
        assert_eq!(midterm[0].exam_type, ExamType::Midterm);

        assert_eq!(
            storage
                .list_student_progress_sheets_impl(student_id)
                .await
                .unwrap()
                .len(),
            2
        );
        assert!(storage.delete_progress_sheet_impl(midterm[0].id).await.unwrap());
    }
}
