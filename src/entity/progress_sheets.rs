//! 成绩单实体

use sea_orm::entity::prelude::*;

use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "progress_sheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub exam_type: String,
    pub subject: String,
    pub marks: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_progress_sheet(
        self,
    ) -> crate::errors::Result<crate::models::progress::entities::ProgressSheet> {
        use crate::models::progress::entities::{ExamType, ProgressSheet, Subject};
        use chrono::{DateTime, Utc};

        let exam_type = self
            .exam_type
            .parse::<ExamType>()
            .map_err(AppError::serialization)?;
        let subject = self
            .subject
            .parse::<Subject>()
            .map_err(AppError::serialization)?;

        Ok(ProgressSheet {
            id: self.id,
            student_id: self.student_id,
            exam_type,
            subject,
            marks: self.marks,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
