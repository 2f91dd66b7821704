//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[sea_orm(unique)]
    pub roll_number: String,
    pub class_batch: String,
    pub date_of_birth: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::progress_sheets::Entity")]
    ProgressSheets,
}

impl Related<super::progress_sheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProgressSheets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 出生日期的存储格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl Model {
    pub fn into_student(self) -> crate::errors::Result<crate::models::students::entities::Student> {
        use crate::models::students::entities::Student;
        use chrono::{DateTime, NaiveDate, Utc};

        Ok(Student {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            roll_number: self.roll_number,
            class_batch: self.class_batch,
            date_of_birth: NaiveDate::parse_from_str(&self.date_of_birth, DATE_FORMAT)?,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
