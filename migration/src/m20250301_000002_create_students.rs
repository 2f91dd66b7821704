use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 学生表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::FullName).string_len(100).not_null())
                    .col(ColumnDef::new(Students::Email).string().not_null())
                    .col(
                        ColumnDef::new(Students::RollNumber)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::ClassBatch).string_len(50).not_null())
                    // YYYY-MM-DD，字典序即日期序
                    .col(ColumnDef::new(Students::DateOfBirth).string_len(10).not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // ==================== 成绩单表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ProgressSheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProgressSheets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProgressSheets::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressSheets::ExamType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressSheets::Subject)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProgressSheets::Marks).double().not_null())
                    .col(
                        ColumnDef::new(ProgressSheets::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressSheets::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProgressSheets::Table, ProgressSheets::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class_batch")
                    .table(Students::Table)
                    .col(Students::ClassBatch)
                    .to_owned(),
            )
            .await?;

        // 每个学生每次考试每个科目只允许一条成绩
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_progress_sheets_student_exam_subject")
                    .table(ProgressSheets::Table)
                    .col(ProgressSheets::StudentId)
                    .col(ProgressSheets::ExamType)
                    .col(ProgressSheets::Subject)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_progress_sheets_exam_type")
                    .table(ProgressSheets::Table)
                    .col(ProgressSheets::ExamType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ProgressSheets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    FullName,
    Email,
    RollNumber,
    ClassBatch,
    DateOfBirth,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProgressSheets {
    #[sea_orm(iden = "progress_sheets")]
    Table,
    Id,
    StudentId,
    ExamType,
    Subject,
    Marks,
    CreatedAt,
    UpdatedAt,
}
