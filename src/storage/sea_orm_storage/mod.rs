//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod progress_sheets;
mod students;
mod tokens;
mod users;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    ///
    /// `sqlite::memory:` 每次调用得到一个独立的内存数据库。
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AppError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            // 级联删除依赖外键约束
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            // 内存数据库在最后一个连接关闭时消失
            .idle_timeout(None)
            .connect_with(opt)
            .await
            .map_err(|e| AppError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AppError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AppError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    progress::{
        entities::{ExamType, ProgressSheet, Subject},
        requests::NewProgressSheet,
    },
    students::{entities::Student, requests::StudentRequest},
    users::entities::{Account, NewAccount, Profile},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_account(&self, account: NewAccount) -> Result<(Account, Profile)> {
        self.create_account_impl(account).await
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.get_account_by_email_impl(email).await
    }

    async fn get_profile_by_account_id(&self, account_id: i64) -> Result<Option<Profile>> {
        self.get_profile_by_account_id_impl(account_id).await
    }

    async fn mark_profile_verified(&self, account_id: i64) -> Result<bool> {
        self.mark_profile_verified_impl(account_id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn revoke_token(&self, jti: &str, account_id: i64, expires_at: i64) -> Result<()> {
        self.revoke_token_impl(jti, account_id, expires_at).await
    }

    async fn is_token_revoked(&self, jti: &str) -> Result<bool> {
        self.is_token_revoked_impl(jti).await
    }

    // 学生模块
    async fn create_student(&self, student: StudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_roll_number(&self, roll_number: &str) -> Result<Option<Student>> {
        self.get_student_by_roll_number_impl(roll_number).await
    }

    async fn update_student(&self, id: i64, update: StudentRequest) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_all_students(&self) -> Result<Vec<Student>> {
        self.list_all_students_impl().await
    }

    async fn count_students(&self) -> Result<i64> {
        self.count_students_impl().await
    }

    // 成绩单模块
    async fn create_progress_sheet(&self, sheet: NewProgressSheet) -> Result<ProgressSheet> {
        self.create_progress_sheet_impl(sheet).await
    }

    async fn get_progress_sheet_by_id(&self, id: i64) -> Result<Option<ProgressSheet>> {
        self.get_progress_sheet_by_id_impl(id).await
    }

    async fn find_progress_sheet(
        &self,
        student_id: i64,
        exam_type: ExamType,
        subject: Subject,
    ) -> Result<Option<ProgressSheet>> {
        self.find_progress_sheet_impl(student_id, exam_type, subject)
            .await
    }

    async fn update_progress_sheet(
        &self,
        id: i64,
        update: NewProgressSheet,
    ) -> Result<Option<ProgressSheet>> {
        self.update_progress_sheet_impl(id, update).await
    }

    async fn delete_progress_sheet(&self, id: i64) -> Result<bool> {
        self.delete_progress_sheet_impl(id).await
    }

    async fn list_progress_sheets(&self, exam_type: Option<ExamType>) -> Result<Vec<ProgressSheet>> {
        self.list_progress_sheets_impl(exam_type).await
    }

    async fn list_student_progress_sheets(&self, student_id: i64) -> Result<Vec<ProgressSheet>> {
        self.list_student_progress_sheets_impl(student_id).await
    }
}
