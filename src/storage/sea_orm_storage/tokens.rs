use super::SeaOrmStorage;
use crate::entity::revoked_tokens::{ActiveModel, Column, Entity as RevokedTokens};
use crate::errors::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 记录已注销的 token，重复注销视为成功；顺带清理已过期的记录
    pub async fn revoke_token_impl(&self, jti: &str, account_id: i64, expires_at: i64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        RevokedTokens::delete_many()
            .filter(Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("清理过期注销记录失败: {e}")))?;

        let model = ActiveModel {
            jti: Set(jti.to_string()),
            user_id: Set(account_id),
            expires_at: Set(expires_at),
            created_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) => match AppError::from_db_err(e, "记录注销 token 失败") {
                AppError::Conflict(_) => Ok(()),
                other => Err(other),
            },
        }
    }

    /// token 是否已注销
    pub async fn is_token_revoked_impl(&self, jti: &str) -> Result<bool> {
        let count = RevokedTokens::find()
            .filter(Column::Jti.eq(jti))
            .count(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询注销记录失败: {e}")))?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::connect("sqlite::memory:", 1, 5).await.unwrap()
    }

    #[actix_web::test]
    async fn test_revoke_is_persistent_and_idempotent() {
        let storage = storage().await;
        let expires_at = chrono::Utc::now().timestamp() + 600;

        assert!(!storage.is_token_revoked_impl("abc123").await.unwrap());
        storage.revoke_token_impl("abc123", 1, expires_at).await.unwrap();
        storage.revoke_token_impl("abc123", 1, expires_at).await.unwrap();
        assert!(storage.is_token_revoked_impl("abc123").await.unwrap());
        assert!(!storage.is_token_revoked_impl("other").await.unwrap());
    }

    #[actix_web::test]
    async fn test_expired_revocations_are_purged() {
        let storage = storage().await;
        let now = chrono::Utc::now().timestamp();

        storage.revoke_token_impl("stale", 1, now - 10).await.unwrap();
        storage.revoke_token_impl("fresh", 1, now + 600).await.unwrap();

        // 过期的 token 本身已无法通过签名校验，记录可以删除
        assert!(!storage.is_token_revoked_impl("stale").await.unwrap());
        assert!(storage.is_token_revoked_impl("fresh").await.unwrap());
    }
}
