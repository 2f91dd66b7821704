use super::SeaOrmStorage;
use crate::entity::profiles::{
    ActiveModel as ProfileActiveModel, Column as ProfileColumn, Entity as Profiles,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AppError, Result};
use crate::models::users::entities::{Account, NewAccount, Profile};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建账号及其资料，两者同时成功或同时失败
    pub async fn create_account_impl(&self, req: NewAccount) -> Result<(Account, Profile)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::database_operation(format!("开启事务失败: {e}")))?;

        let user = ActiveModel {
            // 用户名即邮箱
            username: Set(req.email.clone()),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_db_err(e, "创建账号失败"))?;

        let profile = ProfileActiveModel {
            user_id: Set(user.id),
            otp: Set(req.otp),
            is_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_db_err(e, "创建账号资料失败"))?;

        txn.commit()
            .await
            .map_err(|e| AppError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((user.into_account(), profile.into_profile()))
    }

    /// 通过 ID 获取账号
    pub async fn get_account_by_id_impl(&self, id: i64) -> Result<Option<Account>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 通过邮箱获取账号
    pub async fn get_account_by_email_impl(&self, email: &str) -> Result<Option<Account>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 获取账号资料
    pub async fn get_profile_by_account_id_impl(&self, account_id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(ProfileColumn::UserId.eq(account_id))
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询账号资料失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 标记已验证，验证码作废
    pub async fn mark_profile_verified_impl(&self, account_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Profiles::update_many()
            .col_expr(ProfileColumn::IsVerified, Expr::value(true))
            .col_expr(ProfileColumn::Otp, Expr::value(Option::<String>::None))
            .col_expr(ProfileColumn::UpdatedAt, Expr::value(now))
            .filter(ProfileColumn::UserId.eq(account_id))
            .exec(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("更新验证状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::connect("sqlite::memory:", 1, 5).await.unwrap()
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            otp: Some("123456".to_string()),
        }
    }

    #[actix_web::test]
    async fn test_create_account_with_profile() {
        let storage = storage().await;
        let (account, profile) = storage
            .create_account_impl(new_account("asha@school.edu"))
            .await
            .unwrap();

        assert_eq!(account.username, "asha@school.edu");
        assert_eq!(profile.account_id, account.id);
        assert!(!profile.is_verified);
        assert_eq!(profile.otp.as_deref(), Some("123456"));

        let found = storage
            .get_account_by_email_impl("asha@school.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, account.id);
        assert_eq!(found.password_hash, "hash");
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_conflict() {
        let storage = storage().await;
        storage
            .create_account_impl(new_account("asha@school.edu"))
            .await
            .unwrap();

        let err = storage
            .create_account_impl(new_account("asha@school.edu"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[actix_web::test]
    async fn test_mark_verified_clears_code() {
        let storage = storage().await;
        let (account, _) = storage
            .create_account_impl(new_account("ben@school.edu"))
            .await
            .unwrap();

        assert!(storage.mark_profile_verified_impl(account.id).await.unwrap());

        let profile = storage
            .get_profile_by_account_id_impl(account.id)
            .await
            .unwrap()
            .unwrap();
        assert!(profile.is_verified);
        assert!(profile.otp.is_none());

        assert!(!storage.mark_profile_verified_impl(9999).await.unwrap());
    }

    #[actix_web::test]
    async fn test_update_last_login() {
        let storage = storage().await;
        let (account, _) = storage
            .create_account_impl(new_account("chen@school.edu"))
            .await
            .unwrap();
        assert!(account.last_login.is_none());

        assert!(storage.update_last_login_impl(account.id).await.unwrap());
        let account = storage
            .get_account_by_id_impl(account.id)
            .await
            .unwrap()
            .unwrap();
        assert!(account.last_login.is_some());
    }
}
